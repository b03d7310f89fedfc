//! Strongly-typed table name wrapper.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Name of a profiled table, optionally schema-qualified (`schema.table`).
    pub struct TableName;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_table_name_lookup_by_str() {
        let mut map: BTreeMap<TableName, u32> = BTreeMap::new();
        map.insert(TableName::new("orders"), 7);
        assert_eq!(map.get("orders"), Some(&7));
    }

    #[test]
    fn test_table_name_try_new_rejects_empty() {
        assert!(TableName::try_new("").is_none());
        assert_eq!(TableName::try_new("staging.orders").unwrap(), "staging.orders");
    }

    #[test]
    fn test_table_name_serializes_transparently() {
        let json = serde_json::to_string(&TableName::new("orders")).unwrap();
        assert_eq!(json, r#""orders""#);
    }
}
