//! Strongly-typed column name wrapper.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Name of a column within a profiled table.
    pub struct ColumnName;
}
