//! Test case definitions and test suite parsing
//!
//! A test case is pure data: a kind, a target and the kind's thresholds.
//! Suites are loaded from YAML in two steps. Each entry is first read as a
//! [`RawTestCase`] with an untyped `params` mapping, then the `test` string is
//! resolved to a [`TestCaseKind`] and the parameters are decoded into that
//! kind's parameter struct. Unknown kinds are rejected while the suite loads.

use crate::column_name::ColumnName;
use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use crate::value::MetricValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Every test case kind the engine knows how to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestCaseKind {
    /// Null count (plus optional special values) equals a fixed number
    ColumnValuesMissingCountToBeEqual,
    /// Column has no nulls
    ColumnValuesToBeNotNull,
    /// Every non-null value appears exactly once
    ColumnValuesToBeUnique,
    /// Column min/max lie within bounds
    ColumnValuesToBeBetween,
    /// Column text lengths lie within bounds
    ColumnValueLengthsToBeBetween,
    /// Every non-null value belongs to an allowed set
    ColumnValuesToBeInSet,
    /// No value belongs to a forbidden set
    ColumnValuesToBeNotInSet,
    /// Every non-null value matches a regular expression
    ColumnValuesToMatchRegex,
    /// Row count equals a fixed number
    TableRowCountToEqual,
    /// Row count lies within bounds
    TableRowCountToBeBetween,
    /// Column count equals a fixed number
    TableColumnCountToEqual,
    /// Table columns match an expected set of names
    TableColumnToMatchSet,
}

impl TestCaseKind {
    /// All kinds, in declaration order
    pub const ALL: [TestCaseKind; 12] = [
        TestCaseKind::ColumnValuesMissingCountToBeEqual,
        TestCaseKind::ColumnValuesToBeNotNull,
        TestCaseKind::ColumnValuesToBeUnique,
        TestCaseKind::ColumnValuesToBeBetween,
        TestCaseKind::ColumnValueLengthsToBeBetween,
        TestCaseKind::ColumnValuesToBeInSet,
        TestCaseKind::ColumnValuesToBeNotInSet,
        TestCaseKind::ColumnValuesToMatchRegex,
        TestCaseKind::TableRowCountToEqual,
        TestCaseKind::TableRowCountToBeBetween,
        TestCaseKind::TableColumnCountToEqual,
        TestCaseKind::TableColumnToMatchSet,
    ];

    /// Canonical camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCaseKind::ColumnValuesMissingCountToBeEqual => "columnValuesMissingCountToBeEqual",
            TestCaseKind::ColumnValuesToBeNotNull => "columnValuesToBeNotNull",
            TestCaseKind::ColumnValuesToBeUnique => "columnValuesToBeUnique",
            TestCaseKind::ColumnValuesToBeBetween => "columnValuesToBeBetween",
            TestCaseKind::ColumnValueLengthsToBeBetween => "columnValueLengthsToBeBetween",
            TestCaseKind::ColumnValuesToBeInSet => "columnValuesToBeInSet",
            TestCaseKind::ColumnValuesToBeNotInSet => "columnValuesToBeNotInSet",
            TestCaseKind::ColumnValuesToMatchRegex => "columnValuesToMatchRegex",
            TestCaseKind::TableRowCountToEqual => "tableRowCountToEqual",
            TestCaseKind::TableRowCountToBeBetween => "tableRowCountToBeBetween",
            TestCaseKind::TableColumnCountToEqual => "tableColumnCountToEqual",
            TestCaseKind::TableColumnToMatchSet => "tableColumnToMatchSet",
        }
    }

    /// True for kinds that target a single column
    pub fn is_column_test(&self) -> bool {
        !matches!(
            self,
            TestCaseKind::TableRowCountToEqual
                | TestCaseKind::TableRowCountToBeBetween
                | TestCaseKind::TableColumnCountToEqual
                | TestCaseKind::TableColumnToMatchSet
        )
    }
}

impl fmt::Display for TestCaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind string matches no [`TestCaseKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTestCaseKind(pub String);

impl fmt::Display for UnknownTestCaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown test case kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownTestCaseKind {}

impl FromStr for TestCaseKind {
    type Err = UnknownTestCaseKind;

    /// Accepts the camelCase name as well as its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_kind(s);
        TestCaseKind::ALL
            .into_iter()
            .find(|kind| normalize_kind(kind.as_str()) == wanted)
            .ok_or_else(|| UnknownTestCaseKind(s.to_string()))
    }
}

fn normalize_kind(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parameters for `columnValuesMissingCountToBeEqual`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MissingCountParams {
    /// Expected number of missing values
    pub missing_count_value: u64,
    /// Extra values that count as missing (e.g. "N/A", "", -1)
    #[serde(default)]
    pub missing_value_match: Option<Vec<MetricValue>>,
}

/// Parameters for `columnValuesToBeBetween`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValueRangeParams {
    /// Inclusive lower bound on the column minimum
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Inclusive upper bound on the column maximum
    #[serde(default)]
    pub max_value: Option<f64>,
}

/// Parameters for `columnValueLengthsToBeBetween`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LengthRangeParams {
    /// Inclusive lower bound on the shortest value
    #[serde(default)]
    pub min_length: Option<u64>,
    /// Inclusive upper bound on the longest value
    #[serde(default)]
    pub max_length: Option<u64>,
}

/// Parameters for `columnValuesToBeInSet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InSetParams {
    /// Values the column may hold
    pub allowed_values: Vec<MetricValue>,
}

/// Parameters for `columnValuesToBeNotInSet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotInSetParams {
    /// Values the column must never hold
    pub forbidden_values: Vec<MetricValue>,
}

/// Parameters for `columnValuesToMatchRegex`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegexParams {
    /// Pattern every non-null value must match
    pub regex: String,
}

/// Parameters for `tableRowCountToEqual`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RowCountParams {
    /// Expected row count
    pub value: u64,
}

/// Parameters for `tableRowCountToBeBetween`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RowCountRangeParams {
    /// Inclusive lower bound
    pub min_value: u64,
    /// Inclusive upper bound
    pub max_value: u64,
}

/// Parameters for `tableColumnCountToEqual`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnCountParams {
    /// Expected number of columns
    pub column_count: u64,
}

/// Parameters for `tableColumnToMatchSet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnNamesParams {
    /// Expected column names
    pub column_names: Vec<String>,
    /// Whether the column order must match too
    #[serde(default)]
    pub ordered: bool,
}

/// A test case's kind together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", content = "params", rename_all = "camelCase")]
pub enum TestDefinition {
    /// See [`TestCaseKind::ColumnValuesMissingCountToBeEqual`]
    ColumnValuesMissingCountToBeEqual(MissingCountParams),
    /// See [`TestCaseKind::ColumnValuesToBeNotNull`]
    ColumnValuesToBeNotNull,
    /// See [`TestCaseKind::ColumnValuesToBeUnique`]
    ColumnValuesToBeUnique,
    /// See [`TestCaseKind::ColumnValuesToBeBetween`]
    ColumnValuesToBeBetween(ValueRangeParams),
    /// See [`TestCaseKind::ColumnValueLengthsToBeBetween`]
    ColumnValueLengthsToBeBetween(LengthRangeParams),
    /// See [`TestCaseKind::ColumnValuesToBeInSet`]
    ColumnValuesToBeInSet(InSetParams),
    /// See [`TestCaseKind::ColumnValuesToBeNotInSet`]
    ColumnValuesToBeNotInSet(NotInSetParams),
    /// See [`TestCaseKind::ColumnValuesToMatchRegex`]
    ColumnValuesToMatchRegex(RegexParams),
    /// See [`TestCaseKind::TableRowCountToEqual`]
    TableRowCountToEqual(RowCountParams),
    /// See [`TestCaseKind::TableRowCountToBeBetween`]
    TableRowCountToBeBetween(RowCountRangeParams),
    /// See [`TestCaseKind::TableColumnCountToEqual`]
    TableColumnCountToEqual(ColumnCountParams),
    /// See [`TestCaseKind::TableColumnToMatchSet`]
    TableColumnToMatchSet(ColumnNamesParams),
}

impl TestDefinition {
    /// The kind discriminant
    pub fn kind(&self) -> TestCaseKind {
        match self {
            TestDefinition::ColumnValuesMissingCountToBeEqual(_) => {
                TestCaseKind::ColumnValuesMissingCountToBeEqual
            }
            TestDefinition::ColumnValuesToBeNotNull => TestCaseKind::ColumnValuesToBeNotNull,
            TestDefinition::ColumnValuesToBeUnique => TestCaseKind::ColumnValuesToBeUnique,
            TestDefinition::ColumnValuesToBeBetween(_) => TestCaseKind::ColumnValuesToBeBetween,
            TestDefinition::ColumnValueLengthsToBeBetween(_) => {
                TestCaseKind::ColumnValueLengthsToBeBetween
            }
            TestDefinition::ColumnValuesToBeInSet(_) => TestCaseKind::ColumnValuesToBeInSet,
            TestDefinition::ColumnValuesToBeNotInSet(_) => TestCaseKind::ColumnValuesToBeNotInSet,
            TestDefinition::ColumnValuesToMatchRegex(_) => TestCaseKind::ColumnValuesToMatchRegex,
            TestDefinition::TableRowCountToEqual(_) => TestCaseKind::TableRowCountToEqual,
            TestDefinition::TableRowCountToBeBetween(_) => TestCaseKind::TableRowCountToBeBetween,
            TestDefinition::TableColumnCountToEqual(_) => TestCaseKind::TableColumnCountToEqual,
            TestDefinition::TableColumnToMatchSet(_) => TestCaseKind::TableColumnToMatchSet,
        }
    }

    /// Decode untyped YAML parameters for `kind`
    pub fn from_params(kind: TestCaseKind, params: serde_yaml::Value) -> Result<Self, String> {
        let def = match kind {
            TestCaseKind::ColumnValuesMissingCountToBeEqual => {
                TestDefinition::ColumnValuesMissingCountToBeEqual(decode(params)?)
            }
            TestCaseKind::ColumnValuesToBeNotNull => TestDefinition::ColumnValuesToBeNotNull,
            TestCaseKind::ColumnValuesToBeUnique => TestDefinition::ColumnValuesToBeUnique,
            TestCaseKind::ColumnValuesToBeBetween => {
                TestDefinition::ColumnValuesToBeBetween(decode(params)?)
            }
            TestCaseKind::ColumnValueLengthsToBeBetween => {
                TestDefinition::ColumnValueLengthsToBeBetween(decode(params)?)
            }
            TestCaseKind::ColumnValuesToBeInSet => {
                TestDefinition::ColumnValuesToBeInSet(decode(params)?)
            }
            TestCaseKind::ColumnValuesToBeNotInSet => {
                TestDefinition::ColumnValuesToBeNotInSet(decode(params)?)
            }
            TestCaseKind::ColumnValuesToMatchRegex => {
                TestDefinition::ColumnValuesToMatchRegex(decode(params)?)
            }
            TestCaseKind::TableRowCountToEqual => {
                TestDefinition::TableRowCountToEqual(decode(params)?)
            }
            TestCaseKind::TableRowCountToBeBetween => {
                TestDefinition::TableRowCountToBeBetween(decode(params)?)
            }
            TestCaseKind::TableColumnCountToEqual => {
                TestDefinition::TableColumnCountToEqual(decode(params)?)
            }
            TestCaseKind::TableColumnToMatchSet => {
                TestDefinition::TableColumnToMatchSet(decode(params)?)
            }
        };
        def.check()?;
        Ok(def)
    }

    /// Reject parameter combinations no evaluator could judge
    fn check(&self) -> Result<(), String> {
        match self {
            TestDefinition::ColumnValuesToBeBetween(p)
                if p.min_value.is_none() && p.max_value.is_none() =>
            {
                Err("at least one of minValue or maxValue is required".to_string())
            }
            TestDefinition::ColumnValueLengthsToBeBetween(p)
                if p.min_length.is_none() && p.max_length.is_none() =>
            {
                Err("at least one of minLength or maxLength is required".to_string())
            }
            TestDefinition::TableRowCountToBeBetween(p) if p.min_value > p.max_value => Err(
                format!("minValue {} is greater than maxValue {}", p.min_value, p.max_value),
            ),
            TestDefinition::ColumnValuesToBeInSet(p) if p.allowed_values.is_empty() => {
                Err("allowedValues must not be empty".to_string())
            }
            TestDefinition::ColumnValuesToBeNotInSet(p) if p.forbidden_values.is_empty() => {
                Err("forbiddenValues must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

fn decode<T: DeserializeOwned>(params: serde_yaml::Value) -> Result<T, String> {
    let params = if params.is_null() {
        serde_yaml::Value::Mapping(Default::default())
    } else {
        params
    };
    serde_yaml::from_value(params).map_err(|e| e.to_string())
}

/// What a test case is evaluated against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestTarget {
    /// Table the test case applies to
    pub table: TableName,
    /// Column, for column-level kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnName>,
}

impl fmt::Display for TestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{}.{}", self.table, column),
            None => write!(f, "{}", self.table),
        }
    }
}

/// A declarative data-quality rule instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique name within its suite
    pub name: String,
    /// Table (and column) under test
    pub target: TestTarget,
    /// Kind and thresholds
    pub definition: TestDefinition,
}

impl TestCase {
    /// Build a table-level test case
    pub fn for_table(
        name: impl Into<String>,
        table: impl Into<TableName>,
        definition: TestDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            target: TestTarget {
                table: table.into(),
                column: None,
            },
            definition,
        }
    }

    /// Build a column-level test case
    pub fn for_column(
        name: impl Into<String>,
        table: impl Into<TableName>,
        column: impl Into<ColumnName>,
        definition: TestDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            target: TestTarget {
                table: table.into(),
                column: Some(column.into()),
            },
            definition,
        }
    }

    /// The test case kind
    pub fn kind(&self) -> TestCaseKind {
        self.definition.kind()
    }

    /// Resolve a raw suite entry into a typed test case
    pub fn from_raw(raw: RawTestCase) -> CoreResult<Self> {
        let kind: TestCaseKind =
            raw.test
                .parse()
                .map_err(|_| CoreError::UnsupportedTestCaseKind {
                    name: raw.name.clone(),
                    kind: raw.test.clone(),
                })?;

        let table = TableName::try_new(raw.table).ok_or_else(|| CoreError::InvalidTestParams {
            name: raw.name.clone(),
            message: "table must not be empty".to_string(),
        })?;
        let column = raw.column.and_then(ColumnName::try_new);

        if kind.is_column_test() && column.is_none() {
            return Err(CoreError::InvalidTestParams {
                name: raw.name,
                message: format!("{} requires a column", kind),
            });
        }
        if !kind.is_column_test() && column.is_some() {
            log::warn!(
                "Test case '{}' is table-level ({}); ignoring column",
                raw.name,
                kind
            );
        }

        let definition = TestDefinition::from_params(kind, raw.params).map_err(|message| {
            CoreError::InvalidTestParams {
                name: raw.name.clone(),
                message,
            }
        })?;

        Ok(Self {
            name: raw.name,
            target: TestTarget {
                table,
                column: if kind.is_column_test() { column } else { None },
            },
            definition,
        })
    }
}

/// One entry of a test suite file, before its kind is resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTestCase {
    /// Test case name
    pub name: String,
    /// Table under test
    pub table: String,
    /// Column under test (column-level kinds)
    #[serde(default)]
    pub column: Option<String>,
    /// Kind name (camelCase or snake_case)
    pub test: String,
    /// Kind-specific parameters
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TestSuiteFile {
    #[serde(default)]
    tests: Vec<RawTestCase>,
}

/// An ordered collection of test cases
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSuite {
    /// Test cases in file order
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    /// Parse a suite from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let file: TestSuiteFile = serde_yaml::from_str(content)?;
        let mut seen = HashSet::new();
        let mut tests = Vec::with_capacity(file.tests.len());
        for raw in file.tests {
            if !seen.insert(raw.name.clone()) {
                return Err(CoreError::DuplicateTestCase { name: raw.name });
            }
            tests.push(TestCase::from_raw(raw)?);
        }
        Ok(Self { tests })
    }

    /// Load a suite from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Number of test cases
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// True when the suite has no test cases
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[cfg(test)]
#[path = "test_case_test.rs"]
mod tests;
