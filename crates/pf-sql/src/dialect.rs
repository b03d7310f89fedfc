//! SQL dialect abstraction

use pf_core::sql_utils::{escape_sql_string, quote_ident, quote_qualified, sql_literal};
use pf_core::{ColumnName, Dialect as ConfiguredDialect};
use sqlparser::dialect::{
    Dialect, DuckDbDialect as SqlParserDuckDb, PostgreSqlDialect as SqlParserPostgres,
};
use sqlparser::parser::Parser;
use sqlparser::tokenizer::Token;

use crate::error::{SqlError, SqlResult};
use crate::expr::{AggregateFn, Expression, NamedExpression, Predicate, ProfileSample};

/// Alias given to sampled subqueries
const SAMPLE_ALIAS: &str = "sample";

/// Output name of the group key in grouped selects
pub const GROUP_KEY: &str = "value";

/// Trait for SQL dialect implementations
///
/// Implementors supply the handful of engine-specific spellings; rendering of
/// whole expressions and SELECT statements is shared.
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Quote an identifier for this dialect
    fn quote_ident(&self, ident: &str) -> String {
        quote_ident(ident)
    }

    /// Function returning the character length of a string
    fn length_function(&self) -> &'static str;

    /// Type name of a double precision float
    fn double_type(&self) -> &'static str;

    /// Render a regular expression match of `expr` against `pattern`
    fn render_regex_match(&self, expr: &str, pattern: &str) -> String;

    /// Render a sampled row source for `table_sql` (already quoted)
    fn render_sample(&self, table_sql: &str, sample: &ProfileSample) -> String;

    /// Check that `sql` is a single well-formed scalar expression
    fn validate_expression(&self, sql: &str) -> SqlResult<()> {
        if sql.trim().is_empty() {
            return Err(SqlError::EmptyExpression);
        }
        let invalid = |e: sqlparser::parser::ParserError| {
            let message = e.to_string();
            let (line, column) = parse_location_from_error(&message);
            SqlError::InvalidExpression {
                message,
                line,
                column,
            }
        };
        let mut parser = Parser::new(self.parser_dialect())
            .try_with_sql(sql)
            .map_err(invalid)?;
        parser.parse_expr().map_err(invalid)?;

        let next = parser.peek_token();
        if next.token != Token::EOF {
            return Err(SqlError::InvalidExpression {
                message: format!("unexpected trailing input starting at {}", next.token),
                line: next.span.start.line as usize,
                column: next.span.start.column as usize,
            });
        }
        Ok(())
    }

    /// Render an expression
    fn render_expression(&self, expr: &Expression) -> SqlResult<String> {
        Ok(match expr {
            Expression::Column(name) => self.quote_ident(name),
            Expression::Literal(value) => sql_literal(value),
            Expression::CountAll => "COUNT(*)".to_string(),
            Expression::Aggregate { func, arg } => {
                let arg = self.render_expression(arg)?;
                let call = match func {
                    AggregateFn::CountDistinct => format!("COUNT(DISTINCT {})", arg),
                    other => format!("{}({})", other.sql_name(), arg),
                };
                if func.yields_double() {
                    format!("CAST({} AS {})", call, self.double_type())
                } else {
                    call
                }
            }
            Expression::CountIf(predicate) => format!(
                "CAST(COALESCE(SUM(CASE WHEN {} THEN 1 ELSE 0 END), 0) AS BIGINT)",
                self.render_predicate(predicate)?
            ),
            Expression::Length(inner) => format!(
                "{}({})",
                self.length_function(),
                self.render_expression(inner)?
            ),
            Expression::Raw(sql) => {
                self.validate_expression(sql)?;
                format!("({})", sql.trim())
            }
        })
    }

    /// Render a boolean predicate
    fn render_predicate(&self, predicate: &Predicate) -> SqlResult<String> {
        Ok(match predicate {
            Predicate::IsNull(expr) => format!("{} IS NULL", self.render_expression(expr)?),
            Predicate::IsNotNull(expr) => {
                format!("{} IS NOT NULL", self.render_expression(expr)?)
            }
            // An empty list matches nothing; `IN ()` is not valid SQL
            Predicate::InList {
                values, negated, ..
            } if values.is_empty() => (if *negated { "TRUE" } else { "FALSE" }).to_string(),
            Predicate::InList {
                expr,
                values,
                negated,
            } => {
                let list = values.iter().map(sql_literal).collect::<Vec<_>>();
                format!(
                    "{} {}IN ({})",
                    self.render_expression(expr)?,
                    if *negated { "NOT " } else { "" },
                    list.join(", ")
                )
            }
            Predicate::Like {
                expr,
                pattern,
                negated,
            } => format!(
                "{} {}LIKE '{}'",
                self.render_expression(expr)?,
                if *negated { "NOT " } else { "" },
                escape_sql_string(pattern)
            ),
            Predicate::RegexMatch { expr, pattern } => {
                self.render_regex_match(&self.render_expression(expr)?, pattern)
            }
        })
    }

    /// Render the row source for `table`, sampled when `sample` is given
    fn render_source(&self, table: &str, sample: Option<&ProfileSample>) -> String {
        let table_sql = quote_qualified(table);
        match sample {
            Some(sample) => self.render_sample(&table_sql, sample),
            None => table_sql,
        }
    }

    /// Render a single-row aggregate SELECT of `exprs` over `table`
    fn render_select(
        &self,
        table: &str,
        exprs: &[NamedExpression],
        sample: Option<&ProfileSample>,
    ) -> SqlResult<String> {
        if exprs.is_empty() {
            return Err(SqlError::NoExpressions {
                table: table.to_string(),
            });
        }
        let projection = self.render_projection(exprs)?;
        Ok(format!(
            "SELECT {} FROM {}",
            projection.join(", "),
            self.render_source(table, sample)
        ))
    }

    /// Render a SELECT of `exprs` per distinct value of `group_by`.
    ///
    /// The group key is selected as [`GROUP_KEY`]; the NULL group is included.
    fn render_grouped_select(
        &self,
        table: &str,
        group_by: &ColumnName,
        exprs: &[NamedExpression],
        sample: Option<&ProfileSample>,
    ) -> SqlResult<String> {
        let key = self.quote_ident(group_by);
        let mut projection = vec![format!("{} AS {}", key, self.quote_ident(GROUP_KEY))];
        projection.extend(self.render_projection(exprs)?);
        Ok(format!(
            "SELECT {} FROM {} GROUP BY {}",
            projection.join(", "),
            self.render_source(table, sample),
            key
        ))
    }

    #[doc(hidden)]
    fn render_projection(&self, exprs: &[NamedExpression]) -> SqlResult<Vec<String>> {
        exprs
            .iter()
            .map(|named| {
                Ok(format!(
                    "{} AS {}",
                    self.render_expression(&named.expr)?,
                    self.quote_ident(&named.name)
                ))
            })
            .collect()
    }
}

/// Parse line and column from a sqlparser error message.
///
/// `ParserError` is a plain string wrapper, so the location is recovered from
/// the "Line: N, Column: M" suffix.
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line_idx) = msg.find("Line: ") else {
        return (0, 0);
    };
    let line_start = line_idx + 6;
    let Some(comma_idx) = msg[line_start..].find(',') else {
        return (0, 0);
    };
    let Ok(line) = msg[line_start..line_start + comma_idx]
        .trim()
        .parse::<usize>()
    else {
        return (0, 0);
    };
    let Some(col_idx) = msg.find("Column: ") else {
        return (0, 0);
    };
    let col_start = col_idx + 8;
    let col_end = msg[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| col_start + i)
        .unwrap_or(msg.len());
    let Ok(column) = msg[col_start..col_end].trim().parse::<usize>() else {
        return (0, 0);
    };
    (line, column)
}

/// DuckDB SQL dialect
pub struct DuckDbDialect {
    dialect: SqlParserDuckDb,
}

impl DuckDbDialect {
    /// Create a new DuckDB dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserDuckDb {},
        }
    }
}

impl Default for DuckDbDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for DuckDbDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn length_function(&self) -> &'static str {
        "LENGTH"
    }

    fn double_type(&self) -> &'static str {
        "DOUBLE"
    }

    fn render_regex_match(&self, expr: &str, pattern: &str) -> String {
        format!("regexp_matches({}, '{}')", expr, escape_sql_string(pattern))
    }

    fn render_sample(&self, table_sql: &str, sample: &ProfileSample) -> String {
        let clause = match sample {
            ProfileSample::Percent { percent, seed } => {
                format!("{} PERCENT (bernoulli, {})", percent, seed)
            }
            ProfileSample::Rows { rows, seed } => {
                format!("reservoir({} ROWS) REPEATABLE ({})", rows, seed)
            }
        };
        format!(
            "(SELECT * FROM {} USING SAMPLE {}) AS {}",
            table_sql,
            clause,
            self.quote_ident(SAMPLE_ALIAS)
        )
    }
}

/// PostgreSQL dialect
pub struct PostgresDialect {
    dialect: SqlParserPostgres,
}

impl PostgresDialect {
    /// Create a new PostgreSQL dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserPostgres {},
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "postgres"
    }

    fn length_function(&self) -> &'static str {
        "CHAR_LENGTH"
    }

    fn double_type(&self) -> &'static str {
        "DOUBLE PRECISION"
    }

    fn render_regex_match(&self, expr: &str, pattern: &str) -> String {
        format!("{} ~ '{}'", expr, escape_sql_string(pattern))
    }

    fn render_sample(&self, table_sql: &str, sample: &ProfileSample) -> String {
        let inner = match sample {
            ProfileSample::Percent { percent, seed } => format!(
                "SELECT * FROM {} TABLESAMPLE BERNOULLI ({}) REPEATABLE ({})",
                table_sql, percent, seed
            ),
            // No seeded row-count sampling in core Postgres: order by a seeded hash instead
            ProfileSample::Rows { rows, seed } => format!(
                "SELECT * FROM {} ORDER BY md5(CAST(ctid AS TEXT) || '{}') LIMIT {}",
                table_sql, seed, rows
            ),
        };
        format!("({}) AS {}", inner, self.quote_ident(SAMPLE_ALIAS))
    }
}

/// Dialect implementation for the configured dialect
pub fn dialect_for(dialect: ConfiguredDialect) -> Box<dyn SqlDialect> {
    match dialect {
        ConfiguredDialect::DuckDb => Box::new(DuckDbDialect::new()),
        ConfiguredDialect::Postgres => Box::new(PostgresDialect::new()),
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
