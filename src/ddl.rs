use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

use crate::{col_type::ColType, dialect::Dialect, sampler::InferredColumn};

const MAX_DECIMAL_PRECISION: usize = 38;

static BARE_IDENTIFIER: OnceLock<Regex> = OnceLock::new();

fn bare_identifier() -> &'static Regex {
    BARE_IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"))
}

/// Renders `CREATE TABLE` statements for inferred columns.
///
/// Without a dialect the generic rules apply: double-quoted identifiers,
/// ANSI reserved words, `VARCHAR` up to 32767 characters and `CLOB` beyond.
#[derive(Debug, Clone)]
pub struct DdlBuilder<'a> {
    dialect: Cow<'a, Dialect>,
}

impl<'a> DdlBuilder<'a> {
    pub fn new(dialect: Option<&'a Dialect>) -> Self {
        let dialect = match dialect {
            Some(d) => Cow::Borrowed(d),
            None => Cow::Owned(Dialect::generic()),
        };
        Self { dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn is_bare_identifier(name: &str) -> bool {
        bare_identifier().is_match(name)
    }

    pub fn needs_quoting(&self, name: &str) -> bool {
        !Self::is_bare_identifier(name) || self.dialect.is_reserved(name)
    }

    /// Wraps the name in the dialect's quote character, doubling any
    /// embedded quote characters.
    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = self.dialect.quote_char();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    pub fn format_identifier(&self, name: &str) -> String {
        if self.needs_quoting(name) {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    pub fn column_type(&self, column: &InferredColumn) -> String {
        let names = self.dialect.type_names();
        let nominal = names.for_type(column.col_type, column.bigint);
        match column.col_type {
            ColType::String => {
                if let Some(unbounded) = self.dialect.unbounded_varchar() {
                    unbounded.to_string()
                } else if column.size <= self.dialect.max_varchar() {
                    format!("{nominal}({})", column.size.max(1))
                } else {
                    names.clob.clone()
                }
            }
            ColType::Decimal => {
                // Widest integer part plus widest fraction, independent of
                // which value supplied each.
                let scale = (column.digits as usize).min(MAX_DECIMAL_PRECISION);
                let precision =
                    (column.integer_digits as usize + scale).clamp(1, MAX_DECIMAL_PRECISION);
                format!("{nominal}({precision},{scale})")
            }
            ColType::Integer | ColType::Date | ColType::Timestamp => nominal.to_string(),
        }
    }

    /// Column names are padded to a common width so the types line up.
    pub fn build(&self, table_name: &str, columns: &[InferredColumn]) -> String {
        let names = columns
            .iter()
            .map(|column| self.format_identifier(&column.name))
            .collect::<Vec<_>>();
        let width = names
            .iter()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);
        let lines = names
            .iter()
            .zip(columns)
            .map(|(name, column)| format!("  {name:<width$} {}", self.column_type(column)))
            .collect::<Vec<_>>();
        format!(
            "CREATE TABLE {} (\n{}\n);",
            self.format_identifier(table_name),
            lines.join(",\n")
        )
    }
}
