use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{col_type::ColType, error::ConfigError, keywords};

pub const DEFAULT_MAX_VARCHAR: usize = 32767;

pub const BUILTIN_DIALECTS: &[&str] = &[
    "generic",
    "postgres",
    "mysql",
    "oracle",
    "sqlserver",
    "sqlite",
    "db2",
    "h2",
];

/// Literal type names a dialect uses for each rendered column kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNames {
    pub integer: String,
    pub bigint: String,
    pub decimal: String,
    pub date: String,
    pub timestamp: String,
    pub varchar: String,
    pub clob: String,
}

impl TypeNames {
    fn new(names: [&str; 7]) -> Self {
        let [integer, bigint, decimal, date, timestamp, varchar, clob] = names;
        Self {
            integer: integer.to_string(),
            bigint: bigint.to_string(),
            decimal: decimal.to_string(),
            date: date.to_string(),
            timestamp: timestamp.to_string(),
            varchar: varchar.to_string(),
            clob: clob.to_string(),
        }
    }

    /// Nominal type name for a column, before any sizing.
    pub fn for_type(&self, ty: ColType, bigint: bool) -> &str {
        match ty {
            ColType::Integer if bigint => &self.bigint,
            ColType::Integer => &self.integer,
            ColType::Decimal => &self.decimal,
            ColType::Date => &self.date,
            ColType::Timestamp => &self.timestamp,
            ColType::String => &self.varchar,
        }
    }
}

/// Target-database rendering rules for generated DDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    id: String,
    quote: char,
    max_varchar: usize,
    unbounded_varchar: Option<String>,
    types: TypeNames,
    reserved: HashSet<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::generic()
    }
}

impl Dialect {
    pub fn generic() -> Self {
        Self::assemble(
            "generic",
            '"',
            DEFAULT_MAX_VARCHAR,
            None,
            TypeNames::new(["INTEGER", "BIGINT", "DECIMAL", "DATE", "TIMESTAMP", "VARCHAR", "CLOB"]),
        )
    }

    /// Looks up a built-in dialect by id or common alias.
    pub fn builtin(id: &str) -> Result<Self, ConfigError> {
        let normalized = id.trim().to_ascii_lowercase();
        let dialect = match normalized.as_str() {
            "generic" | "ansi" | "sql" => Self::generic(),
            "postgres" | "postgresql" | "pg" => Self::assemble(
                "postgres",
                '"',
                10_485_760,
                None,
                TypeNames::new(["INTEGER", "BIGINT", "NUMERIC", "DATE", "TIMESTAMP", "VARCHAR", "TEXT"]),
            ),
            "mysql" | "mariadb" => Self::assemble(
                "mysql",
                '`',
                16_383,
                None,
                TypeNames::new(["INT", "BIGINT", "DECIMAL", "DATE", "DATETIME", "VARCHAR", "LONGTEXT"]),
            ),
            "oracle" => Self::assemble(
                "oracle",
                '"',
                4_000,
                None,
                TypeNames::new(["INTEGER", "NUMBER(19)", "NUMBER", "DATE", "TIMESTAMP", "VARCHAR2", "CLOB"]),
            ),
            "sqlserver" | "mssql" => Self::assemble(
                "sqlserver",
                '"',
                8_000,
                None,
                TypeNames::new(["INT", "BIGINT", "DECIMAL", "DATE", "DATETIME2", "VARCHAR", "VARCHAR(MAX)"]),
            ),
            "sqlite" => Self::assemble(
                "sqlite",
                '"',
                DEFAULT_MAX_VARCHAR,
                Some("TEXT".to_string()),
                TypeNames::new(["INTEGER", "BIGINT", "NUMERIC", "DATE", "TIMESTAMP", "VARCHAR", "TEXT"]),
            ),
            "db2" => Self::assemble(
                "db2",
                '"',
                32_672,
                None,
                TypeNames::new(["INTEGER", "BIGINT", "DECIMAL", "DATE", "TIMESTAMP", "VARCHAR", "CLOB"]),
            ),
            "h2" => Self::assemble(
                "h2",
                '"',
                1_048_576,
                None,
                TypeNames::new(["INTEGER", "BIGINT", "DECIMAL", "DATE", "TIMESTAMP", "VARCHAR", "CLOB"]),
            ),
            _ => {
                return Err(ConfigError::UnknownDialect {
                    id: id.to_string(),
                    supported: BUILTIN_DIALECTS.join(", "),
                });
            }
        };
        Ok(dialect)
    }

    fn assemble(
        id: &str,
        quote: char,
        max_varchar: usize,
        unbounded_varchar: Option<String>,
        types: TypeNames,
    ) -> Self {
        let reserved = keywords::ANSI_RESERVED
            .iter()
            .chain(keywords::dialect_reserved(id))
            .map(|word| word.to_string())
            .collect();
        Self {
            id: id.to_string(),
            quote,
            max_varchar,
            unbounded_varchar,
            types,
            reserved,
        }
    }

    pub fn load_profile(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening dialect profile {path:?}"))?;
        let profile: DialectProfile = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing dialect profile {path:?}"))?;
        Ok(Self::from_profile(profile)?)
    }

    pub fn from_profile(profile: DialectProfile) -> Result<Self, ConfigError> {
        let mut dialect = match profile.base.as_deref() {
            Some(base) => Self::builtin(base)?,
            None => Self::generic(),
        };
        dialect.id = profile.id.clone();
        if let Some(quote) = profile.quote {
            if quote.is_alphanumeric() || quote.is_whitespace() || quote == '_' {
                return Err(ConfigError::InvalidDialect {
                    id: profile.id,
                    reason: format!("'{quote}' cannot be used as identifier quote"),
                });
            }
            dialect.quote = quote;
        }
        if let Some(max) = profile.max_varchar {
            if max == 0 {
                return Err(ConfigError::InvalidDialect {
                    id: profile.id,
                    reason: "max_varchar must be positive".to_string(),
                });
            }
            dialect.max_varchar = max;
        }
        if let Some(unbounded) = profile.unbounded_varchar {
            let trimmed = unbounded.trim();
            dialect.unbounded_varchar = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        let overrides = profile.types;
        let targets = [
            (overrides.integer, &mut dialect.types.integer),
            (overrides.bigint, &mut dialect.types.bigint),
            (overrides.decimal, &mut dialect.types.decimal),
            (overrides.date, &mut dialect.types.date),
            (overrides.timestamp, &mut dialect.types.timestamp),
            (overrides.varchar, &mut dialect.types.varchar),
            (overrides.clob, &mut dialect.types.clob),
        ];
        for (value, target) in targets {
            if let Some(name) = value.filter(|name| !name.trim().is_empty()) {
                *target = name.trim().to_string();
            }
        }
        dialect.reserved.extend(
            profile
                .reserved_words
                .iter()
                .map(|word| word.trim().to_ascii_uppercase())
                .filter(|word| !word.is_empty()),
        );
        Ok(dialect)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn quote_char(&self) -> char {
        self.quote
    }

    pub fn max_varchar(&self) -> usize {
        self.max_varchar
    }

    pub fn unbounded_varchar(&self) -> Option<&str> {
        self.unbounded_varchar.as_deref()
    }

    pub fn type_names(&self) -> &TypeNames {
        &self.types
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(&word.to_ascii_uppercase())
    }

    pub fn reserved_word_count(&self) -> usize {
        self.reserved.len()
    }
}

/// YAML description of a custom dialect. Every field except `id` is
/// optional and overrides the `base` dialect (generic when absent).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialectProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_varchar: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unbounded_varchar: Option<String>,
    #[serde(default)]
    pub types: TypeNameOverrides,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved_words: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeNameOverrides {
    #[serde(default)]
    pub integer: Option<String>,
    #[serde(default)]
    pub bigint: Option<String>,
    #[serde(default)]
    pub decimal: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub varchar: Option<String>,
    #[serde(default)]
    pub clob: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_lookup_accepts_aliases() {
        assert_eq!(Dialect::builtin("PostgreSQL").unwrap().id(), "postgres");
        assert_eq!(Dialect::builtin("mariadb").unwrap().quote_char(), '`');
        assert_eq!(Dialect::builtin("mssql").unwrap().max_varchar(), 8000);
        let err = Dialect::builtin("dbase").unwrap_err();
        assert!(err.to_string().contains("Supported dialects"));
    }

    #[test]
    fn every_builtin_id_resolves() {
        for id in BUILTIN_DIALECTS {
            let dialect = Dialect::builtin(id).unwrap();
            assert_eq!(dialect.id(), *id);
            assert!(dialect.is_reserved("select"));
        }
    }

    #[test]
    fn reserved_words_are_case_insensitive_and_dialect_specific() {
        let postgres = Dialect::builtin("postgres").unwrap();
        assert!(postgres.is_reserved("Limit"));
        let generic = Dialect::generic();
        assert!(!generic.is_reserved("limit"));
        assert!(generic.is_reserved("Order"));
    }

    #[test]
    fn type_names_cover_bigint_promotion() {
        let oracle = Dialect::builtin("oracle").unwrap();
        assert_eq!(oracle.type_names().for_type(ColType::Integer, true), "NUMBER(19)");
        assert_eq!(oracle.type_names().for_type(ColType::String, false), "VARCHAR2");
    }

    #[test]
    fn profile_overrides_base_dialect() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "id: warehouse\nbase: postgres\nmax_varchar: 255\nunbounded_varchar: STRING\ntypes:\n  clob: SUPER\nreserved_words: [region, Zone]"
        )
        .unwrap();
        let dialect = Dialect::load_profile(file.path()).expect("load profile");
        assert_eq!(dialect.id(), "warehouse");
        assert_eq!(dialect.max_varchar(), 255);
        assert_eq!(dialect.unbounded_varchar(), Some("STRING"));
        assert_eq!(dialect.type_names().clob, "SUPER");
        assert_eq!(dialect.type_names().decimal, "NUMERIC");
        assert!(dialect.is_reserved("zone"));
        assert!(dialect.is_reserved("limit"));
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        let profile = DialectProfile {
            id: "bad".to_string(),
            quote: Some('a'),
            ..DialectProfile::default()
        };
        assert!(matches!(
            Dialect::from_profile(profile),
            Err(ConfigError::InvalidDialect { .. })
        ));
        let profile = DialectProfile {
            id: "bad".to_string(),
            max_varchar: Some(0),
            ..DialectProfile::default()
        };
        assert!(Dialect::from_profile(profile).is_err());
    }
}
