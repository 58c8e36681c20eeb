use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Inferred category of a column's values.
///
/// Variants are declared in tie-break order: when a column collected
/// evidence for several types, iteration and "first seen" follow this
/// declaration order (numeric before temporal before text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColType {
    Integer,
    Decimal,
    Date,
    Timestamp,
    String,
}

impl ColType {
    pub const COUNT: usize = 5;

    /// Declaration order, used for counting and tie-breaks.
    pub const ALL: [ColType; ColType::COUNT] = [
        ColType::Integer,
        ColType::Decimal,
        ColType::Date,
        ColType::Timestamp,
        ColType::String,
    ];

    /// Order in which a single value is tested from scratch. Differs from
    /// [`ColType::ALL`]: timestamps are tried before dates.
    pub const CLASSIFICATION_ORDER: [ColType; ColType::COUNT] = [
        ColType::Integer,
        ColType::Decimal,
        ColType::Timestamp,
        ColType::Date,
        ColType::String,
    ];

    pub const fn index(self) -> usize {
        match self {
            ColType::Integer => 0,
            ColType::Decimal => 1,
            ColType::Date => 2,
            ColType::Timestamp => 3,
            ColType::String => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColType::Integer => "Integer",
            ColType::Decimal => "Decimal",
            ColType::Date => "Date",
            ColType::Timestamp => "Timestamp",
            ColType::String => "String",
        }
    }

    /// True for {Integer, Decimal} and {Date, Timestamp}.
    pub fn is_compatible_with(self, other: ColType) -> bool {
        matches!(
            (self, other),
            (ColType::Integer, ColType::Decimal)
                | (ColType::Decimal, ColType::Integer)
                | (ColType::Date, ColType::Timestamp)
                | (ColType::Timestamp, ColType::Date)
        )
    }

    pub fn is_character(self) -> bool {
        self == ColType::String
    }
}

impl fmt::Display for ColType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(ColType::Integer),
            "decimal" | "numeric" => Ok(ColType::Decimal),
            "date" => Ok(ColType::Date),
            "timestamp" | "datetime" => Ok(ColType::Timestamp),
            "string" | "varchar" | "text" => Ok(ColType::String),
            _ => Err(anyhow!(
                "Unknown column type '{value}'. Supported types: integer, decimal, date, timestamp, string"
            )),
        }
    }
}
