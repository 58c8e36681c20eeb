use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::{
    NaiveDate, NaiveDateTime,
    format::{Item, StrftimeItems},
};
use rust_decimal::Decimal;

use crate::error::ConfigError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses raw text into typed values. A configured pattern replaces the
/// built-in list of accepted formats for its kind.
#[derive(Debug, Clone)]
pub struct ValueParser {
    date_format: Option<String>,
    timestamp_format: Option<String>,
    decimal_char: char,
}

impl Default for ValueParser {
    fn default() -> Self {
        Self {
            date_format: None,
            timestamp_format: None,
            decimal_char: '.',
        }
    }
}

impl ValueParser {
    pub fn new(
        date_format: Option<&str>,
        timestamp_format: Option<&str>,
        decimal_char: char,
    ) -> Result<Self, ConfigError> {
        let date_format = date_format
            .map(|pattern| validate_pattern("date", pattern))
            .transpose()?;
        let timestamp_format = timestamp_format
            .map(|pattern| validate_pattern("timestamp", pattern))
            .transpose()?;
        if !matches!(decimal_char, '.' | ',') {
            return Err(ConfigError::InvalidDecimalChar(decimal_char));
        }
        Ok(Self {
            date_format,
            timestamp_format,
            decimal_char,
        })
    }

    pub fn decimal_char(&self) -> char {
        self.decimal_char
    }

    pub fn parse_date(&self, value: &str) -> Result<NaiveDate> {
        let value = value.trim();
        if let Some(fmt) = &self.date_format {
            return NaiveDate::parse_from_str(value, fmt)
                .map_err(|err| anyhow!("Failed to parse '{value}' as date with '{fmt}': {err}"));
        }
        for fmt in DATE_FORMATS {
            if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
                return Ok(parsed);
            }
        }
        Err(anyhow!("Failed to parse '{value}' as date"))
    }

    pub fn parse_timestamp(&self, value: &str) -> Result<NaiveDateTime> {
        let value = value.trim();
        if let Some(fmt) = &self.timestamp_format {
            return NaiveDateTime::parse_from_str(value, fmt).map_err(|err| {
                anyhow!("Failed to parse '{value}' as timestamp with '{fmt}': {err}")
            });
        }
        for fmt in TIMESTAMP_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
                return Ok(parsed);
            }
        }
        Err(anyhow!("Failed to parse '{value}' as timestamp"))
    }

    pub fn get_long(&self, value: &str) -> Result<i64> {
        let value = value.trim();
        value
            .parse::<i64>()
            .map_err(|err| anyhow!("Failed to parse '{value}' as integer: {err}"))
    }

    pub fn get_big_decimal(&self, value: &str) -> Result<Decimal> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains('_') {
            return Err(anyhow!("Failed to parse '{value}' as decimal"));
        }
        let normalized = if self.decimal_char == '.' {
            if trimmed.contains(',') {
                return Err(anyhow!("Failed to parse '{value}' as decimal"));
            }
            trimmed.to_string()
        } else {
            if trimmed.contains('.') {
                return Err(anyhow!("Failed to parse '{value}' as decimal"));
            }
            trimmed.replace(self.decimal_char, ".")
        };
        let parsed = if normalized.contains(['e', 'E']) {
            Decimal::from_scientific(&normalized)
        } else {
            Decimal::from_str(&normalized)
        };
        parsed.map_err(|err| anyhow!("Failed to parse '{value}' as decimal: {err}"))
    }
}

fn validate_pattern(kind: &'static str, pattern: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidFormat {
        kind,
        pattern: pattern.to_string(),
    };
    if pattern.trim().is_empty() {
        return Err(invalid());
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    Ok(pattern.to_string())
}
