use thiserror::Error;

/// Caller mistakes detected while building the parser or resolving a
/// dialect. Raised before any row is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {kind} format '{pattern}'")]
    InvalidFormat { kind: &'static str, pattern: String },
    #[error("Decimal separator must be '.' or ',' but was '{0}'")]
    InvalidDecimalChar(char),
    #[error("Unknown dialect '{id}'. Supported dialects: {supported}")]
    UnknownDialect { id: String, supported: String },
    #[error("Dialect '{id}': {reason}")]
    InvalidDialect { id: String, reason: String },
}
