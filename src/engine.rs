//! End-to-end inference: read a bounded sample from a row source, resolve
//! every column's type and render the `CREATE TABLE` statement.
//!
//! Read errors after the header stop the sample early instead of failing
//! the run; the statistics gathered so far are still used and the reason is
//! reported in [`InferenceResult::truncated`].

use std::path::Path;

use anyhow::{Context, Result, bail};
use encoding_rs::{Encoding, UTF_8};
use heck::ToSnakeCase;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    classifier::ValueTypeClassifier,
    ddl::DdlBuilder,
    dialect::Dialect,
    io_utils::{self, InputFormat},
    memory::{DEFAULT_MIN_FREE_MEMORY_MB, MemoryGuard},
    parser::ValueParser,
    sampler::{InferredColumn, SchemaSampler},
    source::{CsvSource, RowSource},
    stats::ColumnStatistics,
};

pub const DEFAULT_SAMPLE_SIZE: usize = 1000;
pub const FALLBACK_TABLE_NAME: &str = "import_table";

#[derive(Debug, Clone)]
pub struct InferOptions {
    /// Maximum number of data rows to read; 0 reads everything.
    pub sample_size: usize,
    pub has_header: bool,
    pub always_varchar: bool,
    /// Explicit table name; derived from the source name when absent.
    pub table_name: Option<String>,
    pub parser: ValueParser,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            has_header: true,
            always_varchar: false,
            table_name: None,
            parser: ValueParser::default(),
        }
    }
}

/// How to open a file-backed source.
#[derive(Debug, Clone)]
pub struct FileOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
    /// Sheet name or zero-based index; first sheet when absent.
    pub sheet: Option<String>,
    /// Stop reading once available memory drops below this; 0 disables.
    pub min_free_memory_mb: u64,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
            sheet: None,
            min_free_memory_mb: DEFAULT_MIN_FREE_MEMORY_MB,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    pub table_name: String,
    pub ddl: String,
    pub columns: Vec<InferredColumn>,
    pub diagnostics: Vec<String>,
    pub statistics: Vec<ColumnStatistics>,
    pub rows_sampled: usize,
    pub decode_errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<String>,
}

pub fn infer_schema(
    source: &mut dyn RowSource,
    options: &InferOptions,
    dialect: Option<&Dialect>,
) -> Result<InferenceResult> {
    if source.headers().is_empty() {
        bail!("Input contains no columns");
    }
    let classifier = ValueTypeClassifier::new(options.parser.clone());
    let mut sampler =
        SchemaSampler::new(source.headers(), classifier).always_varchar(options.always_varchar);
    debug!(
        "Sampling up to {} row(s) across {} column(s)",
        sample_limit_label(options.sample_size),
        sampler.column_count()
    );

    let mut read_failure = None;
    while options.sample_size == 0 || sampler.rows_sampled() < options.sample_size {
        match source.next_row() {
            Ok(Some(row)) => sampler.add_row(&row),
            Ok(None) => break,
            Err(err) => {
                warn!(
                    "Stopping sample after {} row(s): {err:#}",
                    sampler.rows_sampled()
                );
                read_failure = Some(format!("{err:#}"));
                break;
            }
        }
    }
    let truncated = read_failure.or_else(|| source.truncation().map(str::to_string));

    let table_name = match options.table_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => derive_table_name(source.logical_name()),
    };
    let outcome = sampler.finish();
    let ddl = DdlBuilder::new(dialect).build(&table_name, &outcome.columns);
    info!(
        "Inferred {} column(s) for table '{}' from {} row(s)",
        outcome.columns.len(),
        table_name,
        outcome.rows_sampled
    );

    Ok(InferenceResult {
        table_name,
        ddl,
        columns: outcome.columns,
        diagnostics: outcome.diagnostics,
        statistics: outcome.statistics,
        rows_sampled: outcome.rows_sampled,
        decode_errors: source.decode_errors(),
        truncated,
    })
}

/// Opens `path` as delimited text or a spreadsheet (by extension) and runs
/// [`infer_schema`] on it.
pub fn infer_file(
    path: &Path,
    file: &FileOptions,
    options: &InferOptions,
    dialect: Option<&Dialect>,
) -> Result<InferenceResult> {
    let guard = if file.min_free_memory_mb == 0 {
        MemoryGuard::disabled()
    } else {
        MemoryGuard::new(file.min_free_memory_mb)
    };
    match io_utils::detect_input_format(path) {
        InputFormat::Delimited => {
            let delimiter = io_utils::resolve_input_delimiter(path, file.delimiter);
            let mut source = CsvSource::open(path, delimiter, file.encoding, options.has_header)?
                .with_memory_guard(guard);
            infer_schema(&mut source, options, dialect)
                .with_context(|| format!("Inferring schema from {path:?}"))
        }
        InputFormat::Spreadsheet => infer_spreadsheet(path, file, options, dialect, guard),
    }
}

#[cfg(feature = "excel")]
fn infer_spreadsheet(
    path: &Path,
    file: &FileOptions,
    options: &InferOptions,
    dialect: Option<&Dialect>,
    guard: MemoryGuard,
) -> Result<InferenceResult> {
    use crate::source::{SheetSelector, SheetSource};

    let selector = file
        .sheet
        .as_deref()
        .map(SheetSelector::parse)
        .unwrap_or(SheetSelector::First);
    let mut source =
        SheetSource::open(path, &selector, options.has_header)?.with_memory_guard(guard);
    infer_schema(&mut source, options, dialect)
        .with_context(|| format!("Inferring schema from {path:?}"))
}

#[cfg(not(feature = "excel"))]
fn infer_spreadsheet(
    path: &Path,
    _file: &FileOptions,
    _options: &InferOptions,
    _dialect: Option<&Dialect>,
    _guard: MemoryGuard,
) -> Result<InferenceResult> {
    bail!("Reading {path:?} requires the `excel` feature")
}

/// Snake-cased identifier derived from a logical name, or
/// [`FALLBACK_TABLE_NAME`] when nothing usable remains.
pub fn derive_table_name(logical_name: Option<&str>) -> String {
    let Some(name) = logical_name else {
        return FALLBACK_TABLE_NAME.to_string();
    };
    let snake = name.to_snake_case();
    let sanitized = snake
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>();
    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() {
        return FALLBACK_TABLE_NAME.to_string();
    }
    if trimmed.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("t_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn sample_limit_label(sample_size: usize) -> String {
    if sample_size == 0 {
        "all".to_string()
    } else {
        sample_size.to_string()
    }
}
