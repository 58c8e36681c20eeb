use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{engine::DEFAULT_SAMPLE_SIZE, memory::DEFAULT_MIN_FREE_MEMORY_MB};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Infer SQL column types from sample data and generate CREATE TABLE statements",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sample a file and print the inferred CREATE TABLE statement
    Ddl(DdlArgs),
    /// Sample a file and report the per-column type evidence
    Probe(ProbeArgs),
    /// List the built-in SQL dialects
    Dialects,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input CSV or spreadsheet file ('-' reads CSV from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Worksheet name or zero-based index (spreadsheets only)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Number of rows to sample when inferring types (0 or negative means full scan)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE as i64, allow_negative_numbers = true)]
    pub sample_rows: i64,
    /// Treat the first row as data and name columns column_1..column_N
    #[arg(long = "no-header")]
    pub no_header: bool,
    /// Declare every column as a character type
    #[arg(long = "always-varchar")]
    pub always_varchar: bool,
    /// chrono pattern for date values, e.g. %d.%m.%Y
    #[arg(long = "date-format")]
    pub date_format: Option<String>,
    /// chrono pattern for timestamp values, e.g. %d.%m.%Y %H:%M
    #[arg(long = "timestamp-format")]
    pub timestamp_format: Option<String>,
    /// Decimal separator used by numeric values ('.' or ',')
    #[arg(long = "decimal-char", default_value_t = '.')]
    pub decimal_char: char,
    /// Stop sampling when available memory drops below this many MiB (0 disables)
    #[arg(long = "min-free-memory-mb", default_value_t = DEFAULT_MIN_FREE_MEMORY_MB)]
    pub min_free_memory_mb: u64,
}

impl InputArgs {
    /// Row cap for sampling; any value below 1 lifts the cap.
    pub fn sample_size(&self) -> usize {
        usize::try_from(self.sample_rows).unwrap_or(0)
    }
}

#[derive(Debug, Args)]
pub struct DialectArgs {
    /// Built-in dialect id (see `dialects`)
    #[arg(long, conflicts_with = "dialect_file")]
    pub dialect: Option<String>,
    /// YAML dialect profile describing quoting, type names and reserved words
    #[arg(long = "dialect-file")]
    pub dialect_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DdlArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub dialect: DialectArgs,
    /// Table name (derived from the file name when omitted)
    #[arg(long)]
    pub table: Option<String>,
    /// Write the statement to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub dialect: DialectArgs,
    /// Table name (derived from the file name when omitted)
    #[arg(long)]
    pub table: Option<String>,
    /// Report format
    #[arg(long, value_enum, default_value = "table")]
    pub format: ReportFormat,
    /// Write the report to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
    Yaml,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_aliases() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("pipe"), Ok(b'|'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn ddl_defaults() {
        let cli = Cli::try_parse_from(["infer-ddl", "ddl", "-i", "data.csv"]).unwrap();
        let Commands::Ddl(args) = cli.command else {
            panic!("expected ddl command");
        };
        assert_eq!(args.input.sample_size(), DEFAULT_SAMPLE_SIZE);
        assert_eq!(args.input.decimal_char, '.');
        assert!(!args.input.no_header);
        assert!(args.dialect.dialect.is_none());
    }

    #[test]
    fn negative_sample_rows_means_full_scan() {
        let cli = Cli::try_parse_from([
            "infer-ddl",
            "probe",
            "-i",
            "data.csv",
            "--sample-rows",
            "-1",
        ])
        .unwrap();
        let Commands::Probe(args) = cli.command else {
            panic!("expected probe command");
        };
        assert_eq!(args.input.sample_rows, -1);
        assert_eq!(args.input.sample_size(), 0);
    }

    #[test]
    fn dialect_and_profile_conflict() {
        let parsed = Cli::try_parse_from([
            "infer-ddl",
            "ddl",
            "-i",
            "data.csv",
            "--dialect",
            "postgres",
            "--dialect-file",
            "custom.yaml",
        ]);
        assert!(parsed.is_err());
    }
}
