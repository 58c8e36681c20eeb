pub mod classifier;
pub mod cli;
pub mod col_type;
pub mod ddl;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod io_utils;
pub mod keywords;
pub mod memory;
pub mod parser;
pub mod sampler;
pub mod source;
pub mod stats;
pub mod table;
pub mod value;

use std::{env, io::Write, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands, DialectArgs, InputArgs, ReportFormat},
    col_type::ColType,
    ddl::DdlBuilder,
    dialect::{BUILTIN_DIALECTS, Dialect},
    engine::{FileOptions, InferOptions, InferenceResult},
    parser::ValueParser,
    table::TextTable,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("infer_ddl", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Ddl(args) => handle_ddl(&args),
        Commands::Probe(args) => handle_probe(&args),
        Commands::Dialects => handle_dialects(),
    }
}

fn handle_ddl(args: &cli::DdlArgs) -> Result<()> {
    let dialect = resolve_dialect(&args.dialect)?;
    let result = infer_from_args(&args.input, args.table.as_deref(), dialect.as_ref())?;
    let mut output = io_utils::open_output(args.output.as_deref())?;
    writeln!(output, "{}", result.ddl).context("Writing DDL")?;
    output.flush().context("Flushing DDL output")?;
    if let Some(path) = &args.output {
        info!("CREATE TABLE {} written to {path:?}", result.table_name);
    }
    Ok(())
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let dialect = resolve_dialect(&args.dialect)?;
    let result = infer_from_args(&args.input, args.table.as_deref(), dialect.as_ref())?;
    let rendered = match args.format {
        ReportFormat::Table => render_probe_table(&result, dialect.as_ref()),
        ReportFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&result).context("Serializing probe report")?;
            json.push('\n');
            json
        }
        ReportFormat::Yaml => serde_yaml::to_string(&result).context("Serializing probe report")?,
    };
    let mut output = io_utils::open_output(args.output.as_deref())?;
    output
        .write_all(rendered.as_bytes())
        .context("Writing probe report")?;
    output.flush().context("Flushing probe report")?;
    Ok(())
}

fn handle_dialects() -> Result<()> {
    let mut table = TextTable::new(["dialect", "quote", "max varchar", "clob"]);
    for id in BUILTIN_DIALECTS {
        let dialect = Dialect::builtin(id)?;
        let max_varchar = match dialect.unbounded_varchar() {
            Some(unbounded) => format!("unbounded ({unbounded})"),
            None => dialect.max_varchar().to_string(),
        };
        table.push_row([
            dialect.id().to_string(),
            dialect.quote_char().to_string(),
            max_varchar,
            dialect.type_names().clob.clone(),
        ]);
    }
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(table.render().as_bytes())
        .context("Writing dialect list")?;
    Ok(())
}

fn resolve_dialect(args: &DialectArgs) -> Result<Option<Dialect>> {
    if let Some(path) = &args.dialect_file {
        let dialect = Dialect::load_profile(path)?;
        debug!(
            "Loaded dialect profile '{}' with {} reserved word(s)",
            dialect.id(),
            dialect.reserved_word_count()
        );
        return Ok(Some(dialect));
    }
    args.dialect
        .as_deref()
        .map(|id| Dialect::builtin(id).map_err(anyhow::Error::from))
        .transpose()
}

fn infer_from_args(
    input: &InputArgs,
    table: Option<&str>,
    dialect: Option<&Dialect>,
) -> Result<InferenceResult> {
    let parser = ValueParser::new(
        input.date_format.as_deref(),
        input.timestamp_format.as_deref(),
        input.decimal_char,
    )?;
    let options = InferOptions {
        sample_size: input.sample_size(),
        has_header: !input.no_header,
        always_varchar: input.always_varchar,
        table_name: table.map(str::to_string),
        parser,
    };
    let file = FileOptions {
        delimiter: input.delimiter,
        encoding: io_utils::resolve_encoding(input.input_encoding.as_deref())?,
        sheet: input.sheet.clone(),
        min_free_memory_mb: input.min_free_memory_mb,
    };
    info!(
        "Sampling '{}' ({} rows max) for dialect '{}'",
        input.input.display(),
        engine::sample_limit_label(input.sample_size()),
        dialect.map(Dialect::id).unwrap_or("generic")
    );
    let result = engine::infer_file(&input.input, &file, &options, dialect)?;
    if result.decode_errors > 0 {
        info!(
            "{} field(s) could not be decoded and were treated as null",
            result.decode_errors
        );
    }
    if let Some(reason) = &result.truncated {
        info!(
            "Sample ended early after {} row(s): {reason}",
            result.rows_sampled
        );
    }
    Ok(result)
}

fn render_probe_table(result: &InferenceResult, dialect: Option<&Dialect>) -> String {
    let builder = DdlBuilder::new(dialect);
    let mut table = TextTable::new([
        "column", "type", "sql type", "size", "digits", "bigint", "observed",
    ]);
    for (column, stats) in result.columns.iter().zip(&result.statistics) {
        let observed = stats
            .observed_types()
            .into_iter()
            .map(|ty: ColType| format!("{ty}={}", stats.count(ty)))
            .join(", ");
        table.push_row([
            column.name.clone(),
            column.col_type.to_string(),
            builder.column_type(column),
            column.size.to_string(),
            column.digits.to_string(),
            if column.bigint { "yes" } else { "" }.to_string(),
            observed,
        ]);
    }
    let mut report = format!(
        "Table: {}\nRows sampled: {}\n\n{}",
        result.table_name,
        result.rows_sampled,
        table.render()
    );
    if !result.diagnostics.is_empty() {
        report.push_str("\nDiagnostics:\n");
        for line in &result.diagnostics {
            report.push_str("  ");
            report.push_str(line);
            report.push('\n');
        }
    }
    if let Some(reason) = &result.truncated {
        report.push_str(&format!("\nSample truncated: {reason}\n"));
    }
    report
}
