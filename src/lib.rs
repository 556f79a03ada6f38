use std::{env, sync::OnceLock};

use log::{LevelFilter, info};

pub mod cli;
pub mod error;
mod sql_generator;
mod table_parser;
mod type_inference;
mod utils;

pub use error::ConvertError;
pub use sql_generator::{EmitOptions, SqlScript, generate_sql};
pub use table_parser::{Table, parse_table, read_table};
pub use type_inference::{
    ColumnType, InferenceMode, UnknownSqlType, infer_column_type, infer_column_type_strict,
    infer_schema, infer_schema_with,
};

pub const DEFAULT_TABLE_NAME: &str = "NewTable";
pub const DEFAULT_SEPARATOR: &str = ",";

/// table identifier and separator for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub table_name: String,
    pub separator: String,
    pub mode: InferenceMode,
    pub escape_quotes: bool,
}

impl ConversionRequest {
    pub fn new(table_name: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            separator: separator.into(),
            mode: InferenceMode::default(),
            escape_quotes: false,
        }
    }

    pub fn with_mode(mut self, mode: InferenceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_escape_quotes(mut self, escape_quotes: bool) -> Self {
        self.escape_quotes = escape_quotes;
        self
    }
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_NAME, DEFAULT_SEPARATOR)
    }
}

/// runs the whole pipeline: parse, infer, emit. nothing is returned unless
/// every step succeeds.
pub fn convert(text: &str, request: &ConversionRequest) -> Result<SqlScript, ConvertError> {
    let table = parse_table(text, &request.separator)?;
    let types = infer_schema_with(&table, request.mode)?;
    let options = EmitOptions {
        escape_quotes: request.escape_quotes,
    };
    let script = generate_sql(&request.table_name, &table, &types, &options)?;
    info!(
        "Converted {} column(s) and {} row(s) into table '{}'",
        table.column_count(),
        script.insert_count(),
        request.table_name
    );
    Ok(script)
}

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_sql_convert", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> anyhow::Result<()> {
    init_logging();
    cli::execute(&cli::parse_args())
}
