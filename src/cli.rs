use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};

use crate::utils::printable_separator;
use crate::{ConversionRequest, DEFAULT_SEPARATOR, DEFAULT_TABLE_NAME, InferenceMode, convert};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert a delimited text table into a CREATE TABLE + INSERT sql script",
    after_help = "Example input:\n  studentID,name,age,hometown\n  1803234,Jim Jones,26,New York\n  1803424,Sara Carrey,55,Chicago"
)]
pub struct Cli {
    /// Delimited text file to convert
    #[arg(default_value = "File.csv")]
    pub input: PathBuf,
    /// Name of the sql table, also used for the output file name
    #[arg(short, long, default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
    /// Separator between values (use 'tab' for a tab character)
    #[arg(short, long, default_value = DEFAULT_SEPARATOR, value_parser = parse_separator)]
    pub separator: String,
    /// Ask for the table name and separator on stdin
    #[arg(short, long)]
    pub prompt: bool,
    /// Directory receiving <table-name>.sql
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Print the script to stdout instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,
    /// Infer column types from every row instead of the first one
    #[arg(long)]
    pub full_scan: bool,
    /// Double single quotes inside text values
    #[arg(long)]
    pub escape_quotes: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn parse_separator(value: &str) -> Result<String, String> {
    match value {
        "" => Err("separator must not be empty".to_string()),
        "tab" | "\\t" => Ok("\t".to_string()),
        other => Ok(other.to_string()),
    }
}

pub fn execute(cli: &Cli) -> Result<()> {
    info!("Reading file: {}", cli.input.display());
    if !cli.input.is_file() {
        bail!("File does not exist: {}", cli.input.display());
    }

    let request = if cli.prompt {
        let stdin = io::stdin();
        prompt_request(cli, &mut stdin.lock(), &mut io::stderr())?
    } else {
        build_request(cli, cli.table_name.clone(), cli.separator.clone())
    };
    debug!("Conversion request: {request:?}");

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("Reading {:?}", cli.input))?;
    info!(
        "Converting to SQL with separator '{}'",
        printable_separator(&request.separator)
    );
    let script = convert(&text, &request)
        .with_context(|| format!("Converting {:?}", cli.input))?;

    if cli.stdout {
        let mut out = io::stdout().lock();
        writeln!(out, "{script}").context("Writing script to stdout")?;
        return Ok(());
    }

    let path = output_path(&cli.output_dir, &request.table_name);
    fs::write(&path, script.as_str()).with_context(|| format!("Writing script to {path:?}"))?;
    info!(
        "Conversion ready: {} insert statement(s) written to {}",
        script.insert_count(),
        path.display()
    );
    Ok(())
}

pub fn output_path(dir: &Path, table_name: &str) -> PathBuf {
    dir.join(format!("{table_name}.sql"))
}

fn build_request(cli: &Cli, table_name: String, separator: String) -> ConversionRequest {
    let mode = if cli.full_scan {
        InferenceMode::FullScan
    } else {
        InferenceMode::FirstRow
    };
    ConversionRequest::new(table_name, separator)
        .with_mode(mode)
        .with_escape_quotes(cli.escape_quotes)
}

/// asks for the table name then the separator. an empty answer keeps the
/// value supplied on the command line.
pub fn prompt_request<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> Result<ConversionRequest> {
    let table_name = prompt_with_default(input, output, "Give table name", &cli.table_name)?;
    let separator = prompt_with_default(
        input,
        output,
        "Give value separator",
        &printable_separator(&cli.separator),
    )?;
    let separator = if separator.is_empty() {
        cli.separator.clone()
    } else {
        parse_separator(&separator).map_err(anyhow::Error::msg)?
    };
    let table_name = if table_name.is_empty() {
        cli.table_name.clone()
    } else {
        table_name
    };
    Ok(build_request(cli, table_name, separator))
}

// returns the answer without its line terminator; empty when the user just
// pressed enter or stdin is closed.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: &str,
) -> Result<String> {
    writeln!(output, "{question}: (default = '{default}')").context("Writing prompt")?;
    output.flush().context("Writing prompt")?;
    let mut answer = String::new();
    input.read_line(&mut answer).context("Reading answer from stdin")?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}
