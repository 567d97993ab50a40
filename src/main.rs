use std::io;
use std::path::PathBuf;
use std::process;

use adqa::cmd::{CommandResponse, parse, qa};
use adqa::domain::report::{PipelineInput, PipelineInputSource, PipelineReport};
use adqa::io::{self as adqa_io, Format};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ADQA_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "adqa",
    version,
    about = "Deterministic QA checks for ad campaign exports"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    emit_pipeline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check an ad export against an expected configuration.
    Qa(QaArgs),
    /// Print the campaign hierarchy built from an ad export.
    Parse(ParseArgs),
}

#[derive(Debug, clap::Args)]
struct QaArgs {
    #[arg(long)]
    config: PathBuf,

    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    ad_search_key: Option<String>,
}

#[derive(Debug, clap::Args)]
struct ParseArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    filter: Option<String>,
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    init_tracing();
    process::exit(run());
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    let emit_pipeline = cli.emit_pipeline;
    match cli.command {
        Commands::Qa(args) => run_qa(args, emit_pipeline),
        Commands::Parse(args) => run_parse(args, emit_pipeline),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_qa(args: QaArgs, emit_pipeline: bool) -> i32 {
    let command_args = qa::QaCommandArgs {
        input: args.input.clone(),
        config: args.config.clone(),
        ad_search_key: args.ad_search_key.clone(),
    };
    let stdin = io::stdin();
    let response = qa::run_with_stdin(&command_args, stdin.lock());
    let exit_code = emit_response("qa", &response);

    if emit_pipeline {
        let config_format = adqa_io::resolve_config_format(&args.config).ok();
        let sources = vec![
            PipelineInputSource::path(
                "config",
                args.config.display().to_string(),
                config_format.map(Format::as_str),
            ),
            export_source(args.input.as_ref()),
        ];
        emit_pipeline_report(&PipelineReport::new(
            "qa",
            PipelineInput::new(sources),
            qa::pipeline_steps(),
            qa::deterministic_guards(),
        ));
    }
    exit_code
}

fn run_parse(args: ParseArgs, emit_pipeline: bool) -> i32 {
    let command_args = parse::ParseCommandArgs {
        input: args.input.clone(),
        filter: args.filter.clone(),
    };
    let stdin = io::stdin();
    let response = parse::run_with_stdin(&command_args, stdin.lock());
    let exit_code = emit_response("parse", &response);

    if emit_pipeline {
        emit_pipeline_report(&PipelineReport::new(
            "parse",
            PipelineInput::new(vec![export_source(args.input.as_ref())]),
            parse::pipeline_steps(),
            parse::deterministic_guards(),
        ));
    }
    exit_code
}

fn export_source(input: Option<&PathBuf>) -> PipelineInputSource {
    match input {
        Some(path) => PipelineInputSource::path(
            "input",
            path.display().to_string(),
            Some(Format::Csv.as_str()),
        ),
        None => PipelineInputSource::stdin("input", Some(Format::Csv.as_str())),
    }
}

/// Reports go to stdout; usage and internal errors go to stderr.
fn emit_response(command: &str, response: &CommandResponse) -> i32 {
    let Ok(serialized) = serde_json::to_string(&response.payload) else {
        emit_error(
            "internal_error",
            format!("failed to serialize {command} response"),
            json!({"command": command}),
            1,
        );
        return 1;
    };
    match response.exit_code {
        0 | 2 => println!("{serialized}"),
        1 | 3 => eprintln!("{serialized}"),
        other => {
            emit_error(
                "internal_error",
                format!("unexpected {command} exit code: {other}"),
                json!({"command": command}),
                1,
            );
            return 1;
        }
    }
    response.exit_code
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => emit_error(
            "internal_error",
            format!("failed to serialize pipeline report: {error}"),
            json!({"command": "emit_pipeline"}),
            1,
        ),
    }
}

fn emit_error(error: &'static str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
