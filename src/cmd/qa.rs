use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cmd::{CommandError, CommandResponse, ingest_export};
use crate::domain::ad::Config;
use crate::domain::error::ConfigError;
use crate::domain::report::QaReport;
use crate::engine::{config, qa};
use crate::io::{self, reader};

/// Input arguments for qa command execution API.
#[derive(Debug, Clone)]
pub struct QaCommandArgs {
    pub input: Option<PathBuf>,
    pub config: PathBuf,
    /// Replaces the config's `ad_search_key` when set.
    pub ad_search_key: Option<String>,
}

pub fn run_with_stdin<R: Read>(args: &QaCommandArgs, stdin: R) -> CommandResponse {
    match execute(args, stdin) {
        Ok(report) => report_response(report),
        Err(error) => CommandResponse::from_error(error),
    }
}

fn report_response(report: QaReport) -> CommandResponse {
    let exit_code = if report.success { 0 } else { 2 };
    match serde_json::to_value(&report) {
        Ok(payload) => CommandResponse::ok(exit_code, payload),
        Err(_) => CommandResponse::from_error(CommandError::Internal(
            "failed to serialize qa report".to_string(),
        )),
    }
}

fn execute<R: Read>(args: &QaCommandArgs, stdin: R) -> Result<QaReport, CommandError> {
    let config = load_config(&args.config).map_err(map_config_error)?;
    let filter = args
        .ad_search_key
        .as_deref()
        .unwrap_or(config.ad_search_key.as_str());
    let hierarchy = ingest_export(args.input.as_deref(), stdin, Some(filter))?;
    Ok(qa::run(
        &hierarchy,
        &config.expected_values,
        &config.effective_checks(),
    ))
}

/// Loads a JSON or YAML config file and checks it against the config schema.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let format = io::resolve_config_format(path).map_err(|source| ConfigError::ResolveFormat {
        path: path.display().to_string(),
        source,
    })?;
    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let value = reader::read_document(file, format)
        .map_err(|source| ConfigError::Read { format, source })?;
    config::parse_config(&value)
}

fn map_config_error(error: ConfigError) -> CommandError {
    match error {
        ConfigError::Schema { errors } => CommandError::InputUsage {
            message: "invalid config schema".to_string(),
            details: Some(json!(errors)),
        },
        other if other.is_input_usage() => CommandError::input_usage(other.to_string()),
        other => CommandError::Internal(other.to_string()),
    }
}

pub fn pipeline_steps() -> Vec<String> {
    vec![
        "load_config".to_string(),
        "validate_config_schema".to_string(),
        "ingest_ad_export".to_string(),
        "check_ads".to_string(),
        "check_expected_placements".to_string(),
    ]
}

pub fn deterministic_guards() -> Vec<String> {
    vec![
        "header_row_dropped_unconditionally".to_string(),
        "last_row_wins_per_ad_path".to_string(),
        "failures_keyed_in_first_failure_order".to_string(),
    ]
}
