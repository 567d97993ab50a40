use std::io::Read;
use std::path::PathBuf;

use crate::cmd::{CommandError, CommandResponse, ingest_export};

/// Input arguments for `parse` command execution API.
#[derive(Debug, Clone)]
pub struct ParseCommandArgs {
    pub input: Option<PathBuf>,
    pub filter: Option<String>,
}

/// Ingests an ad export and returns the campaign hierarchy as the payload.
pub fn run_with_stdin<R: Read>(args: &ParseCommandArgs, stdin: R) -> CommandResponse {
    let hierarchy = match ingest_export(args.input.as_deref(), stdin, args.filter.as_deref()) {
        Ok(hierarchy) => hierarchy,
        Err(error) => return CommandResponse::from_error(error),
    };
    match serde_json::to_value(&hierarchy) {
        Ok(payload) => CommandResponse::ok(0, payload),
        Err(_) => CommandResponse::from_error(CommandError::Internal(
            "failed to serialize campaign hierarchy".to_string(),
        )),
    }
}

pub fn pipeline_steps() -> Vec<String> {
    vec![
        "read_ad_export".to_string(),
        "drop_header_row".to_string(),
        "filter_ad_names".to_string(),
        "build_campaign_hierarchy".to_string(),
    ]
}

pub fn deterministic_guards() -> Vec<String> {
    vec![
        "header_row_dropped_unconditionally".to_string(),
        "last_row_wins_per_ad_path".to_string(),
        "hierarchy_keys_in_row_order".to_string(),
    ]
}
