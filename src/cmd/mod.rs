pub mod parse;
pub mod qa;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::ad::CampaignHierarchy;
use crate::domain::error::IngestError;
use crate::engine::ingest;

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

impl CommandResponse {
    pub(crate) fn ok(exit_code: i32, payload: Value) -> Self {
        Self { exit_code, payload }
    }

    pub(crate) fn from_error(error: CommandError) -> Self {
        match error {
            CommandError::InputUsage { message, details } => {
                let mut payload = json!({
                    "error": "input_usage_error",
                    "message": message,
                });
                if let Some(details) = details {
                    payload["details"] = details;
                }
                Self {
                    exit_code: 3,
                    payload,
                }
            }
            CommandError::Internal(message) => Self {
                exit_code: 1,
                payload: json!({
                    "error": "internal_error",
                    "message": message,
                }),
            },
        }
    }
}

pub(crate) enum CommandError {
    InputUsage {
        message: String,
        details: Option<Value>,
    },
    Internal(String),
}

impl CommandError {
    pub(crate) fn input_usage(message: impl Into<String>) -> Self {
        Self::InputUsage {
            message: message.into(),
            details: None,
        }
    }
}

impl From<IngestError> for CommandError {
    fn from(error: IngestError) -> Self {
        Self::input_usage(error.to_string())
    }
}

/// Ingests the ad export from `input` when given, otherwise from `stdin`.
pub(crate) fn ingest_export<R: Read>(
    input: Option<&Path>,
    stdin: R,
    filter: Option<&str>,
) -> Result<CampaignHierarchy, CommandError> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                CommandError::input_usage(format!(
                    "failed to open input file `{}`: {err}",
                    path.display()
                ))
            })?;
            Ok(ingest::parse(file, filter)?)
        }
        None => Ok(ingest::parse(stdin, filter)?),
    }
}
