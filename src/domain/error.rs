use serde::Serialize;
use thiserror::Error;

use crate::io::{Format, IoError};

/// Errors produced while turning exported CSV rows into a campaign hierarchy.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input stream could not be read to the end.
    #[error("failed to read ad export: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// A record was not valid UTF-8 or violated CSV framing.
    #[error("failed to decode ad export: {source}")]
    Decode {
        #[source]
        source: csv::Error,
    },

    /// Input held no rows, so there was not even a header to drop.
    #[error("ad export is empty; expected a header row")]
    MissingHeader,

    /// A data row carried fewer than the required columns.
    #[error("ad export row at line {line} has {found} fields; expected at least {expected}")]
    ShortRow {
        line: u64,
        found: usize,
        expected: usize,
    },
}

/// Field-level configuration problem reported before any check runs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigFieldError {
    pub path: String,
    pub message: String,
}

/// Errors produced while loading the QA configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be opened.
    #[error("failed to open config file `{path}`: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config format could not be resolved from the file extension.
    #[error("unable to resolve config format from `{path}`: {source}")]
    ResolveFormat {
        path: String,
        #[source]
        source: IoError,
    },

    /// Config could not be parsed in the declared format.
    #[error("failed to read {format} config: {source}")]
    Read {
        format: Format,
        #[source]
        source: IoError,
    },

    /// Config parsed but violates the config schema.
    #[error("invalid config: {} field error(s)", .errors.len())]
    Schema { errors: Vec<ConfigFieldError> },

    /// Embedded config schema failed to compile.
    #[error("config schema is invalid: {0}")]
    SchemaDefinition(String),
}

impl ConfigError {
    pub fn is_input_usage(&self) -> bool {
        !matches!(self, Self::SchemaDefinition(_))
    }
}
