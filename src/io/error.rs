use thiserror::Error;

use crate::io::Format;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported {kind} file extension: {path}")]
    UnsupportedPathExtension { kind: &'static str, path: String },

    #[error("{format} cannot hold a single configuration document")]
    UnsupportedDocumentFormat { format: Format },

    #[error("json parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("yaml parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
