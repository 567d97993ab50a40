pub mod error;
pub mod format;
pub mod reader;

use std::fmt;
use std::path::Path;

pub use error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Csv,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a config document format from its file extension.
pub fn resolve_config_format(config: &Path) -> Result<Format, IoError> {
    match format_from_path(config) {
        Some(Format::Csv) => Err(IoError::UnsupportedDocumentFormat {
            format: Format::Csv,
        }),
        Some(format) => Ok(format),
        None => Err(IoError::UnsupportedPathExtension {
            kind: "config",
            path: config.to_string_lossy().into_owned(),
        }),
    }
}

fn format_from_path(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        "csv" => Some(Format::Csv),
        _ => None,
    }
}
