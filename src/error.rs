use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing video file argument")]
    Usage,

    #[error("file does not exist: {} (searched: {})", path.display(), format_searched(searched))]
    FileNotFound {
        path: PathBuf,
        searched: Vec<PathBuf>,
    },

    #[error("unsupported file format: {0:?} (supported: {exts})", exts = supported_extensions())]
    UnsupportedFormat(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("{tool} failed ({}): {}", format_status(status), stderr.trim())]
    ExternalTool {
        tool: String,
        status: Option<ExitStatus>,
        stderr: String,
    },

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn transcription(err: impl std::fmt::Display) -> Self {
        Self::Transcription(err.to_string())
    }
}

impl From<whisper_rs::WhisperError> for Error {
    fn from(err: whisper_rs::WhisperError) -> Self {
        Self::transcription(err)
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Self::transcription(format!("unable to read audio: {err}"))
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn supported_extensions() -> String {
    crate::config::SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_status(status: &Option<ExitStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "could not be started".to_string(),
    }
}
