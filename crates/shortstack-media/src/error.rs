//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Pipeline stage that invoked the failing external process.
///
/// Carried inside [`MediaError::ToolFailed`] so callers can branch on the
/// stage without parsing diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Probe,
    Trim,
    Compose,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Probe => "probe",
            Stage::Trim => "trim",
            Stage::Compose => "compose",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while assembling a short.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("{stage} step failed: {stderr}")]
    ToolFailed {
        stage: Stage,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a tagged external-tool failure.
    pub fn tool_failed(stage: Stage, exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::ToolFailed {
            stage,
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Stage tag for tool failures, if this error carries one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::ToolFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failed_carries_stage() {
        let err = MediaError::tool_failed(Stage::Trim, Some(1), "boom");
        assert_eq!(err.stage(), Some(Stage::Trim));
        assert!(err.to_string().contains("trim"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_non_tool_errors_have_no_stage() {
        assert_eq!(MediaError::FfmpegNotFound.stage(), None);
        assert_eq!(
            MediaError::download_failed("nope").stage(),
            None
        );
    }
}
