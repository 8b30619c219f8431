//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Expected empty-state: no overlay URL was given and the fallback
    /// directory holds no usable clip. Not a processing failure.
    #[error("No overlay video available: provide an overlay URL or add .mp4 files to the fallback folder")]
    NoOverlayAvailable,

    #[error("Media error: {0}")]
    Media(#[from] shortstack_media::MediaError),

    #[error("Summary generation failed: {0}")]
    Summary(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn summary(msg: impl Into<String>) -> Self {
        Self::Summary(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for the "no overlay available" empty-state, which the surface
    /// layer reports as user guidance rather than a generic failure.
    pub fn is_no_overlay(&self) -> bool {
        matches!(self, Self::NoOverlayAvailable)
    }
}
