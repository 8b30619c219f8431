//! Pipeline configuration.

use std::path::PathBuf;

use shortstack_media::FrameGeometry;

/// Transcript stand-in until real speech recognition is wired in.
pub const TRANSCRIPT_PLACEHOLDER: &str = "(Whisper ASR integration pending)";

/// Configuration for one pipeline instance, passed in at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Output/scratch directory, cleared at run start and pruned at run end
    pub output_dir: PathBuf,
    /// Pre-populated directory of fallback overlay clips (read-only)
    pub fallback_dir: PathBuf,
    /// Fixed length of every output short, in seconds
    pub target_duration: f64,
    /// Fixed start offset into the primary video, in seconds
    pub main_start_offset: f64,
    /// Pane geometry for the composite (each input fills one pane)
    pub frame: FrameGeometry,
    /// Transcript handed to the summary generator
    pub transcript_placeholder: String,
    /// Groq API key; when absent the summary step is skipped
    pub groq_api_key: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            fallback_dir: PathBuf::from("overlay_videos"),
            target_duration: 30.0,
            main_start_offset: 5.0,
            frame: FrameGeometry::default(),
            transcript_placeholder: TRANSCRIPT_PLACEHOLDER.to_string(),
            groq_api_key: None,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            output_dir: std::env::var("SHORTSTACK_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            fallback_dir: std::env::var("SHORTSTACK_FALLBACK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.fallback_dir),
            target_duration: std::env::var("SHORTSTACK_TARGET_DURATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.target_duration),
            main_start_offset: std::env::var("SHORTSTACK_MAIN_START_OFFSET")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.main_start_offset),
            frame: defaults.frame,
            transcript_placeholder: defaults.transcript_placeholder,
            groq_api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.target_duration, 30.0);
        assert_eq!(config.main_start_offset, 5.0);
        assert_eq!(config.frame.width, 720);
        assert_eq!(config.frame.height, 640);
        assert!(config.groq_api_key.is_none());
    }
}
