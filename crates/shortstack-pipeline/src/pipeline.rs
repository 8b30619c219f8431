//! One-run orchestration: fetch, trim, stack, clean up.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use shortstack_media::{duration_or_zero, fetch_video, probe_video, stack_videos, trim_segment};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::rng::{choose_overlay_start, RandomSource, ThreadRandom};
use crate::summary::SummaryClient;
use crate::workdir::{clear_dir, prune_dir_except};

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Primary video URL
    pub main_url: String,
    /// Optional overlay URL; when absent a fallback clip is picked at random
    pub overlay_url: Option<String>,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The composite short, the only file left in the output directory
    pub composite: PathBuf,
    /// Display-only script summary; `None` when the step was skipped or
    /// failed (it is never load-bearing)
    pub summary: Option<String>,
}

/// Sequential, single-run pipeline.
///
/// Stages run strictly in order since each consumes the file output of the
/// previous one. The output directory is a shared resource: callers must
/// not start a second run against the same directory while one is active.
pub struct ShortPipeline {
    config: PipelineConfig,
    summary: Option<SummaryClient>,
    rng: Box<dyn RandomSource>,
}

impl ShortPipeline {
    /// Build a pipeline from configuration. A summary client is created
    /// only when an API key is configured.
    pub fn new(config: PipelineConfig) -> Self {
        let summary = config
            .groq_api_key
            .as_deref()
            .map(SummaryClient::new);
        Self {
            config,
            summary,
            rng: Box::new(ThreadRandom),
        }
    }

    /// Replace the random source (used by tests to pin selections).
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for one request.
    pub async fn run(&mut self, request: &GenerateRequest) -> PipelineResult<RunOutput> {
        let out = &self.config.output_dir;

        info!("Clearing previous outputs in {}", out.display());
        clear_dir(out).await?;

        // Acquire main
        let main_path = out.join("main.mp4");
        info!("Fetching main video");
        fetch_video(&request.main_url, &main_path).await?;

        // Acquire overlay
        let overlay_src = match &request.overlay_url {
            Some(url) => {
                let path = out.join("overlay_src.mp4");
                info!("Fetching overlay video");
                fetch_video(url, &path).await?;
                path
            }
            None => {
                let path =
                    select_fallback_overlay(&self.config.fallback_dir, self.rng.as_mut()).await?;
                info!("Using fallback overlay: {}", path.display());
                path
            }
        };

        // Summarize (display-only, never aborts the run)
        let summary = self.summarize().await;

        // Trim main at the fixed offset
        let main_trim = out.join("main_trim.mp4");
        trim_segment(
            &main_path,
            &main_trim,
            self.config.main_start_offset,
            self.config.target_duration,
        )
        .await?;

        // Trim overlay at a random offset within its duration
        let overlay_duration = duration_or_zero(&overlay_src).await;
        let overlay_start = choose_overlay_start(
            overlay_duration,
            self.config.target_duration,
            self.rng.as_mut(),
        );
        info!(
            "Trimming overlay (duration: {:.2}s, random start: {:.2}s)",
            overlay_duration, overlay_start
        );
        let overlay_trim = out.join("overlay_trim.mp4");
        trim_segment(
            &overlay_src,
            &overlay_trim,
            overlay_start,
            self.config.target_duration,
        )
        .await?;

        // Compose
        let composite = out.join("short_final.mp4");
        stack_videos(&main_trim, &overlay_trim, &composite, self.config.frame).await?;

        // Keep only the final artifact
        info!("Cleaning intermediate files");
        prune_dir_except(out, &composite).await?;

        match probe_video(&composite).await {
            Ok(info) => info!(
                "Short ready: {} ({:.2}s, {}x{})",
                composite.display(),
                info.duration,
                info.width,
                info.height
            ),
            Err(e) => debug!("Could not probe final composite: {}", e),
        }

        Ok(RunOutput { composite, summary })
    }

    async fn summarize(&self) -> Option<String> {
        let client = match &self.summary {
            Some(client) => client,
            None => {
                debug!("No Groq API key configured, skipping summary");
                return None;
            }
        };
        info!("Generating script summary");
        match client
            .generate_short_script(&self.config.transcript_placeholder)
            .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Summary generation failed, continuing without it: {}", e);
                None
            }
        }
    }
}

/// Pick one `.mp4` uniformly at random from the fallback directory.
///
/// Candidates are sorted by name before the draw so a pinned random source
/// selects deterministically. A missing or empty directory is the expected
/// "no overlay available" state, not an IO failure.
pub async fn select_fallback_overlay(
    dir: &Path,
    rng: &mut dyn RandomSource,
) -> PipelineResult<PathBuf> {
    let mut candidates = Vec::new();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PipelineError::NoOverlayAvailable)
        }
        Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension() == Some(std::ffi::OsStr::new("mp4"))
            && entry.file_type().await?.is_file()
        {
            candidates.push(path);
        }
    }

    if candidates.is_empty() {
        return Err(PipelineError::NoOverlayAvailable);
    }

    candidates.sort();
    let index = rng.pick_index(candidates.len());
    Ok(candidates.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::test_support::FixedRandom;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fallback_empty_dir_is_no_overlay() {
        let dir = TempDir::new().unwrap();
        let mut rng = FixedRandom {
            index: 0,
            offset: 0.0,
        };
        let err = select_fallback_overlay(dir.path(), &mut rng)
            .await
            .unwrap_err();
        assert!(err.is_no_overlay());
    }

    #[tokio::test]
    async fn test_fallback_missing_dir_is_no_overlay() {
        let mut rng = FixedRandom {
            index: 0,
            offset: 0.0,
        };
        let err = select_fallback_overlay(Path::new("/nonexistent/overlays"), &mut rng)
            .await
            .unwrap_err();
        assert!(err.is_no_overlay());
    }

    #[tokio::test]
    async fn test_fallback_ignores_non_mp4() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), b"x")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("clip.mkv"), b"x")
            .await
            .unwrap();
        let mut rng = FixedRandom {
            index: 0,
            offset: 0.0,
        };
        let err = select_fallback_overlay(dir.path(), &mut rng)
            .await
            .unwrap_err();
        assert!(err.is_no_overlay());
    }

    #[tokio::test]
    async fn test_fallback_pinned_selection() {
        let dir = TempDir::new().unwrap();
        for name in ["a.mp4", "b.mp4", "c.mp4"] {
            tokio::fs::write(dir.path().join(name), b"x").await.unwrap();
        }
        let mut rng = FixedRandom {
            index: 1,
            offset: 0.0,
        };
        let picked = select_fallback_overlay(dir.path(), &mut rng).await.unwrap();
        assert_eq!(picked.file_name().unwrap(), "b.mp4");
    }

    #[test]
    fn test_pipeline_without_key_has_no_summary_client() {
        let pipeline = ShortPipeline::new(PipelineConfig::default());
        assert!(pipeline.summary.is_none());
    }
}
