//! Fixed-window segment extraction.

use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaResult, Stage};

/// Re-encode a `[start, start + duration)` window of `src` into `dst`.
///
/// Output is written to a temporary sibling first and renamed onto `dst`
/// only when ffmpeg succeeds, so a failed trim never leaves a half-written
/// file claiming to be a valid segment. If the window runs past
/// end-of-stream the trim clips to the available footage.
///
/// # Errors
///
/// Returns [`crate::MediaError::ToolFailed`] with stage `Trim` and
/// ffmpeg's stderr on non-zero exit (start offset beyond end-of-stream,
/// unsupported input format, codec failure).
pub async fn trim_segment(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    start: f64,
    duration: f64,
) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    info!(
        "Trimming segment: {} -> {} (start: {:.2}s, duration: {:.2}s)",
        src.display(),
        dst.display(),
        start,
        duration
    );

    let tmp = dst.with_extension("tmp.mp4");

    let cmd = FfmpegCommand::new(src, &tmp)
        .seek(start)
        .duration(duration)
        .video_codec("libx264")
        .audio_codec("aac");

    let result = FfmpegRunner::new(Stage::Trim).run(&cmd).await;

    match result {
        Ok(()) => {
            fs::rename(&tmp, dst).await?;
            info!("Segment trimmed: {}", dst.display());
            Ok(())
        }
        Err(e) => {
            // Best effort; the temp file may not exist at all
            let _ = fs::remove_file(&tmp).await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_failed_trim_leaves_no_partial_output() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("missing.mp4");
        let dst = dir.path().join("segment.mp4");

        // Source does not exist, so ffmpeg (if present) exits non-zero; when
        // ffmpeg itself is missing the tool-not-found error is fine too.
        let result = trim_segment(&src, &dst, 0.0, 10.0).await;
        assert!(result.is_err());
        assert!(!dst.exists());
        assert!(!dst.with_extension("tmp.mp4").exists());
    }
}
