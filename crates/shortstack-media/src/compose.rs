//! Vertical stacking of two trimmed clips.

use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaResult, Stage};
use crate::filters::build_stack_filter;

/// Target pane geometry for the composite. Each input fills one pane, so
/// the output frame is `width` x `2 * height`.
#[derive(Debug, Clone, Copy)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self {
            width: 720,
            height: 640,
        }
    }
}

/// Stack `top` above `bottom` into a single composite at `dst`.
///
/// The audio track is taken from the top input when present (`0:a?`), so
/// composition does not fail on a silent top clip. Output goes through a
/// temporary sibling and is renamed into place only on success.
///
/// # Errors
///
/// Returns [`crate::MediaError::ToolFailed`] with stage `Compose` and
/// ffmpeg's stderr on non-zero exit (mismatched or corrupt inputs, filter
/// graph errors).
pub async fn stack_videos(
    top: impl AsRef<Path>,
    bottom: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    frame: FrameGeometry,
) -> MediaResult<()> {
    let top = top.as_ref();
    let bottom = bottom.as_ref();
    let dst = dst.as_ref();

    info!(
        "Composing: {} over {} -> {}",
        top.display(),
        bottom.display(),
        dst.display()
    );

    let tmp = dst.with_extension("tmp.mp4");

    let cmd = FfmpegCommand::new(top, &tmp)
        .extra_input(bottom)
        .filter_complex(build_stack_filter(frame.width, frame.height))
        .map("[v]")
        .map("0:a?")
        .video_codec("libx264")
        .audio_codec("aac");

    match FfmpegRunner::new(Stage::Compose).run(&cmd).await {
        Ok(()) => {
            fs::rename(&tmp, dst).await?;
            info!("Composite written: {}", dst.display());
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp).await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_geometry() {
        let frame = FrameGeometry::default();
        assert_eq!(frame.width, 720);
        assert_eq!(frame.height, 640);
    }
}
