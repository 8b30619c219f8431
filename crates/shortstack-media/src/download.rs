//! Video download using yt-dlp.
//!
//! The format filter caps resolution at 720p so we never pull down an
//! arbitrarily large source file just to trim 30 seconds out of it.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Format selector passed to yt-dlp: mp4, capped at 720 pixels tall.
pub const FORMAT_FILTER: &str = "mp4[height<=720]";

/// Download a video from a URL to a local path using yt-dlp.
///
/// # Arguments
///
/// * `url` - Video URL (YouTube, Vimeo, etc.)
/// * `output_path` - Path to save the downloaded video
///
/// # Errors
///
/// Returns [`MediaError::YtDlpNotFound`] when the tool is missing and
/// [`MediaError::DownloadFailed`] when yt-dlp cannot resolve or retrieve
/// the URL, or exits cleanly without producing the output file.
pub async fn fetch_video(url: &str, output_path: impl AsRef<Path>) -> MediaResult<()> {
    let output_path = output_path.as_ref();

    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;

    info!(
        "Downloading video from {} to {}",
        url,
        output_path.display()
    );

    let output_path_str = output_path.to_string_lossy();
    let output = Command::new("yt-dlp")
        .args(["-f", FORMAT_FILTER, "-o", &output_path_str, url])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);
        let error_msg = stderr.lines().last().unwrap_or("Unknown error");
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed: {}",
            error_msg
        )));
    }

    if !output_path.exists() {
        return Err(MediaError::download_failed("Output file not created"));
    }

    let file_size = output_path.metadata()?.len();
    info!(
        output = %output_path.display(),
        size_mb = file_size as f64 / (1024.0 * 1024.0),
        "Downloaded video successfully"
    );

    Ok(())
}
