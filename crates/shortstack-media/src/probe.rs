//! FFprobe duration and stream inspection.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::warn;

use crate::error::{MediaError, MediaResult, Stage};

/// Basic facts about a video file.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
}

/// Read the duration of the first video stream, in seconds.
///
/// Invokes ffprobe so that it prints a single bare numeric value.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::tool_failed(
            Stage::Probe,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
}

/// Duration in seconds, or `0.0` when the file cannot be probed.
///
/// `0.0` means "duration unknown", not "zero-length video"; callers must
/// tolerate it.
pub async fn duration_or_zero(path: impl AsRef<Path>) -> f64 {
    let path = path.as_ref();
    match probe_duration(path).await {
        Ok(duration) => duration,
        Err(e) => {
            warn!(
                path = %path.display(),
                "Probe failed, treating duration as unknown: {}", e
            );
            0.0
        }
    }
}

/// Probe a video file for duration and frame dimensions.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::tool_failed(
            Stage::Probe,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    parse_video_info(probe)
}

fn parse_duration_output(stdout: &str) -> MediaResult<f64> {
    let trimmed = stdout.trim();
    let duration: f64 = trimmed
        .parse()
        .map_err(|_| MediaError::InvalidVideo(format!("non-numeric duration: {trimmed:?}")))?;
    if duration < 0.0 {
        return Err(MediaError::InvalidVideo(format!(
            "negative duration: {duration}"
        )));
    }
    Ok(duration)
}

fn parse_video_info(probe: FfprobeOutput) -> MediaResult<VideoInfo> {
    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::InvalidVideo("No video stream found".to_string()))?;

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(VideoInfo {
        duration,
        width: video_stream.width.unwrap_or(0),
        height: video_stream.height.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_output() {
        assert!((parse_duration_output("59.94\n").unwrap() - 59.94).abs() < 0.001);
        assert!((parse_duration_output("0").unwrap()).abs() < 0.001);
        assert!(parse_duration_output("N/A").is_err());
        assert!(parse_duration_output("").is_err());
        assert!(parse_duration_output("-1.0").is_err());
    }

    #[test]
    fn test_parse_video_info() {
        let json = r#"{
            "format": { "duration": "30.02" },
            "streams": [
                { "codec_type": "audio" },
                { "codec_type": "video", "width": 720, "height": 1280 }
            ]
        }"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        let info = parse_video_info(probe).unwrap();
        assert!((info.duration - 30.02).abs() < 0.001);
        assert_eq!(info.width, 720);
        assert_eq!(info.height, 1280);
    }

    #[test]
    fn test_parse_video_info_no_video_stream() {
        let json = r#"{ "format": {}, "streams": [{ "codec_type": "audio" }] }"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert!(parse_video_info(probe).is_err());
    }

    #[tokio::test]
    async fn test_duration_or_zero_missing_file() {
        let duration = duration_or_zero("/nonexistent/video.mp4").await;
        assert_eq!(duration, 0.0);
    }
}
