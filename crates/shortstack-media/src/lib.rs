#![deny(unreachable_patterns)]
//! FFmpeg / yt-dlp CLI wrappers for short-video assembly.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building and running
//! - Duration and stream probing via ffprobe
//! - Bounded-resolution downloads via yt-dlp
//! - Fixed-window segment trimming with atomic output
//! - Vertical two-clip stacking with a fixed filter graph

pub mod command;
pub mod compose;
pub mod download;
pub mod error;
pub mod filters;
pub mod probe;
pub mod trim;

pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, FfmpegRunner};
pub use compose::{stack_videos, FrameGeometry};
pub use download::fetch_video;
pub use error::{MediaError, MediaResult, Stage};
pub use probe::{duration_or_zero, probe_duration, probe_video, VideoInfo};
pub use trim::trim_segment;
