//! Single-run short generation orchestrator.
//!
//! Sequences fetch, probe, trim, and compose over the media wrappers and
//! owns the output-directory lifecycle (clear before, prune after). One
//! pipeline instance serves one run at a time; callers serialize runs.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod rng;
pub mod summary;
pub mod workdir;

pub use config::{PipelineConfig, TRANSCRIPT_PLACEHOLDER};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{GenerateRequest, RunOutput, ShortPipeline};
pub use rng::{choose_overlay_start, RandomSource, ThreadRandom};
pub use summary::SummaryClient;
