//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use shortstack_pipeline::{PipelineConfig, ShortPipeline};

/// Application state shared across handlers.
///
/// The pipeline sits behind a mutex because the output directory is a
/// shared scratch space: concurrent runs would race on the clear and prune
/// steps, so requests are processed one at a time.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Mutex<ShortPipeline>>,
    /// Where the finished composite lands after a successful run
    pub composite_path: PathBuf,
}

impl AppState {
    pub fn new(config: PipelineConfig) -> Self {
        let composite_path = config.output_dir.join("short_final.mp4");
        Self {
            pipeline: Arc::new(Mutex::new(ShortPipeline::new(config))),
            composite_path,
        }
    }
}
