//! Axum API server binary.

use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shortstack_api::{create_router, ApiConfig, AppState};
use shortstack_pipeline::PipelineConfig;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("shortstack=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting shortstack-api");

    // Required external tools; missing ones are fatal at startup
    for check in [
        shortstack_media::check_ffmpeg(),
        shortstack_media::check_ffprobe(),
        shortstack_media::check_ytdlp(),
    ] {
        if let Err(e) = check {
            error!("Environment check failed: {}", e);
            std::process::exit(1);
        }
    }

    let api_config = ApiConfig::from_env();
    info!(
        "API config: host={}, port={}",
        api_config.host, api_config.port
    );

    let pipeline_config = PipelineConfig::from_env();
    info!(
        "Pipeline config: output_dir={}, fallback_dir={}, target={}s",
        pipeline_config.output_dir.display(),
        pipeline_config.fallback_dir.display(),
        pipeline_config.target_duration
    );
    if pipeline_config.groq_api_key.is_none() {
        info!("GROQ_API_KEY not set; summary step will be skipped");
    }

    let state = AppState::new(pipeline_config);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", api_config.host, api_config.port)
        .parse()
        .expect("Invalid bind address");

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Received shutdown signal");
}
