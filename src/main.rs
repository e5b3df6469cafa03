#![forbid(unsafe_code)]

mod config;
mod http;
mod intake_service;
mod models;
mod repository;
mod utils;

use std::{process::exit, sync::Arc};

use config::AppConfig;
use http::{build_router, AppState};
use intake_service::SubmissionIntake;
use repository::{JsonFileStore, SubmissionRepository};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utils::{SystemClock, UuidGenerator};

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        warn!("Could not load config from .env file: {err}");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    "radio_submissions=info"
                        .parse()
                        .expect("Hard-coded default directive should be correct"),
                )
                .from_env_lossy(),
        )
        .init();

    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load app config: {err}");
            exit(255);
        }
    };

    if let Err(err) = run(app_config).await {
        error!("Server failed: {err:#}");
        exit(255);
    }
}

#[tracing::instrument(skip_all)]
async fn run(app_config: AppConfig) -> anyhow::Result<()> {
    info!(
        "Storing submissions in {}",
        app_config.submissions_path.display()
    );
    let store = Arc::new(JsonFileStore::new(app_config.submissions_path));

    let intake = SubmissionIntake::new(
        Arc::new(SubmissionRepository::new(store)),
        Arc::new(SystemClock),
        Arc::new(UuidGenerator),
    );

    let app = build_router(
        AppState {
            intake: Arc::new(intake),
        },
        app_config.max_body_bytes,
    );

    let listener = TcpListener::bind(&app_config.bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(err) => {
            error!("Could not listen for Ctrl-C, graceful shutdown is unavailable: {err}");
            std::future::pending::<()>().await;
        }
    }
}
