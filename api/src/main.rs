use std::net::SocketAddr;
use std::sync::Arc;

use api::auth::middleware::log_request;
use api::routes::routes;
use api::services::notifications::{default_notifier, spawn_dispatcher};
use api::state::AppState;
use axum::{Router, middleware::from_fn_with_state};
use db::engine::AggregationEngine;
use migration::{Migrator, MigratorTrait};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::global().clone();
    let _log_guard = init_logging(&config);

    // Set up dependencies
    let db = db::connect().await?;
    Migrator::up(&db, None).await?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let engine = AggregationEngine::new(db.clone(), config.expected_subject_count)
        .with_events(events_tx);
    spawn_dispatcher(events_rx, default_notifier());

    let app_state = AppState::new(db, Arc::new(engine));

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .layer(from_fn_with_state(app_state.clone(), log_request))
        .layer(CorsLayer::very_permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(
        expected_subjects = config.expected_subject_count,
        "Starting {} on http://{}",
        config.project_name,
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("api=info,db=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config.log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
