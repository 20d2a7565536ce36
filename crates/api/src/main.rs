use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentora_api::config::ServerConfig;
use mentora_api::engine::SampleWriter;
use mentora_api::router::build_app_router;
use mentora_api::state::AppState;
use mentora_api::ws;
use mentora_core::catalog::PackageCatalog;
use mentora_events::{ChangeBus, MetricsProjection};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentora_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = mentora_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    mentora_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    mentora_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Package catalog ---
    let catalog = Arc::new(PackageCatalog::builtin());
    tracing::info!(packages = catalog.all().len(), "Package catalog loaded");

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Change bus ---
    let change_bus = Arc::new(ChangeBus::default());

    // --- Sample writer (serializes dashboard read-modify-writes) ---
    let (sample_tx, writer_handle) = SampleWriter::spawn(pool.clone(), Arc::clone(&change_bus));

    // --- Metrics projection ---
    let projection = MetricsProjection::spawn(pool.clone(), &change_bus);

    // --- Admin metric push over WebSocket ---
    let push_handle = ws::start_metrics_push(Arc::clone(&ws_manager), projection.subscribe());

    tracing::info!("Background services started (sample writer, projection, metric push)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog,
        ws_manager: Arc::clone(&ws_manager),
        change_bus: Arc::clone(&change_bus),
        sessions: Arc::new(mentora_api::engine::PlaybackSessions::new()),
        sample_tx,
        metrics: projection.subscribe(),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    // Stop the projection; dropping its watch sender also ends the push task.
    projection.shutdown().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), push_handle).await;
    tracing::info!("Metrics projection stopped");

    // The router (and its state) was consumed by the server, so every
    // sample sender is gone and the writer drains to completion.
    let _ = tokio::time::timeout(Duration::from_secs(5), writer_handle).await;
    tracing::info!("Sample writer stopped");

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
