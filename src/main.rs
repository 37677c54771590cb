use std::net::SocketAddr;
use std::path::PathBuf;

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use building_files::{config, middleware, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stdout + tägliche Datei-Rotation unter ./logs)
    std::fs::create_dir_all("logs").ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily("logs", "building-files.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Guards am Leben halten, damit die Non-Blocking Writer korrekt flushen
    let _log_guards = (stdout_guard, file_guard);

    // Load configuration (embedded defaults -> building-files.toml -> env/.env)
    let app_cfg = config::load()?;
    let state = AppState::new(app_cfg.clone());

    // Static file service für die Web UI mit SPA-Fallback
    let ui_root = PathBuf::from(&app_cfg.ui.dir);
    let ui_index = ui_root.join("index.html");
    if !ui_index.is_file() {
        warn!("No built UI found at {} - only the API will be served", ui_root.display());
    }
    let static_ui_service = ServeDir::new(ui_root)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(ui_index));

    let app = routes::api_router(state)
        .fallback_service(static_ui_service)
        .layer(axum::middleware::from_fn(middleware::headers::response_headers))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // CORS: in Debug permissiv (UI kann separat über trunk serve laufen)
    let app = if cfg!(debug_assertions) { app.layer(CorsLayer::permissive()) } else { app };

    let host = app_cfg.server.host.clone();
    let port = app_cfg.server.port;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("building-files devserver listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
