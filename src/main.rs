mod config;
mod errors;
mod plot;
mod pricing;
mod server;
mod session;
mod state;
mod summary;
mod validate;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("bopm_viz starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        pricing_service = %cfg.pricing_service_url,
        static_dir = %cfg.static_dir.display(),
        "configuration loaded"
    );

    if !cfg.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %cfg.static_dir.display(),
            "static dir not found, only /api routes will answer"
        );
    }

    let port = cfg.server_port;
    let app = server::router(AppState::new(cfg));

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
