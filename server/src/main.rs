mod config;
mod db;
mod error;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG; report once logging is up.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let config = config::ServerConfig::from_env();

    // Without a database the floor-plan routes still work; room and
    // contract routes answer 503.
    let pool = match config.database_url.as_deref() {
        Some(url) => Some(
            db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed"),
        ),
        None => {
            tracing::warn!("DATABASE_URL not set; room and contract routes disabled");
            None
        }
    };

    let port = config.port;
    let state = state::AppState::new(config, pool);
    tracing::info!(
        svg_store = %state.svgs.root().display(),
        static_dir = %state.svgs.static_dir().display(),
        "floor plan storage"
    );

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "facility server listening");
    axum::serve(listener, app).await.expect("server failed");
}
