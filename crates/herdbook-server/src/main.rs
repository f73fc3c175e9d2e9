use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herdbook_server::{routes, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!(
                "Optional: HERDBOOK_LISTEN_ADDR, HERDBOOK_DB_PATH, HERDBOOK_SCAN_DELAY_MS, \
                 HERDBOOK_OTP_DELAY_MS, HERDBOOK_SERVICE_TIMEOUT_MS"
            );
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Herdbook server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Database path: {}", config.db_path.display());

    // Open storage and load the herd
    let state = match AppState::open(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Database error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded {} animals", state.animals.read().await.len());

    let app = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
