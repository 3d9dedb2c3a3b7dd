//! Contact intake API for the DevNxt Studio landing page.
//!
//!
//!
//! # Flow
//! - Landing page form posts `{ name, email, phone }` as JSON to `/api/contact`
//! - Presence check only, no email or phone format checks
//! - One record written per accepted request, no deduplication
//! - `201` with the new id, `400` when a field is missing, `500` when the store fails
//!
//! Every response body is JSON with `success` and `message`, except the liveness text on `/`.
//!
//!
//!
//! # Not Here
//! - Authentication, rate limiting
//! - Retrying or queueing failed writes
//! - Email notifications on new submissions
//!
//!
//!
//! # Configuration
//!
//! | Variable             | Default                  |
//! |----------------------|--------------------------|
//! | `PORT`               | `5000`                   |
//! | `REDIS_URL`          | `redis://127.0.0.1:6379` |
//! | `CONTACT_STORE`      | `redis` (or `memory`)    |
//! | `CONTACT_KEY_PREFIX` | `contact`                |
//!
//! `REDIS_URL` can also come from a Docker secret at `/run/secrets/REDIS_URL`.
//!
//!
//!
//! # Setup
//!
//! Run against a local Redis.
//! ```sh
//! docker run -p 6379:6379 redis
//! RUST_LOG=info cargo run -p server
//! ```
//!
//! Run without Redis.
//! ```sh
//! CONTACT_STORE=memory RUST_LOG=info cargo run -p server
//! ```
//!
//! Submit a contact.
//! ```sh
//! cargo run -p tester -- --name "Jane Doe" --email jane@x.com --phone "+1 555-0100"
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{contact_handler, root_handler};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(root_handler))
        .route("/api/contact", post(contact_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;
    let address = format!("0.0.0.0:{}", config.port);

    info!("Initializing state...");
    let state = AppState::new(&config)?;

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
