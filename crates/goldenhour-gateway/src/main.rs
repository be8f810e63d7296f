//! Golden Hour Studio gateway binary — 127.0.0.1:3000 by default.

use goldenhour_gateway::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new();
    let router = app(state);

    let addr = std::env::var("GOLDENHOUR_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("[Gateway] Golden Hour Studio coordination gateway on {}", addr);

    axum::serve(listener, router).await.unwrap();
}
