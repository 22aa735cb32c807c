use penscript_api::{app, ApiConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "penscript_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let glyph_dir = std::env::var("PENSCRIPT_GLYPH_DIR").unwrap_or_else(|_| "glyphs".to_string());
    let addr = std::env::var("PENSCRIPT_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = ApiConfig {
        glyph_dir: PathBuf::from(glyph_dir),
    };

    let app = app(config.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!(
        glyph_dir = %config.glyph_dir.display(),
        "penscript API listening on http://{addr}"
    );

    axum::serve(listener, app).await.unwrap();
}
