use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use penscript::{render_handwriting, GlyphCatalog, LayoutOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// The submission form served at `/`.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Server-side configuration shared by all requests.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Directory of `<character>.png` glyph images. Re-scanned per request;
    /// glyphs added on disk are picked up without a restart.
    pub glyph_dir: PathBuf,
}

/// Request payload for the render endpoint
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Text to render as handwriting
    #[serde(default)]
    pub text: String,
    /// Optional layout overrides; absent fields keep their defaults
    #[serde(default)]
    pub settings: Option<LayoutSettings>,
}

/// Per-request layout overrides, all optional.
///
/// Field names and defaults match [`LayoutOptions`]; values are applied
/// as-is, with no bounds checking.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutSettings {
    pub left_margin: Option<f64>,
    pub right_margin: Option<f64>,
    pub top_margin: Option<f64>,
    pub bottom_margin: Option<f64>,
    pub font_size: Option<f64>,
    pub space_width: Option<f64>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
}

impl LayoutSettings {
    /// Merges the overrides over the documented defaults.
    pub fn into_options(self) -> LayoutOptions {
        let defaults = LayoutOptions::default();
        LayoutOptions {
            left_margin: self.left_margin.unwrap_or(defaults.left_margin),
            right_margin: self.right_margin.unwrap_or(defaults.right_margin),
            top_margin: self.top_margin.unwrap_or(defaults.top_margin),
            bottom_margin: self.bottom_margin.unwrap_or(defaults.bottom_margin),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            space_width: self.space_width.unwrap_or(defaults.space_width),
            line_height: self.line_height.unwrap_or(defaults.line_height),
            letter_spacing: self.letter_spacing.unwrap_or(defaults.letter_spacing),
        }
    }
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// Application-specific error types for the API
#[derive(Debug)]
pub enum AppError {
    /// Rendering errors (glyph catalog, layout, PDF generation)
    Render(penscript::PenscriptError),
    /// I/O errors
    Io(std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_msg = match self {
            AppError::Render(e) => e.to_string(),
            AppError::Io(e) => e.to_string(),
        };

        let error_response = ErrorResponse { error: error_msg };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
    }
}

impl From<penscript::PenscriptError> for AppError {
    fn from(err: penscript::PenscriptError) -> Self {
        AppError::Render(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Build the application router with all routes configured
pub fn app(config: ApiConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate_pdf))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(config))
}

/// Serve the static submission form
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Render the submitted text as a handwriting PDF
pub async fn generate_pdf(
    State(config): State<Arc<ApiConfig>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Response, AppError> {
    if payload.text.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text provided".to_string(),
            }),
        )
            .into_response());
    }

    // The catalog is rebuilt from disk on every request, like the rest of
    // the render state; nothing is shared between requests.
    let catalog = GlyphCatalog::load(&config.glyph_dir)?;
    let options = payload.settings.unwrap_or_default().into_options();

    let mut doc = render_handwriting(&payload.text, &catalog, &options)?;

    let mut pdf_bytes = Vec::new();
    doc.write(&mut pdf_bytes)?;

    let filename = format!("handwritten_{}.pdf", Local::now().format("%Y%m%d_%H%M%S"));

    info!(
        chars = payload.text.chars().count(),
        pages = doc.page_count(),
        bytes = pdf_bytes.len(),
        %filename,
        "rendered document"
    );

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", "application/pdf".to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf_bytes,
    )
        .into_response())
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "penscript API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
