//! # penscript-api
//!
//! HTTP server for the penscript handwriting renderer
//!

mod api;
pub use api::{
    app, generate_pdf, health_check, ApiConfig, AppError, ErrorResponse, GenerateRequest,
    LayoutSettings,
};
