//! # penscript
//!
//! Renders plain text as handwriting by compositing pre-rendered glyph
//! images (one PNG per character) onto paginated PDF canvases.
//!
//! ## How it works
//!
//! - A [`GlyphCatalog`] is loaded from a directory of `<character>.png`
//!   files; keys are the lowercased file stems and lookups are
//!   case-insensitive.
//! - [`layout_text`] walks the input character by character, advancing a
//!   cursor by glyph width plus letter spacing, wrapping at the right margin
//!   and breaking pages at the bottom margin. Characters without a glyph are
//!   silently dropped; rendering is best-effort.
//! - [`compose_document`] (or the [`render_handwriting`] convenience) turns
//!   the placements into a [`Document`] with alpha-composited image
//!   XObjects, ready to be written as PDF 1.7 bytes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use penscript::{GlyphCatalog, LayoutOptions, render_handwriting, Result};
//!
//! # fn main() -> Result<()> {
//! let catalog = GlyphCatalog::load("glyphs")?;
//!
//! let options = LayoutOptions {
//!     font_size: 1.5,
//!     ..LayoutOptions::default()
//! };
//!
//! let mut doc = render_handwriting("hello world", &catalog, &options)?;
//! doc.save("hello.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`glyphs`] - Glyph catalog loading and lookup
//! - [`layout`] - Cursor-based glyph layout
//! - [`compose`] - Placement-to-document composition
//! - [`document`] / [`page`] - PDF document model
//! - [`graphics`] - Image XObjects and content-stream operations
//! - [`writer`] - Low-level PDF writing

pub mod compose;
pub mod document;
pub mod error;
pub mod glyphs;
pub mod graphics;
pub mod layout;
pub mod objects;
pub mod page;
pub mod writer;

pub use compose::{compose_document, render_handwriting};
pub use document::{Document, DocumentMetadata};
pub use error::{PenscriptError, Result};
pub use glyphs::{Glyph, GlyphCatalog};
pub use graphics::{GraphicsContext, Image};
pub use layout::{layout_text, LayoutOptions, PageLayout, PlacedGlyph, PAGE_HEIGHT, PAGE_WIDTH};
pub use page::Page;

/// Current version of penscript
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
