//! Turns glyph placements into a finished [`Document`].
//!
//! Each distinct glyph used by the layout is decoded once; every page that
//! places it registers the decoded image as an XObject and emits one draw
//! operation per placement.

use crate::document::Document;
use crate::error::{PenscriptError, Result};
use crate::glyphs::GlyphCatalog;
use crate::graphics::Image;
use crate::layout::{layout_text, LayoutOptions, PageLayout};
use crate::page::Page;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// PDF resource name for a glyph's image XObject.
fn xobject_name(key: char) -> String {
    format!("G{:04X}", key as u32)
}

/// Composes laid-out pages into a [`Document`], decoding each distinct
/// glyph's PNG once.
///
/// # Errors
///
/// Returns an error when a placed glyph is missing from the catalog or its
/// source image cannot be decoded.
pub fn compose_document(pages: &[PageLayout], catalog: &GlyphCatalog) -> Result<Document> {
    let mut images: HashMap<char, Image> = HashMap::new();

    for layout in pages {
        for placed in &layout.glyphs {
            if images.contains_key(&placed.key) {
                continue;
            }
            let glyph = catalog.get(placed.key).ok_or_else(|| {
                PenscriptError::InvalidReference(format!(
                    "glyph '{}' placed but not in catalog",
                    placed.key
                ))
            })?;
            images.insert(placed.key, Image::from_png_file(glyph.path())?);
        }
    }

    debug!(pages = pages.len(), distinct_glyphs = images.len(), "composing document");

    let mut doc = Document::new();

    for layout in pages {
        let mut page = Page::a4();
        let mut registered = HashSet::new();

        for placed in &layout.glyphs {
            let name = xobject_name(placed.key);
            if registered.insert(placed.key) {
                page.add_image(&name, images[&placed.key].clone());
            }
            page.draw_image(&name, placed.x, placed.y, placed.width, placed.height)?;
        }

        doc.add_page(page);
    }

    Ok(doc)
}

/// Lays out `text` and composes the result in one call.
///
/// This is the operation behind both the HTTP endpoint and the CLI: unknown
/// characters are dropped, wrapping and page breaks follow
/// [`layout_text`](crate::layout::layout_text), and the returned document is
/// ready to be written to bytes or disk.
pub fn render_handwriting(
    text: &str,
    catalog: &GlyphCatalog,
    options: &LayoutOptions,
) -> Result<Document> {
    let pages = layout_text(text, catalog, options);
    compose_document(&pages, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_glyph(dir: &Path, name: &str, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([20, 20, 60, 200]));
        img.save(dir.join(name)).unwrap();
    }

    fn fixture_catalog() -> (TempDir, GlyphCatalog) {
        let dir = TempDir::new().unwrap();
        write_glyph(dir.path(), "a.png", 40, 60);
        write_glyph(dir.path(), "b.png", 30, 50);
        let catalog = GlyphCatalog::load(dir.path()).unwrap();
        (dir, catalog)
    }

    #[test]
    fn test_xobject_name() {
        assert_eq!(xobject_name('a'), "G0061");
        assert_eq!(xobject_name('ü'), "G00FC");
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let (_dir, catalog) = fixture_catalog();
        let mut doc =
            render_handwriting("ab ba", &catalog, &LayoutOptions::default()).unwrap();

        assert_eq!(doc.page_count(), 1);

        let mut bytes = Vec::new();
        doc.write(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_unsupported_text_renders_single_empty_page() {
        let (_dir, catalog) = fixture_catalog();
        let mut doc = render_handwriting("??!", &catalog, &LayoutOptions::default()).unwrap();

        assert_eq!(doc.page_count(), 1);

        let mut bytes = Vec::new();
        doc.write(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_compose_fails_for_placement_missing_from_catalog() {
        use crate::layout::{PageLayout, PlacedGlyph};

        let layout = PageLayout {
            glyphs: vec![PlacedGlyph {
                key: 'z',
                x: 50.0,
                y: 700.0,
                width: 40.0,
                height: 60.0,
            }],
        };
        let result = compose_document(&[layout], &GlyphCatalog::default());
        assert!(matches!(result, Err(PenscriptError::InvalidReference(_))));
    }

    #[test]
    fn test_each_page_registers_its_glyphs() {
        let (_dir, catalog) = fixture_catalog();
        // One line per page so the same glyph appears on both pages.
        let options = LayoutOptions {
            line_height: 400.0,
            bottom_margin: 350.0,
            right_margin: crate::layout::PAGE_WIDTH - 150.0,
            ..LayoutOptions::default()
        };
        let doc = render_handwriting("aaa", &catalog, &options).unwrap();
        assert_eq!(doc.page_count(), 2);
    }
}
