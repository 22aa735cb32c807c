//! Cursor-based glyph layout.
//!
//! [`layout_text`] walks the input one character at a time and produces, per
//! page, the ordered list of glyph placements that realize the handwriting
//! effect. The walk is pure: it reads glyph dimensions from the catalog but
//! touches no pixel data, so tests can assert on placements without decoding
//! images or parsing PDF bytes. Composition of the placements into an actual
//! document lives in [`crate::compose`].

use crate::glyphs::GlyphCatalog;
use tracing::trace;

/// A4 page width in points.
pub const PAGE_WIDTH: f64 = 595.0;
/// A4 page height in points.
pub const PAGE_HEIGHT: f64 = 842.0;

/// Margin, scale, and spacing parameters controlling layout.
///
/// All lengths are in page points except `font_size`, which is a unitless
/// multiplier applied to glyph dimensions and to every spacing parameter.
/// Values are used as-is; nothing enforces non-negativity or bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Left page margin. Default 50.
    pub left_margin: f64,
    /// Right page margin. Default 50.
    pub right_margin: f64,
    /// Top page margin. Default 50.
    pub top_margin: f64,
    /// Bottom page margin. Default 50.
    pub bottom_margin: f64,
    /// Scale factor applied to glyph sizes and all spacing. Default 1.0.
    pub font_size: f64,
    /// Horizontal advance for a space character, before scaling. Default 35.
    pub space_width: f64,
    /// Vertical advance between lines, before scaling. Default 90.
    pub line_height: f64,
    /// Horizontal gap appended after each drawn glyph, before scaling.
    /// Default 5.
    pub letter_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            left_margin: 50.0,
            right_margin: 50.0,
            top_margin: 50.0,
            bottom_margin: 50.0,
            font_size: 1.0,
            space_width: 35.0,
            line_height: 90.0,
            letter_spacing: 5.0,
        }
    }
}

/// One glyph-drawing operation: which glyph, where, and at what size.
///
/// `x`/`y` are the lower-left corner of the image on the page, in points;
/// `width`/`height` are already scaled by `font_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    /// Lowercase catalog key of the glyph to draw.
    pub key: char,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The placements for a single output page, in drawing order.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub glyphs: Vec<PlacedGlyph>,
}

/// Pen position plus the page being drawn and the pages already finished.
struct Cursor {
    x: f64,
    y: f64,
    page: PageLayout,
    finished: Vec<PageLayout>,
}

impl Cursor {
    fn new(options: &LayoutOptions) -> Self {
        Self {
            x: options.left_margin,
            y: first_line_y(options),
            page: PageLayout::default(),
            finished: Vec::new(),
        }
    }

    fn carriage_return(&mut self, options: &LayoutOptions) {
        self.x = options.left_margin;
        self.y -= options.line_height * options.font_size;
    }

    fn break_page(&mut self, options: &LayoutOptions) {
        self.finished.push(std::mem::take(&mut self.page));
        self.x = options.left_margin;
        self.y = first_line_y(options);
    }

    fn into_pages(mut self) -> Vec<PageLayout> {
        self.finished.push(self.page);
        self.finished
    }
}

fn first_line_y(options: &LayoutOptions) -> f64 {
    PAGE_HEIGHT - options.top_margin - options.line_height * options.font_size
}

/// Lays out `text` against `catalog`, producing one [`PageLayout`] per
/// output page.
///
/// Per character: newline resets the pen to the left margin and drops one
/// line; space advances the pen without drawing; any other character is
/// looked up case-insensitively and silently dropped when the catalog has no
/// glyph for it. A glyph that would cross the right margin wraps to the next
/// line first, and only a wrap that lands below the bottom margin starts a
/// new page. The newline branch performs no page check: consecutive newlines
/// near the bottom of a page can place content below the bottom margin until
/// the next wrap fires.
///
/// The final page is always part of the result, so empty input (or input
/// consisting only of unsupported characters) yields a single empty page.
pub fn layout_text(text: &str, catalog: &GlyphCatalog, options: &LayoutOptions) -> Vec<PageLayout> {
    let mut cursor = Cursor::new(options);
    let right_edge = PAGE_WIDTH - options.right_margin;

    for ch in text.chars() {
        if ch == '\n' {
            cursor.carriage_return(options);
            continue;
        }

        if ch == ' ' {
            cursor.x += options.space_width * options.font_size;
            continue;
        }

        let Some(glyph) = catalog.get(ch) else {
            trace!(%ch, "no glyph for character, dropping");
            continue;
        };

        let scaled_w = glyph.width() as f64 * options.font_size;
        let scaled_h = glyph.height() as f64 * options.font_size;

        if cursor.x + scaled_w > right_edge {
            cursor.carriage_return(options);

            if cursor.y < options.bottom_margin {
                cursor.break_page(options);
            }
        }

        cursor.page.glyphs.push(PlacedGlyph {
            key: glyph.key(),
            x: cursor.x,
            y: cursor.y,
            width: scaled_w,
            height: scaled_h,
        });

        cursor.x += scaled_w + options.letter_spacing * options.font_size;
    }

    cursor.into_pages()
}
