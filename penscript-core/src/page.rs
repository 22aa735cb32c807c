use crate::error::Result;
use crate::graphics::{GraphicsContext, Image};
use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH};
use std::collections::HashMap;

/// A single page in a PDF document.
///
/// Pages have a fixed size in points and carry the image XObjects placed on
/// them plus the content-stream operations that paint those images.
///
/// # Example
///
/// ```rust
/// use penscript::Page;
///
/// let page = Page::a4();
/// assert_eq!(page.width(), 595.0);
/// ```
#[derive(Clone)]
pub struct Page {
    width: f64,
    height: f64,
    graphics_context: GraphicsContext,
    images: HashMap<String, Image>,
}

impl Page {
    /// Creates a new page with the specified width and height in points.
    ///
    /// Points are 1/72 of an inch.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            graphics_context: GraphicsContext::new(),
            images: HashMap::new(),
        }
    }

    /// Creates a new A4 page (595 x 842 points).
    pub fn a4() -> Self {
        Self::new(PAGE_WIDTH, PAGE_HEIGHT)
    }

    /// Returns a mutable reference to the graphics context.
    pub fn graphics(&mut self) -> &mut GraphicsContext {
        &mut self.graphics_context
    }

    /// Registers an image XObject under `name` for use with
    /// [`Page::draw_image`].
    pub fn add_image(&mut self, name: impl Into<String>, image: Image) {
        self.images.insert(name.into(), image);
    }

    /// Emits a draw operation for a previously registered image.
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if self.images.contains_key(name) {
            self.graphics_context.draw_image(name, x, y, width, height);
            Ok(())
        } else {
            Err(crate::PenscriptError::InvalidReference(format!(
                "Image '{name}' not found"
            )))
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn images(&self) -> &HashMap<String, Image> {
        &self.images
    }

    pub(crate) fn generate_content(&self) -> Result<Vec<u8>> {
        self.graphics_context.generate_operations()
    }
}
