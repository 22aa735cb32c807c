mod image;

pub use image::Image;

use crate::error::Result;
use std::fmt::Write;

/// Accumulates page content-stream operations.
///
/// Glyph pages only ever place images, so this carries just the image path
/// of the usual PDF operator set: `q`/`Q` state management and the
/// `cm` + `Do` pair that positions and paints an XObject.
#[derive(Clone, Default)]
pub struct GraphicsContext {
    operations: String,
}

impl GraphicsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.operations.push_str("q\n");
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.operations.push_str("Q\n");
        self
    }

    /// Paints the named image XObject with its lower-left corner at `(x, y)`
    /// and the given size in points.
    pub fn draw_image(
        &mut self,
        image_name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        self.save_state();

        // Image XObjects paint into the unit square; the matrix maps it to
        // the target rectangle. PDF origin is bottom-left.
        writeln!(
            &mut self.operations,
            "{width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm"
        )
        .unwrap();

        writeln!(&mut self.operations, "/{image_name} Do").unwrap();

        self.restore_state();

        self
    }

    /// Get the operations string
    pub fn operations(&self) -> &str {
        &self.operations
    }

    pub(crate) fn generate_operations(&self) -> Result<Vec<u8>> {
        Ok(self.operations.as_bytes().to_vec())
    }
}
