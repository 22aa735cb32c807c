//! Image XObjects for PDF embedding.
//!
//! Glyph PNGs are decoded to RGBA and split into an RGB image stream plus,
//! when any pixel is non-opaque, a grayscale alpha stream emitted as a
//! `/SMask` soft mask. The soft mask is what lets the whitespace around the
//! glyph strokes stay transparent instead of painting over earlier content.

use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::{PenscriptError, Result};
use std::path::Path;

/// A decoded image ready to be embedded in a PDF.
#[derive(Debug, Clone)]
pub struct Image {
    /// Packed 8-bit RGB samples, row-major.
    rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when some pixel is non-opaque.
    alpha: Option<Vec<u8>>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl Image {
    /// Load a PNG image from a file
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_png_data(&data)
            .map_err(|e| PenscriptError::InvalidImage(format!("{}: {e}", path.display())))
    }

    /// Create an image from PNG data
    pub fn from_png_data(data: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| PenscriptError::InvalidImage(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        let mut has_alpha = false;

        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
            if a != 0xFF {
                has_alpha = true;
            }
        }

        Ok(Image {
            rgb,
            alpha: has_alpha.then_some(alpha),
            width,
            height,
        })
    }

    /// Get image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the image carries a non-trivial alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Convert to a PDF image XObject.
    ///
    /// `soft_mask` is the object id of the alpha-channel XObject written via
    /// [`Image::soft_mask_object`]; pass it whenever [`Image::has_alpha`].
    pub(crate) fn to_pdf_object(&self, soft_mask: Option<ObjectId>) -> Result<Object> {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name("XObject".to_string()));
        dict.set("Subtype", Object::Name("Image".to_string()));
        dict.set("Width", Object::Integer(self.width as i64));
        dict.set("Height", Object::Integer(self.height as i64));
        dict.set("ColorSpace", Object::Name("DeviceRGB".to_string()));
        dict.set("BitsPerComponent", Object::Integer(8));
        if let Some(mask_id) = soft_mask {
            dict.set("SMask", Object::Reference(mask_id));
        }

        let stream = image_stream(dict, self.rgb.clone())?;
        Ok(Object::Stream(
            stream.dictionary().clone(),
            stream.data().to_vec(),
        ))
    }

    /// Convert the alpha channel to a `/DeviceGray` soft-mask XObject, or
    /// `None` for fully opaque images.
    pub(crate) fn soft_mask_object(&self) -> Result<Option<Object>> {
        let Some(ref alpha) = self.alpha else {
            return Ok(None);
        };

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name("XObject".to_string()));
        dict.set("Subtype", Object::Name("Image".to_string()));
        dict.set("Width", Object::Integer(self.width as i64));
        dict.set("Height", Object::Integer(self.height as i64));
        dict.set("ColorSpace", Object::Name("DeviceGray".to_string()));
        dict.set("BitsPerComponent", Object::Integer(8));

        let stream = image_stream(dict, alpha.clone())?;
        Ok(Some(Object::Stream(
            stream.dictionary().clone(),
            stream.data().to_vec(),
        )))
    }
}

#[cfg(feature = "compression")]
fn image_stream(dict: Dictionary, data: Vec<u8>) -> Result<Stream> {
    let mut stream = Stream::with_dictionary(dict, data);
    stream.compress_flate()?;
    Ok(stream)
}

#[cfg(not(feature = "compression"))]
fn image_stream(dict: Dictionary, data: Vec<u8>) -> Result<Stream> {
    Ok(Stream::with_dictionary(dict, data))
}
