use crate::foundation::error::{PsdError, PsdResult};

/// Document canvas dimensions shared by every layer in a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Smallest canvas covering every layer: the per-axis maxima.
    ///
    /// Returns a zero-sized canvas for an empty layer list.
    pub fn bounding(layers: &[RasterImage]) -> Self {
        Self {
            width: layers.iter().map(|l| l.width).max().unwrap_or(0),
            height: layers.iter().map(|l| l.height).max().unwrap_or(0),
        }
    }

    /// Total pixel count of the canvas.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// An owned, decoded raster layer: a display name plus a row-major RGBA8
/// pixel buffer with straight (non-premultiplied) alpha.
///
/// Invariant: `pixels.len() == width * height * 4`. The encoder checks this
/// via [`RasterImage::validate`] before writing a single byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Display name stored with the layer. Names longer than 255 UTF-8 bytes
    /// are silently truncated on encode; see `EncodeStats::truncated_names`.
    pub name: String,
    /// Layer width in pixels, must be non-zero.
    pub width: u32,
    /// Layer height in pixels, must be non-zero.
    pub height: u32,
    /// Row-major pixel bytes, 4 per pixel in R,G,B,A order.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Build a layer from raw RGBA8 bytes, checking the size invariant.
    pub fn from_rgba8(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> PsdResult<Self> {
        let image = Self {
            name: name.into(),
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Check the dimension and buffer-length invariants.
    pub fn validate(&self) -> PsdResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PsdError::validation(format!(
                "layer '{}' must have non-zero dimensions",
                self.name
            )));
        }
        let expected = u64::from(self.width) * u64::from(self.height) * 4;
        if self.pixels.len() as u64 != expected {
            return Err(PsdError::validation(format!(
                "layer '{}' pixel buffer is {} bytes, expected {}",
                self.name,
                self.pixels.len(),
                expected
            )));
        }
        Ok(())
    }

    /// Pixel count of this layer.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Diagnostics for one encode operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodeStats {
    /// Number of layers written into the document.
    pub layer_count: u32,
    /// Names silently truncated to fit the 1-byte Pascal length prefix.
    pub truncated_names: u32,
    /// Total bytes emitted to the sink.
    pub bytes_written: u64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
