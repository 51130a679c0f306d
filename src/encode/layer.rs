use std::io::{Seek, Write};

use crate::encode::{BLEND_MODE_NORMAL, BLEND_SIGNATURE, COMPRESSION_RAW, sink::DocumentSink};
use crate::foundation::{
    core::RasterImage,
    error::{PsdError, PsdResult},
};

/// Channel ids paired with their byte offset inside an RGBA pixel, in the
/// fixed on-disk order: alpha (-1), red (0), green (1), blue (2).
const CHANNEL_ORDER: [(i16, usize); 4] = [(-1, 3), (0, 0), (1, 1), (2, 2)];

/// A Pascal-string name field holds at most this many content bytes.
pub(crate) const MAX_NAME_BYTES: usize = 255;

/// Transparency not protected, layer visible and unlocked.
const LAYER_FLAGS: u8 = 0x08;

const OPACITY_OPAQUE: u8 = 255;

/// Ephemeral per-layer state: extracted channel planes, the encoded name and
/// the precomputed channel byte length. Exists only while encoding.
pub(crate) struct LayerRecord {
    width: u32,
    height: u32,
    /// Encoded name, already cut to at most [`MAX_NAME_BYTES`] bytes.
    name_bytes: Vec<u8>,
    pub(crate) name_truncated: bool,
    /// One plane per [`CHANNEL_ORDER`] entry, `width * height` bytes each.
    planes: [Vec<u8>; 4],
    /// Per-channel encoded length: 2-byte compression tag plus the plane.
    channel_len: u32,
}

impl LayerRecord {
    /// Extract planes and name bytes from a validated layer. Fails when the
    /// layer is too large for the format's fixed-width fields.
    pub(crate) fn build(image: &RasterImage) -> PsdResult<Self> {
        let channel_len = u32::try_from(2 + image.pixel_count()).map_err(|_| {
            PsdError::validation(format!(
                "layer '{}' channel data overflows a 4-byte length field",
                image.name
            ))
        })?;
        if i32::try_from(image.width).is_err() || i32::try_from(image.height).is_err() {
            return Err(PsdError::validation(format!(
                "layer '{}' dimensions overflow the signed bounding box",
                image.name
            )));
        }

        let (name_bytes, name_truncated) = pascal_name(&image.name);
        let planes = CHANNEL_ORDER.map(|(_, offset)| extract_plane(&image.pixels, offset));
        Ok(Self {
            width: image.width,
            height: image.height,
            name_bytes,
            name_truncated,
            planes,
            channel_len,
        })
    }

    fn write_header<W: Write + Seek>(&self, sink: &mut DocumentSink<W>) -> PsdResult<()> {
        // Bounding box: the layer's own rectangle anchored at the canvas
        // origin, not padded to canvas size.
        sink.put_i32(0)?; // top
        sink.put_i32(0)?; // left
        sink.put_i32(self.height as i32)?; // bottom
        sink.put_i32(self.width as i32)?; // right

        sink.put_u16(CHANNEL_ORDER.len() as u16)?;
        for (id, _) in CHANNEL_ORDER {
            sink.put_i16(id)?;
            sink.put_u32(self.channel_len)?;
        }

        sink.put_bytes(BLEND_SIGNATURE)?;
        sink.put_bytes(BLEND_MODE_NORMAL)?;
        sink.put_u8(OPACITY_OPAQUE)?;
        sink.put_u8(0)?; // clipping: base
        sink.put_u8(LAYER_FLAGS)?;
        sink.put_u8(0)?; // filler

        sink.patched_u32(|s| {
            s.put_u32(0)?; // no layer mask data
            s.put_u32(0)?; // no blending ranges
            s.put_u8(self.name_bytes.len() as u8)?;
            s.put_bytes(&self.name_bytes)?;
            // Length byte plus content, zero-padded to a 4-byte boundary.
            let pad = (4 - (1 + self.name_bytes.len()) % 4) % 4;
            s.put_bytes(&[0u8; 3][..pad])
        })?;
        Ok(())
    }

    fn write_channel_data<W: Write + Seek>(&self, sink: &mut DocumentSink<W>) -> PsdResult<()> {
        for plane in &self.planes {
            sink.put_u16(COMPRESSION_RAW)?;
            sink.put_bytes(plane)?;
        }
        Ok(())
    }
}

/// Write the length-patched layer info block: signed layer count, per-layer
/// headers, then every layer's channel payloads, padded to an even length.
pub(crate) fn write_layer_info<W: Write + Seek>(
    sink: &mut DocumentSink<W>,
    records: &[LayerRecord],
) -> PsdResult<()> {
    sink.patched_u32(|s| {
        let start = s.position()?;
        // Always the plain non-negative count; the negative
        // merged-alpha-first convention is never emitted.
        let count = i16::try_from(records.len())
            .map_err(|_| PsdError::validation("layer count exceeds the 16-bit count field"))?;
        s.put_i16(count)?;
        for record in records {
            record.write_header(s)?;
        }
        for record in records {
            record.write_channel_data(s)?;
        }
        s.pad_to_even(start)
    })?;
    Ok(())
}

/// Extract one channel plane from a row-major RGBA8 buffer.
pub(crate) fn extract_plane(rgba: &[u8], offset: usize) -> Vec<u8> {
    rgba.chunks_exact(4).map(|px| px[offset]).collect()
}

/// Encode a layer name as Pascal-string content: a UTF-8 prefix of at most
/// [`MAX_NAME_BYTES`] bytes, cut on a char boundary. Longer names are
/// truncated silently; the returned flag surfaces the loss to callers.
pub(crate) fn pascal_name(name: &str) -> (Vec<u8>, bool) {
    if name.len() <= MAX_NAME_BYTES {
        return (name.as_bytes().to_vec(), false);
    }
    let mut cut = MAX_NAME_BYTES;
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    (name.as_bytes()[..cut].to_vec(), true)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/layer.rs"]
mod tests;
