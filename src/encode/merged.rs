use std::io::{Seek, Write};

use crate::encode::{COMPRESSION_RAW, layer::extract_plane, sink::DocumentSink};
use crate::foundation::{
    core::{Canvas, RasterImage},
    error::PsdResult,
};

/// Produces the flattened, canvas-sized RGBA buffer stored as the document's
/// merged preview — the image viewers show when they do not interpret layer
/// data. Implementations return a `canvas.width * canvas.height * 4` byte
/// row-major RGBA8 buffer.
pub trait Flattener {
    /// Flatten `layers` (bottom-to-top order) onto a canvas-sized buffer.
    fn flatten(&self, layers: &[RasterImage], canvas: Canvas) -> Vec<u8>;
}

/// The shipping flattener: copies the top-most (last) layer into the canvas
/// origin, cropped to the canvas.
///
/// **Not a true alpha composite** — any area the top layer does not cover
/// stays fully transparent. Good enough for a rough thumbnail, nothing more;
/// substitute a compositing [`Flattener`] if the preview matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopLayerFlattener;

impl Flattener for TopLayerFlattener {
    fn flatten(&self, layers: &[RasterImage], canvas: Canvas) -> Vec<u8> {
        let dst_row_bytes = canvas.width as usize * 4;
        let mut merged = vec![0u8; dst_row_bytes * canvas.height as usize];
        if let Some(top) = layers.last() {
            let copy_w = top.width.min(canvas.width) as usize;
            let copy_h = top.height.min(canvas.height) as usize;
            let src_row_bytes = top.width as usize * 4;
            for row in 0..copy_h {
                let src = row * src_row_bytes;
                let dst = row * dst_row_bytes;
                merged[dst..dst + copy_w * 4].copy_from_slice(&top.pixels[src..src + copy_w * 4]);
            }
        }
        merged
    }
}

/// Write the trailing merged image data: one raw-compression tag, then four
/// full-canvas planes in red, green, blue, alpha order. No length prefix —
/// the section runs to the end of the file.
pub(crate) fn write_merged_image<W: Write + Seek>(
    sink: &mut DocumentSink<W>,
    merged: &[u8],
) -> PsdResult<()> {
    sink.put_u16(COMPRESSION_RAW)?;
    for offset in [0, 1, 2, 3] {
        sink.put_bytes(&extract_plane(merged, offset))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/merged.rs"]
mod tests;
