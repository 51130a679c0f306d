use std::{
    fs::File,
    io::{BufWriter, Cursor, Seek, Write},
    path::Path,
};

use anyhow::Context as _;

use crate::encode::{
    COLOR_MODE_RGB, DEPTH_8_BIT, DOCUMENT_CHANNELS, SIGNATURE, VERSION,
    layer::{self, LayerRecord},
    merged::{self, Flattener, TopLayerFlattener},
    sink::DocumentSink,
};
use crate::foundation::{
    core::{Canvas, EncodeStats, RasterImage},
    error::{PsdError, PsdResult},
};

/// Encode `layers` (bottom-to-top stacking order) into a finished layered
/// document sized to `canvas`, returning the complete byte sequence.
///
/// `canvas` is expected to be at least the per-axis maxima over the layers
/// (see [`Canvas::bounding`]); the encoder does not re-check that relation.
pub fn encode_document(layers: &[RasterImage], canvas: Canvas) -> PsdResult<Vec<u8>> {
    encode_document_with_stats(layers, canvas).map(|(bytes, _)| bytes)
}

/// Like [`encode_document`], also returning per-encode diagnostics such as
/// the number of silently truncated layer names.
pub fn encode_document_with_stats(
    layers: &[RasterImage],
    canvas: Canvas,
) -> PsdResult<(Vec<u8>, EncodeStats)> {
    let mut cursor = Cursor::new(Vec::new());
    let stats = write_document(&mut cursor, layers, canvas)?;
    Ok((cursor.into_inner(), stats))
}

/// Write a document to any seekable sink using the default
/// [`TopLayerFlattener`] for the merged preview.
pub fn write_document<W: Write + Seek>(
    sink: W,
    layers: &[RasterImage],
    canvas: Canvas,
) -> PsdResult<EncodeStats> {
    write_document_with(sink, layers, canvas, &TopLayerFlattener)
}

/// Write a document to any seekable sink with a caller-chosen merged-preview
/// [`Flattener`].
///
/// All validation happens before a single byte reaches the sink. A sink
/// failure mid-write is propagated as-is and leaves the sink in an
/// unspecified state; callers promoting output to a final location must do
/// so only after this returns `Ok`.
#[tracing::instrument(skip(sink, layers, flattener), fields(layers = layers.len()))]
pub fn write_document_with<W: Write + Seek, F: Flattener + ?Sized>(
    sink: W,
    layers: &[RasterImage],
    canvas: Canvas,
    flattener: &F,
) -> PsdResult<EncodeStats> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(PsdError::validation("canvas must have non-zero dimensions"));
    }
    if i16::try_from(layers.len()).is_err() {
        return Err(PsdError::validation(format!(
            "layer count {} exceeds the signed 16-bit count field",
            layers.len()
        )));
    }
    for layer in layers {
        layer.validate()?;
    }
    let records = layers
        .iter()
        .map(LayerRecord::build)
        .collect::<PsdResult<Vec<_>>>()?;

    let mut sink = DocumentSink::new(sink);
    let start = sink.position()?;

    write_header(&mut sink, canvas)?;
    sink.put_u32(0)?; // color mode data: always empty for RGB
    sink.put_u32(0)?; // image resources: none

    sink.patched_u32(|s| {
        layer::write_layer_info(s, &records)?;
        s.put_u32(0)?; // document-level layer mask info
        s.put_u32(0) // document-level blending ranges
    })?;

    merged::write_merged_image(&mut sink, &flattener.flatten(layers, canvas))?;

    let stats = EncodeStats {
        layer_count: layers.len() as u32,
        truncated_names: records.iter().filter(|r| r.name_truncated).count() as u32,
        bytes_written: sink.position()? - start,
    };
    tracing::debug!(
        layers = stats.layer_count,
        canvas_width = canvas.width,
        canvas_height = canvas.height,
        bytes = stats.bytes_written,
        truncated_names = stats.truncated_names,
        "document encoded"
    );
    Ok(stats)
}

/// Write a document straight to `path`, creating parent directories first.
pub fn write_document_to_path(
    path: impl AsRef<Path>,
    layers: &[RasterImage],
    canvas: Canvas,
) -> PsdResult<EncodeStats> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    let stats = write_document(&mut writer, layers, canvas)?;
    writer.flush()?;
    Ok(stats)
}

fn write_header<W: Write + Seek>(sink: &mut DocumentSink<W>, canvas: Canvas) -> PsdResult<()> {
    sink.put_bytes(SIGNATURE)?;
    sink.put_u16(VERSION)?;
    sink.put_bytes(&[0u8; 6])?; // reserved
    sink.put_u16(DOCUMENT_CHANNELS)?;
    sink.put_u32(canvas.height)?;
    sink.put_u32(canvas.width)?;
    sink.put_u16(DEPTH_8_BIT)?;
    sink.put_u16(COLOR_MODE_RGB)
}

fn ensure_parent_dir(path: &Path) -> PsdResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/document.rs"]
mod tests;
