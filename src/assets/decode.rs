use anyhow::Context;
use rayon::prelude::*;

use crate::foundation::{core::RasterImage, error::PsdResult};

/// Decode encoded image bytes (PNG or any format the `image` crate
/// recognizes) into a named RGBA8 raster layer.
///
/// Alpha stays straight (non-premultiplied); the container stores straight
/// alpha channel planes.
pub fn decode_layer(name: impl Into<String>, bytes: &[u8]) -> PsdResult<RasterImage> {
    let name = name.into();
    let dyn_img =
        image::load_from_memory(bytes).with_context(|| format!("decode layer '{name}'"))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_rgba8(name, width, height, rgba.into_raw())
}

/// Decode a batch of `(name, bytes)` pairs into layers, in parallel,
/// preserving input order. Fails on the first undecodable entry.
#[tracing::instrument(skip(pairs), fields(layers = pairs.len()))]
pub fn decode_layers<N, B>(pairs: &[(N, B)]) -> PsdResult<Vec<RasterImage>>
where
    N: AsRef<str> + Sync,
    B: AsRef<[u8]> + Sync,
{
    pairs
        .par_iter()
        .map(|(name, bytes)| decode_layer(name.as_ref(), bytes.as_ref()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
