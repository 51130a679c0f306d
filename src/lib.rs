//! psdstack composes independent RGBA raster images into a single layered
//! PSD-family document with a flattened merged preview at the tail.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: every [`RasterImage`] is checked before a single byte is
//!    written (`pixels.len() == width * height * 4`, non-zero dimensions)
//! 2. **Frame**: fixed file header plus length-prefixed sections, with
//!    4-byte length fields reserved first and patched once content size is
//!    known
//! 3. **Layer records**: per-layer bounding box, channel directory, blend
//!    signature and Pascal-string name, then raw channel planes in the fixed
//!    alpha, red, green, blue order
//! 4. **Merged preview**: a flattened canvas-sized image for viewers that do
//!    not interpret layer data
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same layer list always produces byte-identical
//!   output (no timestamps, no random ids).
//! - **Write-only**: there is no decoding of existing documents.
//! - **Straight RGBA8 end-to-end**: channel planes store straight
//!   (non-premultiplied) alpha.
//!
//! One encode operation is a pure, synchronous transformation over in-memory
//! buffers; separate documents may be encoded on parallel threads with no
//! coordination as long as each has its own sink.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;

pub use assets::decode::{decode_layer, decode_layers};
pub use encode::document::{
    encode_document, encode_document_with_stats, write_document, write_document_to_path,
    write_document_with,
};
pub use encode::merged::{Flattener, TopLayerFlattener};
pub use foundation::core::{Canvas, EncodeStats, RasterImage};
pub use foundation::error::{PsdError, PsdResult};
