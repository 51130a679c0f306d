//! Container encoding: fixed header, length-patched section framing, layer
//! records and the trailing merged preview, written strictly forward with
//! seek-back length patching as the only re-visiting of earlier bytes.

pub mod document;
pub mod merged;

pub(crate) mod layer;
pub(crate) mod sink;

/// File signature magic.
pub(crate) const SIGNATURE: &[u8; 4] = b"8BPS";

/// Container format version.
pub(crate) const VERSION: u16 = 1;

/// Every layer and the merged preview carry four channels (RGBA).
pub(crate) const DOCUMENT_CHANNELS: u16 = 4;

/// Bits per channel.
pub(crate) const DEPTH_8_BIT: u16 = 8;

/// Color mode code for the RGB family.
pub(crate) const COLOR_MODE_RGB: u16 = 3;

/// Blend-mode group signature preceding every blend-mode key.
pub(crate) const BLEND_SIGNATURE: &[u8; 4] = b"8BIM";

/// The "normal" blend-mode key; the only mode this encoder emits.
pub(crate) const BLEND_MODE_NORMAL: &[u8; 4] = b"norm";

/// Per-channel compression method tag: raw, uncompressed bytes.
pub(crate) const COMPRESSION_RAW: u16 = 0;
