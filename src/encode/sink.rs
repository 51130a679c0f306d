use std::io::{Seek, SeekFrom, Write};

use crate::foundation::error::{PsdError, PsdResult};

/// Seekable byte sink with big-endian primitives and the reserve-then-patch
/// length-field idiom used throughout the container format.
pub(crate) struct DocumentSink<W: Write + Seek> {
    inner: W,
}

impl<W: Write + Seek> DocumentSink<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }

    pub(crate) fn position(&mut self) -> PsdResult<u64> {
        Ok(self.inner.stream_position()?)
    }

    pub(crate) fn put_bytes(&mut self, bytes: &[u8]) -> PsdResult<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    pub(crate) fn put_u8(&mut self, v: u8) -> PsdResult<()> {
        self.put_bytes(&[v])
    }

    pub(crate) fn put_u16(&mut self, v: u16) -> PsdResult<()> {
        self.put_bytes(&v.to_be_bytes())
    }

    pub(crate) fn put_u32(&mut self, v: u32) -> PsdResult<()> {
        self.put_bytes(&v.to_be_bytes())
    }

    pub(crate) fn put_i16(&mut self, v: i16) -> PsdResult<()> {
        self.put_bytes(&v.to_be_bytes())
    }

    pub(crate) fn put_i32(&mut self, v: i32) -> PsdResult<()> {
        self.put_bytes(&v.to_be_bytes())
    }

    /// Reserve a 4-byte big-endian length field, run `content`, then patch
    /// the field with the number of bytes `content` wrote. The patched value
    /// never includes the 4 length bytes themselves. Returns the patched
    /// length and leaves the sink positioned after the content.
    pub(crate) fn patched_u32<F>(&mut self, content: F) -> PsdResult<u32>
    where
        F: FnOnce(&mut Self) -> PsdResult<()>,
    {
        let field = self.position()?;
        self.put_u32(0)?;
        content(self)?;
        let end = self.position()?;
        let len = u32::try_from(end - field - 4)
            .map_err(|_| PsdError::validation("section length overflows a 4-byte field"))?;
        self.inner.seek(SeekFrom::Start(field))?;
        self.put_u32(len)?;
        self.inner.seek(SeekFrom::Start(end))?;
        Ok(len)
    }

    /// Append one zero byte if an odd number of bytes was written since
    /// `since`. Sections must end on an even boundary.
    pub(crate) fn pad_to_even(&mut self, since: u64) -> PsdResult<()> {
        if (self.position()? - since) % 2 == 1 {
            self.put_u8(0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
