//! In-memory byte cursor shared by the encoder and decoder.

use crate::{Result, WireError};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A byte source paired with a growable output buffer.
///
/// Reads consume the input handed to [`Stream::from`] and never cross the current limit. The
/// limit defaults to the end of the input and is narrowed with [`Stream::push_limit`] while a
/// length-delimited payload is being read. Writes always append to the output buffer.
#[derive(Debug, Default, Clone)]
pub struct Stream {
    input: Bytes,
    input_len: usize,
    limit: Option<usize>,
    output: BytesMut,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stream that can take `capacity` written bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: BytesMut::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.input_len - self.input.remaining()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Number of bytes that can still be read before the current limit.
    pub fn remaining(&self) -> usize {
        match self.limit {
            Some(end) => end.saturating_sub(self.position()),
            None => self.input.remaining(),
        }
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(WireError::TruncatedInput { needed, remaining });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.input.get_u8())
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.input.get_u32_le())
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.input.get_u64_le())
    }

    /// Takes the next `len` bytes. The result shares the input's allocation.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        self.ensure(len)?;
        Ok(self.input.copy_to_bytes(len))
    }

    pub fn write_u8(&mut self, byte: u8) {
        self.output.put_u8(byte);
    }

    pub fn write_u32_le(&mut self, value: u32) {
        self.output.put_u32_le(value);
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.output.put_u64_le(value);
    }

    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.output.put_slice(bytes);
    }

    /// Restricts reads to the next `len` bytes and returns the previous limit.
    ///
    /// Pass the returned value to [`Stream::pop_limit`] once the bounded region has been consumed.
    ///
    /// # Errors
    /// Returns [`WireError::TruncatedInput`] if fewer than `len` bytes are readable.
    pub fn push_limit(&mut self, len: usize) -> Result<Option<usize>> {
        self.ensure(len)?;
        let previous = self.limit;
        self.limit = Some(self.position() + len);
        Ok(previous)
    }

    pub fn pop_limit(&mut self, previous: Option<usize>) {
        self.limit = previous;
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.output
    }

    /// Freezes the written bytes.
    pub fn into_bytes(self) -> Bytes {
        self.output.freeze()
    }
}

impl From<Bytes> for Stream {
    fn from(input: Bytes) -> Self {
        Self {
            input_len: input.len(),
            input,
            ..Self::default()
        }
    }
}

impl From<BytesMut> for Stream {
    fn from(buf: BytesMut) -> Self {
        Self::from(buf.freeze())
    }
}

impl From<Vec<u8>> for Stream {
    fn from(vec: Vec<u8>) -> Self {
        Self::from(Bytes::from(vec))
    }
}

impl From<&[u8]> for Stream {
    fn from(slice: &[u8]) -> Self {
        Self::from(Bytes::copy_from_slice(slice))
    }
}

impl From<Stream> for Bytes {
    fn from(stream: Stream) -> Self {
        stream.into_bytes()
    }
}
