//! Binary PPM (P6), 8 bits per sample. Decode only.
//!
//! The header is read by a hand-written tokenizer rather than a library. ASCII
//! PPM (P3), 16-bit samples and `#` comments are not supported; see
//! the `lexer` module for how comments are actually treated.

mod decode;
mod lexer;

use crate::codec::ImageDecoder;
use crate::error::ConvertError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Parsed P6 header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PpmHeader {
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    /// Offset of the first payload byte.
    pub data_offset: usize,
}

impl PpmHeader {
    /// Parse and validate the header without touching the payload.
    pub fn parse(data: &[u8]) -> Result<Self, ConvertError> {
        decode::parse_header(&mut lexer::ByteCursor::new(data))
    }
}

/// The built-in P6 decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct PpmDecoder;

impl ImageDecoder for PpmDecoder {
    fn decode(&self, data: &[u8], limits: &Limits) -> Result<PixelBuffer, ConvertError> {
        decode::decode(data, limits)
    }
}
