//! Decode/encode capabilities the conversion pipeline depends on.
//!
//! The driver never names a concrete codec library; it asks the
//! [`Dispatcher`](crate::Dispatcher) for a decoder or encoder by format and
//! talks to it through these traits.

use crate::error::ConvertError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Turns a whole encoded file into a [`PixelBuffer`].
///
/// Implementations either return a fully populated buffer or an error; there
/// is no partial result.
pub trait ImageDecoder {
    fn decode(&self, data: &[u8], limits: &Limits) -> Result<PixelBuffer, ConvertError>;
}

/// Turns a [`PixelBuffer`] into the bytes of a whole encoded file.
pub trait ImageEncoder {
    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, ConvertError>;
}
