//! # roiconv
//!
//! Convert raster images between PNG, binary PPM (P6), and ROI, a QOI-style
//! lossless container.
//!
//! Every input is decoded into one canonical [`PixelBuffer`] (8-bit RGB or
//! RGBA, row-major, interleaved) and re-encoded from it.
//!
//! ## Formats
//!
//! | Format | Suffix | Decode | Encode | Backend |
//! |--------|--------|--------|--------|---------|
//! | PPM    | `.ppm` | yes    | no     | built-in P6 parser |
//! | PNG    | `.png` | yes    | yes    | `png` crate (`png` feature) |
//! | ROI    | `.roi` | yes    | yes    | `rapid-qoi` (`roi` feature) |
//!
//! Formats are chosen by exact, case-sensitive file name suffix.
//!
//! ## Channel normalization
//!
//! PNG inputs whose header describes exactly 3 channels (RGB, or a palette
//! without tRNS) decode as RGB; every other PNG (gray, gray+alpha, RGBA, or
//! anything with tRNS transparency) decodes as RGBA.
//! PPM is always RGB. ROI keeps whatever channel count it stores.
//!
//! ## Non-Goals
//!
//! - ASCII PPM (P3), 16-bit PPM, PPM comments
//! - Color-space conversion, metadata, animation
//! - Streaming decode
//!
//! ## Usage
//!
//! ```no_run
//! use roiconv::{Converter, Limits};
//!
//! let report = Converter::new()
//!     .with_limits(Limits {
//!         max_pixels: Some(100_000_000),
//!         ..Default::default()
//!     })
//!     .convert("input.ppm".as_ref(), "output.roi".as_ref())?;
//! println!("{report}");
//! # Ok::<(), roiconv::ConvertError>(())
//! ```

#![forbid(unsafe_code)]

mod codec;
mod convert;
mod dispatch;
mod error;
mod format;
mod limits;
mod pixel;

pub mod ppm;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "roi")]
pub mod roi;

use std::path::Path;

// Re-exports
pub use codec::{ImageDecoder, ImageEncoder};
pub use convert::{ConversionReport, Converter};
pub use dispatch::Dispatcher;
pub use error::ConvertError;
pub use format::ImageFormat;
pub use limits::Limits;
pub use pixel::{PixelBuffer, PixelLayout};

/// Decode binary PPM (P6) bytes.
pub fn decode_ppm(data: &[u8]) -> Result<PixelBuffer, ConvertError> {
    ppm::PpmDecoder.decode(data, &Limits::default())
}

/// Decode PNG bytes, normalizing to RGB or RGBA.
#[cfg(feature = "png")]
pub fn decode_png(data: &[u8]) -> Result<PixelBuffer, ConvertError> {
    png::PngCodec.decode(data, &Limits::default())
}

/// Encode as 8-bit PNG.
#[cfg(feature = "png")]
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, ConvertError> {
    png::PngCodec.encode(image)
}

/// Decode ROI bytes.
#[cfg(feature = "roi")]
pub fn decode_roi(data: &[u8]) -> Result<PixelBuffer, ConvertError> {
    roi::RoiCodec.decode(data, &Limits::default())
}

/// Encode as ROI, tagged sRGB.
#[cfg(feature = "roi")]
pub fn encode_roi(image: &PixelBuffer) -> Result<Vec<u8>, ConvertError> {
    roi::RoiCodec.encode(image)
}

/// Convert `input` to `output` with the default codecs and no limits.
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<ConversionReport, ConvertError> {
    Converter::new().convert(input.as_ref(), output.as_ref())
}
