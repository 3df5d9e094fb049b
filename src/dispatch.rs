//! Format dispatch: path suffix → format tag → codec.

use std::path::Path;

use crate::codec::{ImageDecoder, ImageEncoder};
use crate::error::ConvertError;
use crate::format::ImageFormat;

/// Registry of the decoder and encoder available for each format.
///
/// [`Dispatcher::default`] registers the built-in PPM decoder and, when their
/// cargo features are enabled, the PNG and ROI codecs. PPM never gets an
/// encoder, so `.ppm` is never a valid output.
pub struct Dispatcher {
    decoders: Vec<(ImageFormat, Box<dyn ImageDecoder>)>,
    encoders: Vec<(ImageFormat, Box<dyn ImageEncoder>)>,
}

impl Dispatcher {
    /// A dispatcher with no codecs registered.
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
            encoders: Vec::new(),
        }
    }

    /// Register (or replace) the decoder for `format`.
    pub fn with_decoder(mut self, format: ImageFormat, decoder: impl ImageDecoder + 'static) -> Self {
        self.decoders.retain(|(f, _)| *f != format);
        self.decoders.push((format, Box::new(decoder)));
        self
    }

    /// Register (or replace) the encoder for `format`. PPM encoders are ignored.
    pub fn with_encoder(mut self, format: ImageFormat, encoder: impl ImageEncoder + 'static) -> Self {
        if format == ImageFormat::Ppm {
            return self;
        }
        self.encoders.retain(|(f, _)| *f != format);
        self.encoders.push((format, Box::new(encoder)));
        self
    }

    pub fn decoder(&self, format: ImageFormat) -> Option<&dyn ImageDecoder> {
        self.decoders
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, d)| d.as_ref())
    }

    pub fn encoder(&self, format: ImageFormat) -> Option<&dyn ImageEncoder> {
        self.encoders
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, e)| e.as_ref())
    }

    /// Select the decoder for an input path by suffix. Reads nothing.
    pub fn decoder_for(&self, path: &Path) -> Result<(ImageFormat, &dyn ImageDecoder), ConvertError> {
        ImageFormat::from_path(path)
            .and_then(|format| Some((format, self.decoder(format)?)))
            .ok_or_else(|| ConvertError::UnrecognizedInputFormat(path.to_path_buf()))
    }

    /// Select the encoder for an output path by suffix. Writes nothing.
    pub fn encoder_for(&self, path: &Path) -> Result<(ImageFormat, &dyn ImageEncoder), ConvertError> {
        ImageFormat::from_path(path)
            .and_then(|format| Some((format, self.encoder(format)?)))
            .ok_or_else(|| ConvertError::UnrecognizedOutputFormat(path.to_path_buf()))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        let dispatcher = Self::empty().with_decoder(ImageFormat::Ppm, crate::ppm::PpmDecoder);

        #[cfg(feature = "png")]
        let dispatcher = dispatcher
            .with_decoder(ImageFormat::Png, crate::png::PngCodec)
            .with_encoder(ImageFormat::Png, crate::png::PngCodec);

        #[cfg(feature = "roi")]
        let dispatcher = dispatcher
            .with_decoder(ImageFormat::Roi, crate::roi::RoiCodec)
            .with_encoder(ImageFormat::Roi, crate::roi::RoiCodec);

        dispatcher
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("decoders", &self.decoders.iter().map(|(f, _)| f).collect::<Vec<_>>())
            .field("encoders", &self.encoders.iter().map(|(f, _)| f).collect::<Vec<_>>())
            .finish()
    }
}
