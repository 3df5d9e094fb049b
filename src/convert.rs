//! Conversion driver: detect → decode → select encoder → encode → write.
//!
//! Every failure is terminal and returned as-is. The output file is written
//! only after encoding succeeds, so a failed run never creates or truncates
//! it.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::dispatch::Dispatcher;
use crate::error::ConvertError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Summary of a successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub input_format: ImageFormat,
    pub output_format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}x{}, {} channels, {} -> {} bytes",
            self.input_format,
            self.output_format,
            self.width,
            self.height,
            self.channels,
            self.bytes_read,
            self.bytes_written
        )
    }
}

/// Runs one input file through decode and encode.
#[derive(Debug, Default)]
pub struct Converter {
    dispatcher: Dispatcher,
    limits: Limits,
}

impl Converter {
    /// A converter with the default codecs and no limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Decode `data` as `format`.
    pub fn decode(&self, format: ImageFormat, data: &[u8]) -> Result<PixelBuffer, ConvertError> {
        let decoder = self
            .dispatcher
            .decoder(format)
            .ok_or(ConvertError::NoDecoder(format))?;
        decoder.decode(data, &self.limits)
    }

    /// Encode `image` as `format`, consuming it.
    pub fn encode(&self, format: ImageFormat, image: PixelBuffer) -> Result<Vec<u8>, ConvertError> {
        let encoder = self
            .dispatcher
            .encoder(format)
            .ok_or(ConvertError::NoEncoder(format))?;
        encoder.encode(&image)
    }

    /// Convert `input` to `output`, choosing both codecs by file suffix.
    ///
    /// The input suffix is checked before the file is opened. The output
    /// suffix is checked after a successful decode, matching the order of the
    /// pipeline stages.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionReport, ConvertError> {
        trace!(input = %input.display(), output = %output.display(), "convert");

        let (input_format, decoder) = self.dispatcher.decoder_for(input)?;
        let data = fs::read(input).map_err(|source| ConvertError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let image = decoder.decode(&data, &self.limits)?;
        debug!(
            format = %input_format,
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            "decoded"
        );

        let (output_format, encoder) = self.dispatcher.encoder_for(output)?;
        let (width, height, channels) = (image.width(), image.height(), image.channels());
        let encoded = encoder.encode(&image)?;
        drop(image);

        fs::write(output, &encoded).map_err(|source| ConvertError::Write {
            path: output.to_path_buf(),
            source,
        })?;

        let report = ConversionReport {
            input_format,
            output_format,
            width,
            height,
            channels,
            bytes_read: data.len(),
            bytes_written: encoded.len(),
        };
        info!(
            input = %input.display(),
            output = %output.display(),
            %report,
            "converted"
        );
        Ok(report)
    }
}
