use crate::error::ConvertError;

/// Pixel memory layout of a [`PixelBuffer`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
}

impl PixelLayout {
    /// Layout for a channel count, if it is one the pipeline carries.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> u8 {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.channels())
    }
}

/// Byte length of a `width x height` image with `channels` 8-bit samples per pixel.
pub(crate) fn buffer_len(width: u32, height: u32, channels: u8) -> Result<usize, ConvertError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(usize::from(channels)))
        .ok_or(ConvertError::DimensionsTooLarge { width, height })
}

/// Canonical decoded image: dimensions, channel count, and interleaved
/// row-major 8-bit samples.
///
/// A `PixelBuffer` always satisfies `data.len() == width * height * channels`
/// with `channels` in {3, 4}. Only decoders create one; encoders borrow it.
#[derive(Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Validate and wrap decoded samples.
    ///
    /// Fails with [`ConvertError::InvalidDimensions`] if either dimension is
    /// zero, [`ConvertError::UnsupportedChannels`] if `channels` is not 3 or 4,
    /// and [`ConvertError::BufferLengthMismatch`] if `data` has the wrong length.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidDimensions { width, height });
        }
        let layout =
            PixelLayout::from_channels(channels).ok_or(ConvertError::UnsupportedChannels(channels))?;
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(ConvertError::BufferLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.layout.channels()
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Interleaved samples, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the samples.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Convert interleaved 8-bit samples from `src_channels` (1..=4) per pixel to
/// `target`.
///
/// Gray is replicated into R, G and B. A missing alpha becomes 255; a
/// surplus alpha is dropped. Same-layout input is returned without copying.
pub(crate) fn convert_channels(
    src: Vec<u8>,
    src_channels: u8,
    target: PixelLayout,
) -> Result<Vec<u8>, ConvertError> {
    if src_channels == target.channels() {
        return Ok(src);
    }
    let step = usize::from(src_channels);
    if step == 0 || step > 4 || src.len() % step != 0 {
        return Err(ConvertError::UnsupportedChannels(src_channels));
    }
    let pixel_count = src.len() / step;
    let mut out = Vec::with_capacity(pixel_count * target.bytes_per_pixel());

    for px in src.chunks_exact(step) {
        let (rgb, alpha) = match px {
            [g] => ([*g, *g, *g], 255),
            [g, a] => ([*g, *g, *g], *a),
            [r, g, b] => ([*r, *g, *b], 255),
            [r, g, b, a] => ([*r, *g, *b], *a),
            _ => return Err(ConvertError::UnsupportedChannels(src_channels)),
        };
        out.extend_from_slice(&rgb);
        if target == PixelLayout::Rgba8 {
            out.push(alpha);
        }
    }

    Ok(out)
}
