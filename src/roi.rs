//! ROI adapter: the QOI-style lossless container, via `rapid-qoi`.
//!
//! Decoding reports the stored width, height and channel count verbatim.
//! Encoding always tags the image sRGB (colorspace byte 0), with the channel
//! count taken from the buffer.

use rapid_qoi::{Colors, Qoi};
use tracing::debug;

use crate::codec::{ImageDecoder, ImageEncoder};
use crate::error::ConvertError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::{PixelBuffer, PixelLayout};

const HEADER_LEN: usize = 14;

/// Pixels a single QOI_OP_RUN byte can cover.
const MAX_RUN: u64 = 62;

/// ROI decoder and encoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoiCodec;

fn stored_channels(colors: Colors) -> u8 {
    match colors {
        Colors::Srgb | Colors::Rgb => 3,
        Colors::SrgbLinA | Colors::Rgba => 4,
    }
}

fn srgb_colors(layout: PixelLayout) -> Colors {
    match layout {
        PixelLayout::Rgb8 => Colors::Srgb,
        PixelLayout::Rgba8 => Colors::SrgbLinA,
    }
}

impl ImageDecoder for RoiCodec {
    fn decode(&self, data: &[u8], limits: &Limits) -> Result<PixelBuffer, ConvertError> {
        let header = Qoi::decode_header(data)
            .map_err(|e| ConvertError::decode(ImageFormat::Roi, format!("{e:?}")))?;
        let channels = stored_channels(header.colors);
        debug!(
            width = header.width,
            height = header.height,
            channels,
            "read ROI header"
        );
        limits.check_image(header.width, header.height, channels)?;

        let pixel_count = u64::from(header.width) * u64::from(header.height);
        let max_pixels = data.len().saturating_sub(HEADER_LEN) as u64 * MAX_RUN;
        if pixel_count > max_pixels {
            return Err(ConvertError::decode(
                ImageFormat::Roi,
                format!(
                    "header claims {}x{} pixels but only {} bytes follow",
                    header.width,
                    header.height,
                    data.len() - HEADER_LEN
                ),
            ));
        }

        let (qoi, pixels) = Qoi::decode_alloc(data)
            .map_err(|e| ConvertError::decode(ImageFormat::Roi, format!("{e:?}")))?;

        PixelBuffer::new(qoi.width, qoi.height, stored_channels(qoi.colors), pixels)
    }
}

impl ImageEncoder for RoiCodec {
    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, ConvertError> {
        let qoi = Qoi {
            width: image.width(),
            height: image.height(),
            colors: srgb_colors(image.layout()),
        };
        qoi.encode_alloc(image.data())
            .map_err(|e| ConvertError::encode(ImageFormat::Roi, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: u8) -> PixelBuffer {
        let len = (width * height) as usize * usize::from(channels);
        let pixels = (0..len).map(|i| (i / 5) as u8).collect();
        PixelBuffer::new(width, height, channels, pixels).unwrap()
    }

    #[test]
    fn roundtrip_is_exact() {
        for channels in [3u8, 4] {
            let image = gradient(7, 5, channels);
            let encoded = RoiCodec.encode(&image).unwrap();
            let decoded = RoiCodec.decode(&encoded, &Limits::default()).unwrap();
            assert_eq!(decoded, image);
        }
    }

    #[test]
    fn header_records_channels_and_srgb() {
        let encoded = RoiCodec.encode(&gradient(2, 2, 4)).unwrap();
        assert_eq!(&encoded[..4], b"qoif");
        assert_eq!(&encoded[4..8], &2u32.to_be_bytes());
        assert_eq!(&encoded[8..12], &2u32.to_be_bytes());
        assert_eq!(encoded[12], 4);
        assert_eq!(encoded[13], 0);

        let encoded = RoiCodec.encode(&gradient(2, 2, 3)).unwrap();
        assert_eq!(encoded[12], 3);
        assert_eq!(encoded[13], 0);
    }

    #[test]
    fn linear_colorspace_is_decoded_verbatim() {
        let qoi = Qoi {
            width: 1,
            height: 1,
            colors: Colors::Rgba,
        };
        let encoded = qoi.encode_alloc(&[9, 8, 7, 6]).unwrap();
        let decoded = RoiCodec.decode(&encoded, &Limits::default()).unwrap();
        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded.data(), &[9, 8, 7, 6]);
    }

    #[test]
    fn malformed_is_decode_error() {
        for data in [&b""[..], &b"qoif"[..], &b"PNG not qoi at all, really"[..]] {
            assert!(matches!(
                RoiCodec.decode(data, &Limits::default()),
                Err(ConvertError::DecodeError {
                    format: ImageFormat::Roi,
                    ..
                })
            ));
        }
    }

    #[test]
    fn oversized_header_is_rejected_before_alloc() {
        let mut data = b"qoif".to_vec();
        data.extend_from_slice(&60_000u32.to_be_bytes());
        data.extend_from_slice(&60_000u32.to_be_bytes());
        data.extend_from_slice(&[4, 0, 0xfd, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(matches!(
            RoiCodec.decode(&data, &Limits::default()),
            Err(ConvertError::DecodeError { .. })
        ));
    }

    #[test]
    fn limits_are_checked_from_header() {
        let encoded = RoiCodec.encode(&gradient(8, 8, 3)).unwrap();
        let limits = Limits {
            max_memory_bytes: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            RoiCodec.decode(&encoded, &limits),
            Err(ConvertError::LimitExceeded(_))
        ));
    }
}
