//! PNG adapter over the `png` crate.
//!
//! Decoding follows a probe-then-force policy on the header's native channel
//! count. Palette images count as 3 channels and other color types count
//! their samples; a tRNS chunk adds one more. Exactly 3 native channels
//! decode as [`PixelLayout::Rgb8`], anything else is forced to
//! [`PixelLayout::Rgba8`]. Palettes and tRNS are expanded and 16-bit
//! samples are reduced to their high byte.
//!
//! Encoding writes 8-bit RGB or RGBA, whichever the buffer carries.

use std::io::Cursor;

use tracing::debug;

use crate::codec::{ImageDecoder, ImageEncoder};
use crate::error::ConvertError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::{PixelBuffer, PixelLayout, convert_channels};

/// PNG decoder and encoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

fn decode_err(err: impl std::fmt::Display) -> ConvertError {
    ConvertError::decode(ImageFormat::Png, err.to_string())
}

fn encode_err(err: impl std::fmt::Display) -> ConvertError {
    ConvertError::encode(ImageFormat::Png, err.to_string())
}

/// Most bytes of decoded output one input byte can yield: the deflate
/// ceiling (1032:1) times 1-bit samples widened to 8-bit RGBA (32x).
const MAX_EXPANSION: u64 = 1032 * 32;

/// Channel count the header describes, with tRNS counted as alpha.
pub(crate) fn native_channels(color: png::ColorType, has_trns: bool) -> usize {
    let base = match color {
        png::ColorType::Indexed => 3,
        other => other.samples(),
    };
    base + usize::from(has_trns)
}

/// Layout a PNG with `native` channels is decoded to.
pub(crate) fn normalized_layout(native: usize) -> PixelLayout {
    if native == 3 {
        PixelLayout::Rgb8
    } else {
        PixelLayout::Rgba8
    }
}

impl ImageDecoder for PngCodec {
    fn decode(&self, data: &[u8], limits: &Limits) -> Result<PixelBuffer, ConvertError> {
        let mut png_limits = png::Limits::default();
        if let Some(max) = limits.max_memory_bytes {
            png_limits.bytes = usize::try_from(max).unwrap_or(usize::MAX);
        }
        let mut decoder = png::Decoder::new_with_limits(Cursor::new(data), png_limits);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(decode_err)?;

        let (width, height, native_type, has_trns) = {
            let info = reader.info();
            (info.width, info.height, info.color_type, info.trns.is_some())
        };
        let native = native_channels(native_type, has_trns);
        let target = normalized_layout(native);
        debug!(
            width,
            height,
            native_color = ?native_type,
            has_trns,
            native_channels = native,
            channels = target.channels(),
            "read PNG header"
        );
        let out_len = limits.check_image(width, height, target.channels())?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| decode_err("cannot determine output buffer size"))?;
        limits.check_memory(buf_size)?;
        let claimed = out_len.max(buf_size) as u64;
        if claimed > data.len() as u64 * MAX_EXPANSION {
            return Err(decode_err(format!(
                "header claims {width}x{height} pixels but the file is only {} bytes",
                data.len()
            )));
        }
        let mut buf = vec![0u8; buf_size];
        let frame = reader.next_frame(&mut buf).map_err(decode_err)?;
        buf.truncate(frame.buffer_size());

        if frame.bit_depth != png::BitDepth::Eight {
            return Err(decode_err(format!(
                "unexpected {:?} output after expansion",
                frame.bit_depth
            )));
        }
        let samples = match frame.color_type {
            png::ColorType::Indexed => {
                return Err(decode_err("palette was not expanded"));
            }
            other => other.samples(),
        };
        // samples() is at most 4
        let pixels = convert_channels(buf, samples as u8, target)?;

        PixelBuffer::new(width, height, target.channels(), pixels)
    }
}

impl ImageEncoder for PngCodec {
    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, ConvertError> {
        let color = match image.layout() {
            PixelLayout::Rgb8 => png::ColorType::Rgb,
            PixelLayout::Rgba8 => png::ColorType::Rgba,
        };

        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(encode_err)?;
        writer.write_image_data(image.data()).map_err(encode_err)?;
        writer.finish().map_err(encode_err)?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_png(
        width: u32,
        height: u32,
        color: png::ColorType,
        depth: png::BitDepth,
        pixels: &[u8],
        plte: Option<&[u8]>,
        trns: Option<&[u8]>,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(plte) = plte {
            encoder.set_palette(plte.to_vec());
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns.to_vec());
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
        writer.finish().unwrap();
        out
    }

    fn decode(data: &[u8]) -> PixelBuffer {
        PngCodec.decode(data, &Limits::default()).unwrap()
    }

    #[test]
    fn rgb_stays_three_channels() {
        let pixels = [1, 2, 3, 4, 5, 6];
        let data = raw_png(2, 1, png::ColorType::Rgb, png::BitDepth::Eight, &pixels, None, None);
        let image = decode(&data);
        assert_eq!(image.channels(), 3);
        assert_eq!(image.data(), &pixels);
    }

    #[test]
    fn grayscale_is_forced_to_rgba() {
        let data = raw_png(2, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[10, 200], None, None);
        let image = decode(&data);
        assert_eq!(image.channels(), 4);
        assert_eq!(image.data(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn gray_alpha_is_forced_to_rgba() {
        let data = raw_png(
            1,
            1,
            png::ColorType::GrayscaleAlpha,
            png::BitDepth::Eight,
            &[77, 128],
            None,
            None,
        );
        let image = decode(&data);
        assert_eq!(image.channels(), 4);
        assert_eq!(image.data(), &[77, 77, 77, 128]);
    }

    #[test]
    fn rgba_passes_through() {
        let pixels = [1, 2, 3, 4, 5, 6, 7, 8];
        let data = raw_png(1, 2, png::ColorType::Rgba, png::BitDepth::Eight, &pixels, None, None);
        let image = decode(&data);
        assert_eq!(image.channels(), 4);
        assert_eq!(image.data(), &pixels);
    }

    #[test]
    fn indexed_without_trns_is_rgb() {
        let plte = [255, 0, 0, 0, 0, 255];
        let data = raw_png(
            2,
            1,
            png::ColorType::Indexed,
            png::BitDepth::Eight,
            &[1, 0],
            Some(&plte[..]),
            None,
        );
        let image = decode(&data);
        assert_eq!(image.layout(), PixelLayout::Rgb8);
        assert_eq!(image.data(), &[0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn indexed_transparency_is_kept() {
        let plte = [255, 0, 0, 0, 0, 255];
        let trns = [0, 255];
        let data = raw_png(
            2,
            1,
            png::ColorType::Indexed,
            png::BitDepth::Eight,
            &[0, 1],
            Some(&plte[..]),
            Some(&trns[..]),
        );
        let image = decode(&data);
        assert_eq!(image.layout(), PixelLayout::Rgba8);
        assert_eq!(image.data(), &[255, 0, 0, 0, 0, 0, 255, 255]);
    }

    #[test]
    fn rgb_with_trns_is_forced_to_rgba() {
        let key = [0, 9, 0, 9, 0, 9];
        let data = raw_png(
            2,
            1,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            &[1, 2, 3, 9, 9, 9],
            None,
            Some(&key[..]),
        );
        let image = decode(&data);
        assert_eq!(image.layout(), PixelLayout::Rgba8);
        assert_eq!(image.data(), &[1, 2, 3, 255, 9, 9, 9, 0]);
    }

    #[test]
    fn gray_with_trns_keys_alpha() {
        let key = [0, 10];
        let data = raw_png(
            2,
            1,
            png::ColorType::Grayscale,
            png::BitDepth::Eight,
            &[10, 200],
            None,
            Some(&key[..]),
        );
        let image = decode(&data);
        assert_eq!(image.data(), &[10, 10, 10, 0, 200, 200, 200, 255]);
    }

    #[test]
    fn native_channel_count_counts_trns() {
        use png::ColorType::*;
        assert_eq!(native_channels(Grayscale, false), 1);
        assert_eq!(native_channels(GrayscaleAlpha, false), 2);
        assert_eq!(native_channels(Rgb, false), 3);
        assert_eq!(native_channels(Rgb, true), 4);
        assert_eq!(native_channels(Rgba, false), 4);
        assert_eq!(native_channels(Indexed, false), 3);
        assert_eq!(native_channels(Indexed, true), 4);
        assert_eq!(normalized_layout(3), PixelLayout::Rgb8);
        for n in [1, 2, 4] {
            assert_eq!(normalized_layout(n), PixelLayout::Rgba8);
        }
    }

    #[test]
    fn sixteen_bit_is_stripped() {
        let data = raw_png(
            1,
            1,
            png::ColorType::Rgb,
            png::BitDepth::Sixteen,
            &[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc],
            None,
            None,
        );
        let image = decode(&data);
        assert_eq!(image.channels(), 3);
        assert_eq!(image.data(), &[0x12, 0x56, 0x9a]);
    }

    #[test]
    fn encode_roundtrip_keeps_channel_count() {
        for channels in [3u8, 4] {
            let len = 3 * 2 * usize::from(channels);
            let pixels: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
            let image = PixelBuffer::new(3, 2, channels, pixels.clone()).unwrap();
            let encoded = PngCodec.encode(&image).unwrap();
            assert_eq!(&encoded[..8], b"\x89PNG\r\n\x1a\n");
            let decoded = decode(&encoded);
            assert_eq!(decoded, image);
        }
    }

    #[test]
    fn garbage_is_decode_error() {
        let err = PngCodec.decode(b"not a png", &Limits::default()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::DecodeError {
                format: ImageFormat::Png,
                ..
            }
        ));
    }

    #[test]
    fn limits_are_checked_from_header() {
        let data = raw_png(4, 4, png::ColorType::Rgb, png::BitDepth::Eight, &[0; 48], None, None);
        let limits = Limits {
            max_width: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            PngCodec.decode(&data, &limits),
            Err(ConvertError::LimitExceeded(_))
        ));
    }

    fn crc32(bytes: &[u8]) -> u32 {
        let mut crc = !0u32;
        for &b in bytes {
            crc ^= u32::from(b);
            for _ in 0..8 {
                crc = if crc & 1 == 1 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
            }
        }
        !crc
    }

    fn chunk(out: &mut Vec<u8>, kind: &[u8; 4], body: &[u8]) {
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        let start = out.len();
        out.extend_from_slice(kind);
        out.extend_from_slice(body);
        let crc = crc32(&out[start..]);
        out.extend_from_slice(&crc.to_be_bytes());
    }

    #[test]
    fn oversized_header_is_rejected_before_alloc() {
        // 50000x50000 RGBA claimed by a file with an empty IDAT
        let mut ihdr = Vec::new();
        ihdr.extend_from_slice(&50_000u32.to_be_bytes());
        ihdr.extend_from_slice(&50_000u32.to_be_bytes());
        ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);

        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        chunk(&mut data, b"IHDR", &ihdr);
        chunk(&mut data, b"IDAT", &[]);
        chunk(&mut data, b"IEND", &[]);

        match PngCodec.decode(&data, &Limits::default()) {
            Err(ConvertError::DecodeError { .. }) | Err(ConvertError::LimitExceeded(_)) => {}
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
