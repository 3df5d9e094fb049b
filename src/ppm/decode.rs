//! Binary PPM (P6) header parsing and payload extraction.

use tracing::info;

use super::PpmHeader;
use super::lexer::{ByteCursor, HeaderValues, read_header_values};
use crate::error::ConvertError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

const MAGIC: &[u8; 2] = b"P6";

/// Largest maxval accepted (8 bits per sample).
pub(crate) const MAX_MAXVAL: u32 = 255;

/// PPM is always RGB.
pub(crate) const CHANNELS: u8 = 3;

/// Parse magic and header values, leaving `cursor` on the first payload byte.
pub(crate) fn parse_header(cursor: &mut ByteCursor<'_>) -> Result<PpmHeader, ConvertError> {
    for &expected in MAGIC {
        let byte = cursor.next_byte()?;
        if byte != expected {
            return Err(ConvertError::UnsupportedFormat(format!(
                "expected PPM magic \"P6\", found byte 0x{byte:02x} at offset {}",
                cursor.position() - 1
            )));
        }
    }

    let HeaderValues {
        width,
        height,
        maxval,
    } = read_header_values(cursor)?;

    if maxval > MAX_MAXVAL {
        return Err(ConvertError::InvalidHeader(format!(
            "maxval {maxval} exceeds {MAX_MAXVAL} (16-bit PPM is not supported)"
        )));
    }
    if width == 0 {
        return Err(ConvertError::InvalidHeader("PPM width is zero".into()));
    }
    if height == 0 {
        return Err(ConvertError::InvalidHeader("PPM height is zero".into()));
    }

    Ok(PpmHeader {
        width,
        height,
        maxval,
        data_offset: cursor.position(),
    })
}

/// Decode a whole P6 stream. Bytes past the payload are ignored.
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<PixelBuffer, ConvertError> {
    let mut cursor = ByteCursor::new(data);
    let header = parse_header(&mut cursor)?;
    info!(
        width = header.width,
        height = header.height,
        maxval = header.maxval,
        "read PPM header"
    );

    let len = limits.check_image(header.width, header.height, CHANNELS)?;
    let payload = cursor.take(len)?;

    PixelBuffer::new(header.width, header.height, CHANNELS, payload.to_vec())
}
