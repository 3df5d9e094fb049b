use crate::error::ConvertError;

/// Resource limits applied by every decoder before the pixel payload is
/// allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), ConvertError> {
    match limit {
        Some(max) if value > max => Err(ConvertError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Reject dimensions above any configured cap.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        within("width", u64::from(width), self.max_width)?;
        within("height", u64::from(height), self.max_height)?;
        within(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// Reject an allocation of `bytes` above the memory cap.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), ConvertError> {
        within("allocation bytes", bytes as u64, self.max_memory_bytes)
    }

    /// Dimension and memory checks for a decoded buffer of the given shape.
    pub(crate) fn check_image(
        &self,
        width: u32,
        height: u32,
        channels: u8,
    ) -> Result<usize, ConvertError> {
        self.check(width, height)?;
        let bytes = crate::pixel::buffer_len(width, height, channels)?;
        self.check_memory(bytes)?;
        Ok(bytes)
    }
}
