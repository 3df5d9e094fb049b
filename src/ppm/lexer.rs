//! Byte cursor and header tokenizer for binary PPM.
//!
//! The tokenizer is a three-field state machine. Any non-digit byte counts as
//! a separator, so `#` comments are skipped only when their text holds no
//! digits; a comment such as `# 640x480` is read as header values.

use std::fmt;

use crate::error::ConvertError;

/// Bounds-checked forward reader over the input bytes.
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn next_byte(&mut self) -> Result<u8, ConvertError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(ConvertError::TruncatedData {
                needed: self.pos + 1,
                actual: self.data.len(),
            })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read exactly `len` bytes.
    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], ConvertError> {
        let bytes = self
            .pos
            .checked_add(len)
            .and_then(|end| self.data.get(self.pos..end))
            .ok_or(ConvertError::TruncatedData {
                needed: self.pos.saturating_add(len),
                actual: self.data.len(),
            })?;
        self.pos += len;
        Ok(bytes)
    }
}

/// Header value being read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Field {
    Width,
    Height,
    Maxval,
}

impl Field {
    fn next(self) -> Option<Field> {
        match self {
            Field::Width => Some(Field::Height),
            Field::Height => Some(Field::Maxval),
            Field::Maxval => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Width => "width",
            Field::Height => "height",
            Field::Maxval => "maxval",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LexState {
    /// Skipping separator bytes before the field.
    Seek(Field),
    /// Inside the field's digits, carrying the value so far.
    Digits(Field, u32),
    /// Maxval finished; its terminating byte has been consumed.
    Done,
}

impl LexState {
    pub(crate) const START: LexState = LexState::Seek(Field::Width);
}

/// Values collected by the tokenizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct HeaderValues {
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
}

impl HeaderValues {
    fn with(mut self, field: Field, value: u32) -> Self {
        match field {
            Field::Width => self.width = value,
            Field::Height => self.height = value,
            Field::Maxval => self.maxval = value,
        }
        self
    }
}

/// One tokenizer transition: `(state, values, byte) -> (state, values)`.
///
/// Digits accumulate base-10; the first non-digit after a run of digits
/// commits the field and is consumed. Overflowing `u32` is an invalid header.
pub(crate) fn step(
    state: LexState,
    values: HeaderValues,
    byte: u8,
) -> Result<(LexState, HeaderValues), ConvertError> {
    let digit = byte.is_ascii_digit().then(|| u32::from(byte - b'0'));
    match (state, digit) {
        (LexState::Seek(field), None) => Ok((LexState::Seek(field), values)),
        (LexState::Seek(field), Some(d)) => Ok((LexState::Digits(field, d), values)),
        (LexState::Digits(field, acc), Some(d)) => {
            let acc = acc
                .checked_mul(10)
                .and_then(|v| v.checked_add(d))
                .ok_or_else(|| ConvertError::InvalidHeader(format!("{field} overflows u32")))?;
            Ok((LexState::Digits(field, acc), values))
        }
        (LexState::Digits(field, acc), None) => {
            let next = field.next().map_or(LexState::Done, LexState::Seek);
            Ok((next, values.with(field, acc)))
        }
        (LexState::Done, _) => Ok((LexState::Done, values)),
    }
}

/// Drive the tokenizer until width, height and maxval are read.
pub(crate) fn read_header_values(cursor: &mut ByteCursor<'_>) -> Result<HeaderValues, ConvertError> {
    let mut state = LexState::START;
    let mut values = HeaderValues::default();
    while state != LexState::Done {
        let byte = cursor.next_byte()?;
        (state, values) = step(state, values, byte)?;
    }
    Ok(values)
}
