//! Character sets: how a byte string splits into characters.

use std::fmt;

/// The encodings the built-in collations are defined over.
///
/// `Latin1` is treated as ISO-8859-1 (each byte is the code point of the
/// same value).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Charset {
    /// Raw bytes; every byte is one "character".
    Binary,
    Ascii,
    Latin1,
    Utf8mb4,
}

impl Charset {
    pub const fn name(self) -> &'static str {
        match self {
            Charset::Binary => "binary",
            Charset::Ascii => "ascii",
            Charset::Latin1 => "latin1",
            Charset::Utf8mb4 => "utf8mb4",
        }
    }

    /// Decode the character at the start of `bytes`.
    ///
    /// Returns the character and its encoded width, or `None` if `bytes`
    /// is empty or starts with an invalid sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<(char, usize)> {
        let first = *bytes.first()?;
        match self {
            Charset::Binary | Charset::Latin1 => Some((char::from(first), 1)),
            Charset::Ascii => first.is_ascii().then_some((char::from(first), 1)),
            Charset::Utf8mb4 => decode_utf8(bytes),
        }
    }

    /// Append `c` encoded in this charset. Returns `false` when the charset
    /// cannot represent `c`; nothing is written in that case.
    pub fn encode(self, c: char, out: &mut Vec<u8>) -> bool {
        match self {
            Charset::Binary | Charset::Utf8mb4 => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                true
            }
            Charset::Latin1 => match u8::try_from(u32::from(c)) {
                Ok(b) => {
                    out.push(b);
                    true
                }
                Err(_) => false,
            },
            Charset::Ascii => {
                if c.is_ascii() {
                    out.push(c as u8);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Width in bytes of the character at the start of `bytes`.
    ///
    /// Invalid sequences count as one byte so slicing always progresses.
    pub fn char_width(self, bytes: &[u8]) -> usize {
        self.decode(bytes).map_or(1, |(_, width)| width)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_utf8(bytes: &[u8]) -> Option<(char, usize)> {
    let width = match bytes.first()? {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let encoded = bytes.get(..width)?;
    let c = std::str::from_utf8(encoded).ok()?.chars().next()?;
    Some((c, width))
}

#[cfg(test)]
mod tests;
