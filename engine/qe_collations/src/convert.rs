//! Charset re-encoding and character-aware slicing.

use crate::{Charset, Collation, CollationError};

/// Replacement written when the destination charset cannot hold a character.
const REPLACEMENT: u8 = b'?';

/// Re-encode `bytes` from `src`'s charset into `dst`'s.
///
/// Bytes are copied verbatim when the charsets match or either side is
/// `binary`. Characters the destination cannot represent become `?`; an
/// invalid sequence in the source is an error.
pub fn convert(
    dst: &dyn Collation,
    bytes: &[u8],
    src: &dyn Collation,
) -> Result<Vec<u8>, CollationError> {
    let (from, to) = (src.charset(), dst.charset());
    if from == to || from == Charset::Binary || to == Charset::Binary {
        return Ok(bytes.to_vec());
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut offset = 0;
    while offset < bytes.len() {
        let Some((c, width)) = from.decode(&bytes[offset..]) else {
            return Err(CollationError::InvalidSequence {
                charset: from,
                offset,
            });
        };
        if !to.encode(c, &mut out) {
            out.push(REPLACEMENT);
        }
        offset += width;
    }
    Ok(out)
}

/// The characters `start..end` of `bytes` in `collation`'s charset.
///
/// Offsets count characters, not bytes, so a multi-byte character is never
/// split. Out-of-range offsets clamp to the end of the input.
pub fn slice<'a>(collation: &dyn Collation, bytes: &'a [u8], start: usize, end: usize) -> &'a [u8] {
    let charset = collation.charset();
    let mut byte_start = bytes.len();
    let mut offset = 0;
    let mut index = 0;
    while offset < bytes.len() {
        if index == start {
            byte_start = offset;
        }
        if index == end {
            return &bytes[byte_start.min(offset)..offset];
        }
        offset += charset.char_width(&bytes[offset..]);
        index += 1;
    }
    let offset = offset.min(bytes.len());
    if index == start {
        byte_start = offset;
    }
    &bytes[byte_start.min(offset)..offset]
}
