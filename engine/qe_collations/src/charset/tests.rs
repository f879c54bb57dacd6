use super::*;
use pretty_assertions::assert_eq;

#[test]
fn utf8_decodes_multibyte_sequences() {
    assert_eq!(Charset::Utf8mb4.decode("é".as_bytes()), Some(('é', 2)));
    assert_eq!(Charset::Utf8mb4.decode("€x".as_bytes()), Some(('€', 3)));
    assert_eq!(Charset::Utf8mb4.decode("😀".as_bytes()), Some(('😀', 4)));
}

#[test]
fn utf8_rejects_truncated_and_invalid_sequences() {
    assert_eq!(Charset::Utf8mb4.decode(&[0xE2, 0x82]), None);
    assert_eq!(Charset::Utf8mb4.decode(&[0xFF]), None);
    assert_eq!(Charset::Utf8mb4.decode(&[0xC0, 0x80]), None);
    assert_eq!(Charset::Utf8mb4.decode(&[]), None);
    assert_eq!(Charset::Utf8mb4.char_width(&[0xFF, b'a']), 1);
}

#[test]
fn single_byte_charsets() {
    assert_eq!(Charset::Latin1.decode(&[0xE9]), Some(('é', 1)));
    assert_eq!(Charset::Ascii.decode(&[0xE9]), None);
    assert_eq!(Charset::Binary.decode(&[0xFF]), Some(('\u{FF}', 1)));
}

#[test]
fn encode_reports_unrepresentable_characters() {
    let mut out = Vec::new();
    assert!(Charset::Latin1.encode('é', &mut out));
    assert!(!Charset::Latin1.encode('€', &mut out));
    assert!(!Charset::Ascii.encode('é', &mut out));
    assert!(Charset::Utf8mb4.encode('€', &mut out));
    assert_eq!(out, vec![0xE9, 0xE2, 0x82, 0xAC]);
}
