use super::*;

#[test]
fn integral_families_are_disjoint() {
    for ty in SqlType::ALL {
        assert!(
            !(ty.is_signed() && ty.is_unsigned()),
            "{ty} is both signed and unsigned"
        );
        if ty.is_integral() {
            assert!(ty.is_number());
            assert!(!ty.is_float());
        }
    }
}

#[test]
fn textual_covers_text_and_binary() {
    assert!(SqlType::VarChar.is_textual());
    assert!(SqlType::VarBinary.is_textual());
    assert!(SqlType::HexNum.is_text());
    assert!(!SqlType::HexNum.is_binary());
    assert!(!SqlType::Int64.is_textual());
    assert!(!SqlType::Date.is_textual());
}

#[test]
fn decimal_is_number_but_not_float() {
    assert!(SqlType::Decimal.is_number());
    assert!(!SqlType::Decimal.is_float());
    assert!(!SqlType::Decimal.is_integral());
}

#[test]
fn year_is_unsigned_integral() {
    assert!(SqlType::Year.is_unsigned());
    assert!(SqlType::Year.is_number());
}

#[test]
fn temporal_types_are_quoted_dates() {
    for ty in [
        SqlType::Date,
        SqlType::Time,
        SqlType::Datetime,
        SqlType::Timestamp,
    ] {
        assert!(ty.is_date());
        assert!(ty.is_quoted());
    }
    assert!(!SqlType::Year.is_date());
}

#[test]
fn display_uses_protocol_names() {
    assert_eq!(SqlType::Int64.to_string(), "INT64");
    assert_eq!(SqlType::VarBinary.to_string(), "VARBINARY");
    assert_eq!(SqlType::Null.to_string(), "NULL_TYPE");
}
