//! Property-based tests for the value container.
//!
//! Generated inputs check the invariants the comparison and hashing paths
//! rely on:
//! 1. Common-type selection is reflexive, symmetric and absorbs NULL
//! 2. Values that compare equal after a cast hash equally
//! 3. Float rendering reads back exactly and never writes `e+`
//! 4. Truncation respects character boundaries and pads binary with zeros
//! 5. Resolution is single-shot
//! 6. Decimals up to 65 digits are exact

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use std::sync::Arc;

use proptest::prelude::*;
use qe_collations::{CollationId, TypedCollation};
use qe_eval::{
    choose_common_type, format_float, null_safe_hashcode_of, EvalValue, ExpressionEnv, Literal,
    NULL_HASH,
};
use qe_types::{SqlType, SqlValue};

// -- Strategies --

fn sql_type_strategy() -> impl Strategy<Value = SqlType> {
    prop::sample::select(SqlType::ALL.to_vec())
}

fn utf8(text: &str) -> EvalValue {
    let collation = TypedCollation::coercible(CollationId::UTF8MB4_GENERAL_CI);
    EvalValue::from_value(&SqlValue::varchar(text), collation).unwrap()
}

fn hash(value: &SqlValue, ty: SqlType) -> u64 {
    null_safe_hashcode_of(value, CollationId::UTF8MB4_GENERAL_CI, ty).unwrap()
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_common_type_identity(ty in sql_type_strategy()) {
        prop_assert_eq!(choose_common_type(ty, ty).unwrap(), ty);
        prop_assert_eq!(choose_common_type(SqlType::Null, ty).unwrap(), SqlType::Null);
        prop_assert_eq!(choose_common_type(ty, SqlType::Null).unwrap(), SqlType::Null);
    }

    #[test]
    fn prop_common_type_symmetric(left in sql_type_strategy(), right in sql_type_strategy()) {
        prop_assert_eq!(
            choose_common_type(left, right).ok(),
            choose_common_type(right, left).ok()
        );
    }

    #[test]
    fn prop_integer_hash_matches_text_hash(n in any::<i64>()) {
        let from_int = hash(&SqlValue::int64(n), SqlType::Float64);
        let from_text = hash(&SqlValue::varchar(&n.to_string()), SqlType::Float64);
        prop_assert_eq!(from_int, from_text);

        if n >= 0 {
            prop_assert_eq!(
                hash(&SqlValue::int64(n), SqlType::Uint64),
                hash(&SqlValue::uint64(n as u64), SqlType::Uint64)
            );
        }
    }

    #[test]
    fn prop_small_decimal_hash_matches_integer(n in -(1i64 << 53)..(1i64 << 53)) {
        let from_int = hash(&SqlValue::int64(n), SqlType::Float64);
        let from_decimal = hash(&SqlValue::decimal(&format!("{n}.00")), SqlType::Float64);
        prop_assert_eq!(from_int, from_decimal);
    }

    #[test]
    fn prop_full_width_decimals_read_back_exactly(
        int_part in "[1-9][0-9]{0,34}",
        frac_part in "[0-9]{1,30}",
    ) {
        let literal = SqlValue::decimal(&format!("{int_part}.{frac_part}"));
        let value = EvalValue::from_value(&literal, TypedCollation::NUMERIC).unwrap();
        prop_assert_eq!(value.value(), literal);
    }

    #[test]
    fn prop_case_and_padding_do_not_change_hash(text in "[a-zA-Z0-9 ]{0,20}") {
        let padded = format!("{}   ", text.to_uppercase());
        prop_assert_eq!(
            hash(&SqlValue::varchar(&text.to_lowercase()), SqlType::VarChar),
            hash(&SqlValue::varchar(&padded), SqlType::VarChar)
        );
    }

    #[test]
    fn prop_null_hash_is_sentinel(ty in sql_type_strategy(), id in any::<u16>()) {
        prop_assert_eq!(
            null_safe_hashcode_of(&SqlValue::NULL, CollationId(id), ty).unwrap(),
            NULL_HASH
        );
    }

    #[test]
    fn prop_float_format_reads_back(f in any::<f64>()) {
        prop_assume!(f.is_finite());
        let text = String::from_utf8(format_float(SqlType::Float64, f)).unwrap();
        prop_assert!(!text.contains("e+"), "{}", text);
        prop_assert_eq!(text.parse::<f64>().unwrap(), f);

        let fixed = String::from_utf8(format_float(SqlType::Decimal, f)).unwrap();
        prop_assert!(!fixed.contains('e'), "{}", fixed);
    }

    #[test]
    fn prop_text_truncation_keeps_whole_characters(text in "\\PC{0,24}", size in 0usize..32) {
        let mut value = utf8(&text);
        value.truncate(size).unwrap();
        let bytes = value.bytes().unwrap().to_vec();
        let truncated = String::from_utf8(bytes).unwrap();
        let expected: String = text.chars().take(size).collect();
        prop_assert_eq!(truncated, expected);
    }

    #[test]
    fn prop_binary_truncation_pads_with_zeros(
        bytes in prop::collection::vec(any::<u8>(), 0..24),
        size in 0usize..32,
    ) {
        let mut value = EvalValue::from_value(&SqlValue::varbinary(&bytes), TypedCollation::BINARY).unwrap();
        value.truncate(size).unwrap();
        let out = value.bytes().unwrap();
        prop_assert_eq!(out.len(), size);
        let kept = size.min(bytes.len());
        prop_assert_eq!(&out[..kept], &bytes[..kept]);
        prop_assert!(out[kept..].iter().all(|&b| b == 0));
    }

    #[test]
    fn prop_letters_make_zero(text in "[a-zA-Z]{0,12}") {
        let mut value = utf8(&text);
        value.make_numeric().unwrap();
        prop_assert_eq!(value.float64().unwrap(), 0.0);
    }

    #[test]
    fn prop_resolution_is_single_shot(n in any::<i64>()) {
        let env = Arc::new(ExpressionEnv::default());
        let mut value = EvalValue::pending(env, Arc::new(Literal::new(SqlValue::int64(n))));
        value.resolve().unwrap();
        let once = value.debug_string();
        value.resolve().unwrap();
        value.resolve().unwrap();
        prop_assert_eq!(value.debug_string(), once);
        prop_assert_eq!(value.value(), SqlValue::int64(n));
    }
}
