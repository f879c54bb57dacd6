use super::*;
use crate::{EvalConfig, ErrorCode};
use pretty_assertions::assert_eq;
use qe_collations::CollationId;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Writes a fixed value and counts how often it ran.
#[derive(Debug)]
struct Counting {
    runs: AtomicUsize,
    ty: SqlType,
    flags: ValueFlags,
    result: Option<i64>,
}

impl Counting {
    fn int(i: i64) -> Arc<Self> {
        Arc::new(Counting {
            runs: AtomicUsize::new(0),
            ty: SqlType::Int64,
            flags: ValueFlags::NULLABLE,
            result: Some(i),
        })
    }

    fn null() -> Arc<Self> {
        Arc::new(Counting {
            runs: AtomicUsize::new(0),
            ty: SqlType::Int64,
            flags: ValueFlags::NULLABLE,
            result: None,
        })
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Expr for Counting {
    fn type_of(&self, _env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        (self.ty, self.flags)
    }

    fn eval(&self, _env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match self.result {
            Some(i) => out.set_int64(i),
            None => out.set_null(),
        }
        Ok(())
    }
}

/// Always fails.
#[derive(Debug)]
struct Failing;

impl Expr for Failing {
    fn type_of(&self, _env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        (SqlType::Int64, ValueFlags::empty())
    }

    fn eval(&self, _env: &Arc<ExpressionEnv>, _out: &mut EvalValue) -> EvalResult {
        Err(crate::errors::could_not_parse("boom"))
    }
}

/// Claims `INT64` but writes a float.
#[derive(Debug)]
struct Mistyped;

impl Expr for Mistyped {
    fn type_of(&self, _env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        (SqlType::Int64, ValueFlags::empty())
    }

    fn eval(&self, _env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        out.set_float(1.0);
        Ok(())
    }
}

fn env() -> Arc<ExpressionEnv> {
    Arc::new(ExpressionEnv::default())
}

fn utf8() -> TypedCollation {
    TypedCollation::coercible(CollationId::UTF8MB4_GENERAL_CI)
}

// === Resolution ===

#[test]
fn resolve_runs_expression_once() {
    let expr = Counting::int(9);
    let mut value = EvalValue::pending(env(), expr.clone());
    assert_eq!(expr.runs(), 0);
    assert_eq!(value.type_of(), SqlType::Int64);

    assert_eq!(value.int64().unwrap(), 9);
    value.resolve().unwrap();
    assert_eq!(value.uint64().unwrap(), 9);
    assert_eq!(expr.runs(), 1);
}

#[test]
fn null_check_is_two_phase() {
    // Not nullable: answered from the flags.
    let expr = Arc::new(Counting {
        runs: AtomicUsize::new(0),
        ty: SqlType::Int64,
        flags: ValueFlags::empty(),
        result: Some(1),
    });
    let mut value = EvalValue::pending(env(), expr.clone());
    assert!(!value.null().unwrap());
    assert_eq!(expr.runs(), 0);

    // Known NULL: answered from the flags.
    let known = Arc::new(Counting {
        runs: AtomicUsize::new(0),
        ty: SqlType::Null,
        flags: ValueFlags::NULLABLE | ValueFlags::NULL,
        result: None,
    });
    let mut value = EvalValue::pending(env(), known.clone());
    assert!(value.null().unwrap());
    assert_eq!(known.runs(), 0);

    // Nullable: evaluates.
    let maybe = Counting::null();
    let mut value = EvalValue::pending(env(), maybe.clone());
    assert!(value.null().unwrap());
    assert_eq!(maybe.runs(), 1);

    let not_null = Counting::int(3);
    let mut value = EvalValue::pending(env(), not_null.clone());
    assert!(!value.null().unwrap());
    assert_eq!(not_null.runs(), 1);
}

#[test]
fn failed_resolve_keeps_reporting_the_error() {
    let mut value = EvalValue::pending(env(), Arc::new(Failing));
    let err = value.resolve().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);

    assert!(!value.is_pending());
    assert_eq!(value.resolve().unwrap_err(), err);
    assert_eq!(value.int64().unwrap_err(), err);
    assert_eq!(value.float64().unwrap_err(), err);
    assert_eq!(value.bytes().unwrap_err(), err);
}

#[test]
fn missing_bind_variable_fails_on_every_read() {
    let mut value = EvalValue::pending(env(), Arc::new(crate::BindVariable::new("missing")));
    let first = value.int64().unwrap_err();
    let second = value.int64().unwrap_err();
    assert_eq!(first, second);
    assert!(value.null().is_err());
}

#[test]
fn failed_value_renders_its_error() {
    let mut value = EvalValue::pending(env(), Arc::new(Failing));
    let err = value.resolve().unwrap_err();
    assert_eq!(value.debug_string(), format!("(INT64) <failed: {err}>"));
    assert_eq!(value.to_string(), format!("<failed INT64: {err}>"));
}

#[test]
#[should_panic(expected = "evaluation failed")]
fn payload_of_failed_value_panics() {
    let mut value = EvalValue::pending(env(), Arc::new(Failing));
    let _ = value.resolve();
    let _ = value.payload();
}

#[test]
fn typecheck_catches_changed_type() {
    let strict = Arc::new(ExpressionEnv::new(EvalConfig::default().with_typecheck_eval(true)));
    let mut value = EvalValue::pending(strict, Arc::new(Mistyped));
    let err = value.resolve().unwrap_err();
    assert_eq!(err.code, ErrorCode::Internal);
    assert_eq!(
        err.kind,
        crate::EvalErrorKind::TypeNotPrecomputed {
            before: SqlType::Int64,
            after: SqlType::Float64,
        }
    );
    assert_eq!(value.float64().unwrap_err(), err);

    let mut lenient = EvalValue::pending(env(), Arc::new(Mistyped));
    assert_eq!(lenient.float64().unwrap(), 1.0);
}

#[test]
#[should_panic(expected = "did not resolve EvalValue")]
fn value_of_unresolved_panics() {
    let value = EvalValue::pending(env(), Counting::int(1));
    let _ = value.value();
}

#[test]
#[should_panic(expected = "does not hold a float64 payload")]
fn mismatched_accessor_panics() {
    let mut value = EvalValue::from_int64(1);
    let _ = value.float64();
}

#[test]
fn reset_returns_to_blank() {
    let mut value = EvalValue::pending(env(), Counting::int(1));
    value.reset();
    assert!(!value.is_pending());
    assert_eq!(value.type_of(), SqlType::Null);
    assert_eq!(value.value(), SqlValue::NULL);
}

#[test]
fn display_shows_unresolved_type() {
    let value = EvalValue::pending(env(), Counting::int(1));
    assert_eq!(value.to_string(), "<unresolved INT64>");
    assert_eq!(EvalValue::from_int64(3).to_string(), "INT64(3)");
}

// === Setters and flags ===

#[test]
fn integer_setters_track_boundaries() {
    let mut value = EvalValue::from_int64(i64::MIN);
    assert!(value.has_flag(ValueFlags::INTEGER_UDF));
    value.set_int64(0);
    assert!(!value.has_flag(ValueFlags::INTEGER_RANGE));

    value.set_uint64(crate::SIGNED_CAP);
    assert!(value.has_flag(ValueFlags::INTEGER_CAP));
    assert!(!value.has_flag(ValueFlags::INTEGER_OVF));
    value.set_uint64(crate::SIGNED_CAP + 1);
    assert!(value.has_flag(ValueFlags::INTEGER_OVF));
    assert!(!value.has_flag(ValueFlags::INTEGER_CAP));

    let copy = value.clone();
    assert!(copy.has_flag(ValueFlags::INTEGER_OVF));

    value.set_float(1.0);
    assert!(!value.has_flag(ValueFlags::INTEGER_RANGE));
}

#[test]
fn set_boolean_maps_three_values() {
    let mut value = EvalValue::default();
    value.set_boolean(Boolean::True);
    assert_eq!(value.value(), SqlValue::int64(1));
    value.set_boolean(Boolean::False);
    assert_eq!(value.value(), SqlValue::int64(0));
    value.set_boolean(Boolean::Null);
    assert!(value.null().unwrap());
}

#[test]
fn set_raw_numeric_reads_bits_per_type() {
    let mut value = EvalValue::default();
    value.set_raw_numeric(SqlType::Float64, 2.5f64.to_bits());
    assert_eq!(value.float64().unwrap(), 2.5);
    value.set_raw_numeric(SqlType::Int64, u64::MAX);
    assert_eq!(value.int64().unwrap(), -1);
    value.set_raw_numeric(SqlType::Uint64, 7);
    assert_eq!(value.uint64().unwrap(), 7);
}

// === Literal ingestion ===

#[test]
fn set_value_widens_and_tags() {
    let mut int = EvalValue::from_value(&SqlValue::make_trusted(SqlType::Int8, "-3"), utf8()).unwrap();
    assert_eq!(int.type_of(), SqlType::Int64);
    assert_eq!(int.int64().unwrap(), -3);
    assert_eq!(int.collation().unwrap(), TypedCollation::NUMERIC);

    let mut text = EvalValue::from_value(&SqlValue::make_trusted(SqlType::Text, "hi"), utf8()).unwrap();
    assert_eq!(text.type_of(), SqlType::VarChar);
    assert_eq!(text.collation().unwrap(), utf8());

    let mut blob = EvalValue::from_value(&SqlValue::make_trusted(SqlType::Blob, "b"), utf8()).unwrap();
    assert_eq!(blob.type_of(), SqlType::VarBinary);
    assert_eq!(blob.collation().unwrap(), TypedCollation::BINARY);

    let mut date = EvalValue::from_value(&SqlValue::make_trusted(SqlType::Date, "2024-01-02"), utf8()).unwrap();
    assert_eq!(date.type_of(), SqlType::Date);
    assert_eq!(date.bytes().unwrap(), b"2024-01-02");
}

#[test]
fn set_value_keeps_decimal_scale() {
    let mut value = EvalValue::from_value(&SqlValue::decimal("12.500"), utf8()).unwrap();
    assert_eq!(value.type_of(), SqlType::Decimal);
    assert_eq!(value.value(), SqlValue::decimal("12.500"));
    assert_eq!(value.decimal().unwrap().scale(), 3);
}

#[test]
fn set_value_decodes_hex() {
    for raw in ["0x4142", "X'4142'"] {
        let ty = if raw.starts_with('0') { SqlType::HexNum } else { SqlType::HexVal };
        let mut value = EvalValue::from_value(&SqlValue::make_trusted(ty, raw), utf8()).unwrap();
        assert!(value.is_hex_literal(), "{raw}");
        assert_eq!(value.bytes().unwrap(), b"AB");
        assert_eq!(value.flags(), ValueFlags::HEX);
    }
}

#[test]
fn set_value_rejects_bad_input() {
    let bad_int = SqlValue::make_trusted(SqlType::Int64, "1x");
    let err = EvalValue::from_value(&bad_int, utf8()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);

    let json = SqlValue::make_trusted(SqlType::Json, "{}");
    let err = EvalValue::from_value(&json, utf8()).unwrap_err();
    assert_eq!(err.code, ErrorCode::Internal);
}

#[test]
fn numeric_from_value_picks_signedness() {
    let mut signed = EvalValue::numeric_from_value(&SqlValue::varchar("-7")).unwrap();
    assert_eq!(signed.type_of(), SqlType::Int64);
    assert_eq!(signed.int64().unwrap(), -7);

    let mut unsigned = EvalValue::numeric_from_value(&SqlValue::varchar("18446744073709551615")).unwrap();
    assert_eq!(unsigned.type_of(), SqlType::Uint64);
    assert_eq!(unsigned.uint64().unwrap(), u64::MAX);

    let err = EvalValue::numeric_from_value(&SqlValue::varchar("1.5")).unwrap_err();
    assert_eq!(err.to_string(), "INVALID_ARGUMENT: could not parse value: '1.5'");
}

#[test]
fn literal_type_matches_ingestion() {
    for value in [
        SqlValue::NULL,
        SqlValue::make_trusted(SqlType::Int32, "1"),
        SqlValue::make_trusted(SqlType::Uint8, "1"),
        SqlValue::make_trusted(SqlType::Float32, "1.5"),
        SqlValue::decimal("1.5"),
        SqlValue::make_trusted(SqlType::HexNum, "0x01"),
        SqlValue::make_trusted(SqlType::Char, "c"),
        SqlValue::make_trusted(SqlType::Binary, "b"),
        SqlValue::make_trusted(SqlType::Time, "01:02:03"),
    ] {
        let ingested = EvalValue::from_value(&value, utf8()).unwrap();
        assert_eq!(literal_type(value.ty()), Some(ingested.type_of()), "{value}");
        assert_eq!(literal_flags(&value), ingested.flags(), "{value}");
    }
    assert_eq!(literal_type(SqlType::Json), None);
}

// === Public surface ===

#[test]
fn strict_booleans() {
    let accepted = [
        (EvalValue::from_int64(1), true),
        (EvalValue::from_uint64(0), false),
        (EvalValue::from_raw(SqlType::VarChar, "ON"), true),
        (EvalValue::from_raw(SqlType::VarChar, "off"), false),
        (EvalValue::from_raw(SqlType::VarChar, "True"), true),
        (EvalValue::from_raw(SqlType::VarBinary, "0"), false),
    ];
    for (value, expected) in accepted {
        assert_eq!(value.to_boolean_strict().unwrap(), expected, "{value}");
    }

    let rejected = [
        (EvalValue::from_int64(2), "2 is not a boolean"),
        (EvalValue::from_raw(SqlType::VarChar, "Yes"), "'yes' is not a boolean"),
        (EvalValue::from_float(1.0), "'1' is not a boolean"),
    ];
    for (value, message) in rejected {
        let err = value.to_boolean_strict().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(err.kind.to_string(), message);
    }

    let mut null = EvalValue::default();
    null.set_null();
    assert_eq!(
        null.to_boolean_strict().unwrap_err().kind.to_string(),
        "NULL is not a boolean"
    );
}

#[test]
fn truthiness() {
    let cases = [
        (EvalValue::from_int64(-1), Boolean::True),
        (EvalValue::from_uint64(0), Boolean::False),
        (EvalValue::from_float(0.5), Boolean::True),
        (EvalValue::from_decimal(qe_decimal::SqlDecimal::ZERO, 2), Boolean::False),
        (EvalValue::from_raw(SqlType::VarChar, "0.0abc"), Boolean::False),
        (EvalValue::from_raw(SqlType::VarChar, "2 apples"), Boolean::True),
        (EvalValue::from_raw(SqlType::Date, "2024-01-01"), Boolean::True),
    ];
    for (mut value, expected) in cases {
        assert_eq!(value.truthy().unwrap(), expected, "{value}");
    }

    let mut null = EvalValue::pending(env(), Counting::null());
    assert_eq!(null.truthy().unwrap(), Boolean::Null);
}

#[test]
#[should_panic(expected = "did not typecheck tuples")]
fn tuples_have_no_truth() {
    let mut value = EvalValue::default();
    value.set_tuple(vec![EvalValue::from_int64(1)]);
    let _ = value.truthy();
}

#[test]
fn tuple_values_resolve_members() {
    let first = Counting::int(1);
    let mut value = EvalValue::default();
    value.set_tuple(vec![
        EvalValue::pending(env(), first.clone()),
        EvalValue::from_raw(SqlType::VarChar, "x"),
        EvalValue::pending(env(), Counting::null()),
    ]);
    assert_eq!(
        value.tuple_values().unwrap(),
        vec![SqlValue::int64(1), SqlValue::varchar("x"), SqlValue::NULL]
    );
    assert_eq!(first.runs(), 1);

    assert!(EvalValue::from_int64(1).tuple_values().unwrap().is_empty());
}

#[test]
fn tuple_values_surface_member_errors() {
    let mut value = EvalValue::default();
    value.set_tuple(vec![EvalValue::pending(env(), Arc::new(Failing))]);
    assert!(value.tuple_values().is_err());
}

#[test]
fn debug_string_renders_payloads() {
    assert_eq!(
        EvalValue::from_int64(-1).debug_string(),
        "(INT64) 0xffffffffffffffff -1"
    );
    let pending = EvalValue::pending(env(), Counting::int(1));
    assert_eq!(pending.debug_string(), "(INT64) <unresolved>");

    let mut tuple = EvalValue::default();
    tuple.set_tuple(vec![EvalValue::from_uint64(2)]);
    assert_eq!(tuple.debug_string(), "(TUPLE) [(UINT64) 0x0000000000000002 2]");
}
