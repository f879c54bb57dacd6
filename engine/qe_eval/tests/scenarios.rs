//! End-to-end scenarios over the public surface: literals flow through
//! expressions, conversions and hashing the way the executor drives them.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use qe_collations::{CollationId, TypedCollation};
use qe_eval::{
    null_safe_hashcode_of, BindVariable, Convert, ConvertTarget, EvalConfig, EvalValue,
    EvalValuePool, Expr, ExpressionEnv, Literal, Negate, TupleExpr, ValueFlags, NULL_HASH,
};
use qe_types::{SqlType, SqlValue};

fn env() -> Arc<ExpressionEnv> {
    qe_eval::init_tracing();
    Arc::new(ExpressionEnv::default())
}

fn lit(value: SqlValue) -> Arc<dyn Expr> {
    Arc::new(Literal::new(value))
}

#[test]
fn negating_signed_minimum_promotes_to_decimal() {
    let mut value = EvalValue::from_int64(i64::MIN);
    value.negate_numeric().unwrap();
    assert_eq!(value.type_of(), SqlType::Decimal);
    assert_eq!(value.value(), SqlValue::decimal("9223372036854775808"));
}

#[test]
fn negating_signed_cap_is_signed_minimum() {
    let mut value = EvalValue::from_uint64(i64::MAX as u64 + 1);
    assert!(value.has_flag(ValueFlags::INTEGER_CAP));
    value.negate_numeric().unwrap();
    assert_eq!(value.type_of(), SqlType::Int64);
    assert_eq!(value.int64().unwrap(), i64::MIN);
}

#[test]
fn unsigned_overflow_from_text_negates_to_decimal() {
    let expr = Convert::new(
        lit(SqlValue::varchar("18446744073709551616")),
        ConvertTarget::Unsigned,
    );
    let mut value = EvalValue::pending(env(), Arc::new(expr));
    value.resolve().unwrap();
    assert!(value.has_flag(ValueFlags::INTEGER_OVF));
    assert_eq!(value.uint64().unwrap(), u64::MAX);

    value.negate_numeric().unwrap();
    assert_eq!(value.type_of(), SqlType::Decimal);
    assert_eq!(value.value(), SqlValue::decimal("-18446744073709551616"));
}

#[test]
fn wide_decimal_literals_are_exact() {
    let wide = SqlValue::decimal("123456789012345678901234567890.5");
    let mut value = EvalValue::from_value(&wide, TypedCollation::NUMERIC).unwrap();
    assert_eq!(value.type_of(), SqlType::Decimal);
    assert_eq!(value.value(), wide);

    value.negate_numeric().unwrap();
    assert_eq!(value.value(), SqlValue::decimal("-123456789012345678901234567890.5"));

    let sixty_five = SqlValue::decimal(&"9".repeat(65));
    let hash = null_safe_hashcode_of(&sixty_five, CollationId::BINARY, SqlType::Decimal).unwrap();
    assert_eq!(hash, 1e65f64.to_bits());
}

#[test]
fn null_hash_ignores_collation_and_type() {
    for collation in [CollationId::BINARY, CollationId::UTF8MB4_GENERAL_CI, CollationId(9999)] {
        for ty in [SqlType::Null, SqlType::Int64, SqlType::VarChar, SqlType::Date] {
            assert_eq!(
                null_safe_hashcode_of(&SqlValue::NULL, collation, ty).unwrap(),
                NULL_HASH
            );
        }
    }
}

#[test]
fn make_numeric_on_garbage_text_is_zero() {
    let collation = TypedCollation::coercible(CollationId::UTF8MB4_GENERAL_CI);
    let mut value = EvalValue::from_value(&SqlValue::varchar("abc"), collation).unwrap();
    value.make_numeric().unwrap();
    assert_eq!(value.type_of(), SqlType::Float64);
    assert_eq!(value.float64().unwrap(), 0.0);
}

#[test]
fn oversized_hex_literal_is_zero() {
    let hex = SqlValue::make_trusted(SqlType::HexNum, "0x0102030405060708090A");
    let mut value = EvalValue::from_value(&hex, TypedCollation::BINARY).unwrap();
    value.make_numeric().unwrap();
    assert_eq!(value.float64().unwrap(), 0.0);
}

#[test]
fn huge_float_formats_without_plus() {
    let value = EvalValue::from_float(1.234e300);
    assert_eq!(value.value(), SqlValue::make_trusted(SqlType::Float64, "1.234e300"));
}

#[test]
fn bind_variables_hash_like_literals() {
    let env = Arc::new(
        ExpressionEnv::new(EvalConfig::default().with_typecheck_eval(true))
            .with_bind_var("a", SqlValue::varchar("ABC"))
            .with_bind_var("n", SqlValue::int64(10)),
    );

    let mut text = EvalValue::pending(Arc::clone(&env), Arc::new(BindVariable::new("a")));
    let mut lower = EvalValue::from_value(
        &SqlValue::varchar("abc"),
        TypedCollation::coercible(CollationId::UTF8MB4_GENERAL_CI),
    )
    .unwrap();
    assert_eq!(
        text.null_safe_hashcode().unwrap(),
        lower.null_safe_hashcode().unwrap()
    );

    let mut number = EvalValue::pending(env, Arc::new(BindVariable::new("n")));
    number.resolve().unwrap();
    let as_float = null_safe_hashcode_of(&number.value(), CollationId::BINARY, SqlType::Float64);
    let from_text =
        null_safe_hashcode_of(&SqlValue::varchar("10"), CollationId::BINARY, SqlType::Float64);
    assert_eq!(as_float.unwrap(), from_text.unwrap());
}

#[test]
fn tuples_flatten_to_values() {
    let expr = TupleExpr::new(vec![
        lit(SqlValue::int64(1)),
        Arc::new(Negate::new(lit(SqlValue::decimal("2.50")))),
        lit(SqlValue::NULL),
        Arc::new(TupleExpr::new(vec![lit(SqlValue::varchar("nested"))])),
    ]);
    let mut value = EvalValue::pending(env(), Arc::new(expr));
    value.resolve().unwrap();
    let values = value.tuple_values().unwrap();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], SqlValue::int64(1));
    assert_eq!(values[1], SqlValue::decimal("-2.50"));
    assert_eq!(values[2], SqlValue::NULL);
    assert_eq!(values[3].ty(), SqlType::Tuple);
}

#[test]
fn deeply_nested_tuples_resolve() {
    let mut expr: Arc<dyn Expr> = lit(SqlValue::int64(7));
    for _ in 0..2_000 {
        expr = Arc::new(TupleExpr::new(vec![expr]));
    }
    let mut value = EvalValue::pending(env(), expr);
    let mut depth = 0;
    loop {
        value.resolve().unwrap();
        if value.type_of() != SqlType::Tuple {
            break;
        }
        let inner = value.tuple_mut().unwrap().remove(0);
        value = inner;
        depth += 1;
    }
    assert_eq!(depth, 2_000);
    assert_eq!(value.int64().unwrap(), 7);
}

#[test]
fn pooled_values_evaluate_and_recycle() {
    let pool = EvalValuePool::from_config(&EvalConfig::default().with_pool_capacity(2));
    let env = env();
    for i in 0..10 {
        let mut value = pool.acquire();
        value.init(Arc::clone(&env), lit(SqlValue::int64(i)));
        assert_eq!(value.int64().unwrap(), i);
    }
    assert_eq!(pool.available(), 1);
    assert!(!pool.acquire().is_pending());
}
