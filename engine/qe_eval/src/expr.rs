//! Expression nodes.
//!
//! An [`Expr`] reports its result type ahead of time and writes its result
//! into a caller-provided [`EvalValue`] when that value is first read.
//! Composite nodes evaluate their operand straight into the output value
//! and convert it in place.

use std::fmt;
use std::sync::Arc;

use qe_collations::{CollationEnv, CollationId, Coercibility, Repertoire, TypedCollation};
use qe_types::{SqlType, SqlValue};

use crate::errors::{not_scalar, unknown_collation, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::{literal_flags, literal_type};
use crate::{EvalValue, ExpressionEnv, ValueFlags};

/// A node that can fill an [`EvalValue`].
pub trait Expr: Send + Sync + fmt::Debug {
    /// Result type and the flags known before evaluation. Must not have
    /// side effects.
    fn type_of(&self, env: &ExpressionEnv) -> (SqlType, ValueFlags);

    /// Write the result into `out`. Called at most once per value.
    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult;
}

/// Type and flags of `value` once ingested, marked nullable.
fn ingested_type(value: &SqlValue) -> (SqlType, ValueFlags) {
    let ty = literal_type(value.ty()).unwrap_or(value.ty());
    (ty, literal_flags(value) | ValueFlags::NULLABLE)
}

fn operand_type(inner: &dyn Expr, env: &ExpressionEnv) -> (SqlType, ValueFlags) {
    ensure_sufficient_stack(|| inner.type_of(env))
}

/// Evaluate `inner` into `out`. Returns `false` when the result is NULL and
/// there is nothing left to convert.
fn eval_scalar_operand(
    inner: &dyn Expr,
    env: &Arc<ExpressionEnv>,
    out: &mut EvalValue,
) -> EvalResult<bool> {
    ensure_sufficient_stack(|| inner.eval(env, out))?;
    if out.flags().is_null() {
        return Ok(false);
    }
    if out.type_of() == SqlType::Tuple {
        return Err(not_scalar());
    }
    Ok(true)
}

/// A constant.
#[derive(Clone, Debug)]
pub struct Literal {
    pub value: SqlValue,
    /// Collation for text; the environment default when `None`.
    pub collation: Option<TypedCollation>,
}

impl Literal {
    pub fn new(value: SqlValue) -> Self {
        Literal {
            value,
            collation: None,
        }
    }

    #[must_use]
    pub fn with_collation(mut self, collation: CollationId) -> Self {
        self.collation = Some(TypedCollation::coercible(collation));
        self
    }
}

impl Expr for Literal {
    fn type_of(&self, _env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        let ty = literal_type(self.value.ty()).unwrap_or(self.value.ty());
        (ty, literal_flags(&self.value))
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        let collation = self
            .collation
            .unwrap_or_else(|| TypedCollation::coercible(env.default_collation()));
        out.set_value(&self.value, collation)
    }
}

/// A named query argument, read from the environment.
#[derive(Clone, Debug)]
pub struct BindVariable {
    pub name: String,
}

impl BindVariable {
    pub fn new(name: impl Into<String>) -> Self {
        BindVariable { name: name.into() }
    }
}

impl Expr for BindVariable {
    fn type_of(&self, env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        env.bind_var(&self.name)
            .map_or((SqlType::Null, ValueFlags::NULLABLE), ingested_type)
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        let value = env.bind_var(&self.name)?;
        out.set_value(value, TypedCollation::coercible(env.default_collation()))
    }
}

/// A value of the current row, by position.
#[derive(Clone, Debug)]
pub struct Column {
    pub offset: usize,
    /// Collation of the column's text; the environment default when `None`.
    pub collation: Option<CollationId>,
}

impl Column {
    pub fn new(offset: usize) -> Self {
        Column {
            offset,
            collation: None,
        }
    }

    #[must_use]
    pub fn with_collation(mut self, collation: CollationId) -> Self {
        self.collation = Some(collation);
        self
    }
}

impl Expr for Column {
    fn type_of(&self, env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        env.column(self.offset)
            .map_or((SqlType::Null, ValueFlags::NULLABLE), ingested_type)
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        let value = env.column(self.offset)?;
        let collation = TypedCollation {
            collation: self.collation.unwrap_or_else(|| env.default_collation()),
            coercibility: Coercibility::Implicit,
            repertoire: Repertoire::Unicode,
        };
        out.set_value(value, collation)
    }
}

/// A row constructor. Members stay unevaluated until read.
#[derive(Clone, Debug)]
pub struct TupleExpr {
    pub items: Vec<Arc<dyn Expr>>,
}

impl TupleExpr {
    pub fn new(items: Vec<Arc<dyn Expr>>) -> Self {
        TupleExpr { items }
    }
}

impl Expr for TupleExpr {
    fn type_of(&self, _env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        (SqlType::Tuple, ValueFlags::empty())
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        let members = self
            .items
            .iter()
            .map(|item| EvalValue::pending(Arc::clone(env), Arc::clone(item)))
            .collect();
        out.set_tuple(members);
        Ok(())
    }
}

/// Unary minus.
#[derive(Clone, Debug)]
pub struct Negate {
    pub inner: Arc<dyn Expr>,
}

impl Negate {
    pub fn new(inner: Arc<dyn Expr>) -> Self {
        Negate { inner }
    }
}

impl Expr for Negate {
    fn type_of(&self, env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        let (ty, flags) = operand_type(&*self.inner, env);
        if flags.is_null() {
            return (ty, flags);
        }
        let nullable = flags & ValueFlags::NULLABLE;
        let negated = if flags.contains(ValueFlags::HEX) {
            SqlType::Float64
        } else if ty.is_signed() {
            if flags.contains(ValueFlags::INTEGER_UDF) {
                SqlType::Decimal
            } else {
                SqlType::Int64
            }
        } else if ty.is_unsigned() {
            if flags.contains(ValueFlags::INTEGER_OVF) {
                SqlType::Decimal
            } else if flags.contains(ValueFlags::INTEGER_CAP) {
                // -(i64::MAX + 1) is i64::MIN, which negates again to DECIMAL.
                return (SqlType::Int64, ValueFlags::INTEGER_UDF | nullable);
            } else {
                SqlType::Int64
            }
        } else if ty == SqlType::Decimal {
            SqlType::Decimal
        } else {
            SqlType::Float64
        };
        (negated, nullable)
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        if eval_scalar_operand(&*self.inner, env, out)? {
            out.negate_numeric()?;
        }
        Ok(())
    }
}

/// Result type of a [`Convert`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConvertTarget {
    Signed,
    Unsigned,
    Float,
    Decimal { precision: i32, scale: i32 },
    Binary,
    /// Text re-encoded into the collation.
    Char(CollationId),
}

impl ConvertTarget {
    pub fn sql_type(self) -> SqlType {
        match self {
            ConvertTarget::Signed => SqlType::Int64,
            ConvertTarget::Unsigned => SqlType::Uint64,
            ConvertTarget::Float => SqlType::Float64,
            ConvertTarget::Decimal { .. } => SqlType::Decimal,
            ConvertTarget::Binary => SqlType::VarBinary,
            ConvertTarget::Char(_) => SqlType::VarChar,
        }
    }
}

/// `CONVERT(inner, target)`.
#[derive(Clone, Debug)]
pub struct Convert {
    pub inner: Arc<dyn Expr>,
    pub target: ConvertTarget,
}

impl Convert {
    pub fn new(inner: Arc<dyn Expr>, target: ConvertTarget) -> Self {
        Convert { inner, target }
    }
}

impl Expr for Convert {
    fn type_of(&self, env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        let (ty, flags) = operand_type(&*self.inner, env);
        if flags.is_null() {
            return (ty, flags);
        }
        let flags = match self.target {
            // Bytes that do not decode in the source charset convert to NULL.
            ConvertTarget::Char(_) => ValueFlags::NULLABLE,
            _ => flags & ValueFlags::NULLABLE,
        };
        (self.target.sql_type(), flags)
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        if !eval_scalar_operand(&*self.inner, env, out)? {
            return Ok(());
        }
        match self.target {
            ConvertTarget::Signed => out.make_signed_integral(),
            ConvertTarget::Unsigned => out.make_unsigned_integral(),
            ConvertTarget::Float => out.make_float(),
            ConvertTarget::Decimal { precision, scale } => out.make_decimal(precision, scale),
            ConvertTarget::Binary => out.make_binary(),
            ConvertTarget::Char(collation) => {
                out.make_textual_and_convert(collation)?;
                Ok(())
            }
        }
    }
}

/// `inner COLLATE collation`.
#[derive(Clone, Debug)]
pub struct Collate {
    pub inner: Arc<dyn Expr>,
    pub collation: CollationId,
}

impl Collate {
    pub fn new(inner: Arc<dyn Expr>, collation: CollationId) -> Self {
        Collate { inner, collation }
    }
}

impl Expr for Collate {
    fn type_of(&self, env: &ExpressionEnv) -> (SqlType, ValueFlags) {
        let (ty, flags) = operand_type(&*self.inner, env);
        if flags.is_null() {
            return (ty, flags);
        }
        (SqlType::VarChar, ValueFlags::NULLABLE)
    }

    fn eval(&self, env: &Arc<ExpressionEnv>, out: &mut EvalValue) -> EvalResult {
        if CollationEnv::local().lookup_by_id(self.collation).is_none() {
            return Err(unknown_collation(self.collation));
        }
        if !eval_scalar_operand(&*self.inner, env, out)? {
            return Ok(());
        }
        if out.make_textual_and_convert(self.collation)? {
            out.replace_collation(TypedCollation {
                collation: self.collation,
                coercibility: Coercibility::Explicit,
                repertoire: Repertoire::Unicode,
            });
        }
        Ok(())
    }
}
