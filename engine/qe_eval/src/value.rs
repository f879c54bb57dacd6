//! The lazily evaluated, type-tagged value container.
//!
//! An `EvalValue` starts either bound to an expression (`Unresolved`) or
//! already holding a payload (`Resolved`). The first access that needs the
//! payload runs the expression exactly once; from then on conversions
//! rewrite type, payload and flags together in place.
//!
//! # Accessors
//!
//! The resolving accessors (`int64()`, `bytes()`, ...) take `&mut self` and
//! evaluate first. The `read_*` family works on an already resolved value
//! and is what the conversion code uses. Asking for a payload the value does
//! not hold is a caller bug and panics. An `Empty` payload (a NULL) reads
//! as the zero value of whatever was asked for. A failed evaluation is
//! remembered and every later resolving access returns the same error.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use qe_collations::TypedCollation;
use qe_decimal::SqlDecimal;
use qe_types::parse::{decode_hex_literal, decode_hex_number, parse_float_lenient};
use qe_types::{SqlType, SqlValue};

use crate::errors::{
    could_not_parse, not_a_boolean, type_not_precomputed, unsupported_literal, EvalError,
    EvalResult,
};
use crate::stack::ensure_sufficient_stack;
use crate::{Expr, ExpressionEnv, ValueFlags};

/// The resolved contents of a value. Which variant is meaningful follows
/// from the declared type.
#[derive(Clone, Debug, Default)]
pub enum Payload {
    /// Nothing written: SQL NULL or a blank container.
    #[default]
    Empty,
    Int(i64),
    Uint(u64),
    /// An unsigned integer past `u64::MAX`. Reads see `u64::MAX`; negation
    /// uses the exact magnitude.
    WideUint(SqlDecimal),
    Float(f64),
    /// A decimal plus the number of fractional digits it displays with.
    Decimal { value: SqlDecimal, scale: i32 },
    /// Text or binary data.
    Bytes(Vec<u8>),
    /// Tuple members, each resolved independently.
    Tuple(Vec<EvalValue>),
}

#[derive(Clone, Debug)]
pub(crate) enum State {
    Unresolved {
        expr: Arc<dyn Expr>,
        env: Arc<ExpressionEnv>,
    },
    Resolved(Payload),
    Failed(EvalError),
}

/// Three-valued SQL truth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Boolean {
    True,
    False,
    Null,
}

impl From<bool> for Boolean {
    fn from(b: bool) -> Self {
        if b {
            Boolean::True
        } else {
            Boolean::False
        }
    }
}

/// A lazily evaluated SQL value.
#[derive(Clone, Debug)]
pub struct EvalValue {
    pub(crate) state: State,
    pub(crate) ty: SqlType,
    pub(crate) flags: ValueFlags,
    pub(crate) collation: TypedCollation,
}

impl Default for EvalValue {
    fn default() -> Self {
        EvalValue {
            state: State::Resolved(Payload::Empty),
            ty: SqlType::Null,
            flags: ValueFlags::empty(),
            collation: TypedCollation::default(),
        }
    }
}

impl EvalValue {
    // Construction

    /// A value that will be computed by `expr` on first use.
    ///
    /// Type and flags come from `expr.type_of` right away.
    pub fn pending(env: Arc<ExpressionEnv>, expr: Arc<dyn Expr>) -> Self {
        let mut value = EvalValue::default();
        value.init(env, expr);
        value
    }

    /// Rebind this container to `expr`, dropping whatever it held.
    pub fn init(&mut self, env: Arc<ExpressionEnv>, expr: Arc<dyn Expr>) {
        let (ty, flags) = expr.type_of(&env);
        self.ty = ty;
        self.flags = flags;
        self.collation = TypedCollation::default();
        self.state = State::Unresolved { expr, env };
    }

    pub fn from_int64(i: i64) -> Self {
        let mut value = EvalValue::default();
        value.set_int64(i);
        value
    }

    pub fn from_uint64(u: u64) -> Self {
        let mut value = EvalValue::default();
        value.set_uint64(u);
        value
    }

    pub fn from_float(f: f64) -> Self {
        let mut value = EvalValue::default();
        value.set_float(f);
        value
    }

    pub fn from_decimal(dec: SqlDecimal, scale: i32) -> Self {
        let mut value = EvalValue::default();
        value.set_decimal(dec, scale);
        value
    }

    /// Raw bytes tagged `ty`, with no collation assigned.
    pub fn from_raw(ty: SqlType, raw: impl Into<Vec<u8>>) -> Self {
        let mut value = EvalValue::default();
        value.set_raw(ty, raw.into(), TypedCollation::default());
        value
    }

    /// Ingest a literal. Text takes `collation`; see [`set_value`](Self::set_value).
    pub fn from_value(value: &SqlValue, collation: TypedCollation) -> EvalResult<Self> {
        let mut out = EvalValue::default();
        out.set_value(value, collation)?;
        Ok(out)
    }

    /// Ingest a value that must be an integer: signed sources parse as
    /// `i64`, unsigned as `u64`, anything else as whichever fits.
    pub fn numeric_from_value(value: &SqlValue) -> EvalResult<Self> {
        let mut out = EvalValue::default();
        if value.is_signed() {
            out.set_int64(value.to_i64()?);
        } else if value.is_unsigned() {
            out.set_uint64(value.to_u64()?);
        } else {
            let raw = value.raw_str();
            if let Ok(i) = raw.parse::<i64>() {
                out.set_int64(i);
            } else if let Ok(u) = raw.parse::<u64>() {
                out.set_uint64(u);
            } else {
                return Err(could_not_parse(&raw));
            }
        }
        Ok(out)
    }

    /// Return to the blank state, dropping the expression and payload.
    pub fn reset(&mut self) {
        *self = EvalValue::default();
    }

    // Resolution

    /// Run the bound expression if it has not run yet.
    ///
    /// The expression runs at most once. If it fails, the value keeps the
    /// error and this and every later call return it.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = %self.ty))]
    pub fn resolve(&mut self) -> EvalResult {
        match &self.state {
            State::Resolved(_) => return Ok(()),
            State::Failed(err) => return Err(err.clone()),
            State::Unresolved { .. } => {}
        }
        let State::Unresolved { expr, env } =
            std::mem::replace(&mut self.state, State::Resolved(Payload::Empty))
        else {
            return Ok(());
        };

        let before = self.ty;
        let result = ensure_sufficient_stack(|| expr.eval(&env, self)).and_then(|()| {
            if env.config().typecheck_eval && self.ty != before {
                Err(type_not_precomputed(before, self.ty))
            } else {
                Ok(())
            }
        });
        if let Err(err) = &result {
            tracing::debug!(%err, "evaluation failed");
            self.state = State::Failed(err.clone());
        }
        result
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Unresolved { .. })
    }

    /// Declared type. Never evaluates.
    #[inline]
    pub fn type_of(&self) -> SqlType {
        self.ty
    }

    #[inline]
    pub fn flags(&self) -> ValueFlags {
        self.flags
    }

    /// Whether any of `flags` is set.
    #[inline]
    pub fn has_flag(&self, flags: ValueFlags) -> bool {
        self.flags.intersects(flags)
    }

    #[inline]
    pub fn clear_flags(&mut self, flags: ValueFlags) {
        self.flags.remove(flags);
    }

    /// SQL NULL test. Evaluates only when the answer is not already known
    /// from the flags.
    pub fn null(&mut self) -> EvalResult<bool> {
        if !self.flags.is_nullable() {
            return Ok(false);
        }
        if self.flags.is_null() {
            return Ok(true);
        }
        self.resolve()?;
        Ok(self.flags.is_null())
    }

    #[inline]
    pub fn numeric(&self) -> bool {
        self.ty.is_number()
    }

    #[inline]
    pub fn textual(&self) -> bool {
        self.ty.is_textual()
    }

    /// `VARBINARY` that came from a hex literal.
    #[inline]
    pub fn is_hex_literal(&self) -> bool {
        self.ty == SqlType::VarBinary && self.flags.contains(ValueFlags::HEX)
    }

    /// `VARBINARY` that did not come from a hex or bit literal; bitwise
    /// operators treat such values as byte strings rather than numbers.
    #[inline]
    pub fn bitwise_binary_string(&self) -> bool {
        self.ty == SqlType::VarBinary && !self.flags.intersects(ValueFlags::HEX | ValueFlags::BIT)
    }

    // Resolving accessors

    pub fn int64(&mut self) -> EvalResult<i64> {
        self.resolve()?;
        Ok(self.read_i64())
    }

    pub fn uint64(&mut self) -> EvalResult<u64> {
        self.resolve()?;
        Ok(self.read_u64())
    }

    pub fn float64(&mut self) -> EvalResult<f64> {
        self.resolve()?;
        Ok(self.read_f64())
    }

    pub fn decimal(&mut self) -> EvalResult<SqlDecimal> {
        self.resolve()?;
        Ok(self.read_decimal())
    }

    pub fn bytes(&mut self) -> EvalResult<&[u8]> {
        self.resolve()?;
        Ok(self.read_bytes())
    }

    /// Bytes as text, replacing invalid UTF-8.
    pub fn string(&mut self) -> EvalResult<Cow<'_, str>> {
        self.resolve()?;
        Ok(String::from_utf8_lossy(self.read_bytes()))
    }

    pub fn tuple(&mut self) -> EvalResult<&[EvalValue]> {
        self.resolve()?;
        Ok(self.read_tuple())
    }

    pub fn tuple_mut(&mut self) -> EvalResult<&mut Vec<EvalValue>> {
        self.resolve()?;
        match &mut self.state {
            State::Resolved(Payload::Tuple(values)) => Ok(values),
            _ => payload_mismatch("tuple", self.ty),
        }
    }

    pub fn collation(&mut self) -> EvalResult<TypedCollation> {
        self.resolve()?;
        Ok(self.collation)
    }

    // Resolved readers

    /// The payload.
    ///
    /// # Panics
    ///
    /// If the value has not been resolved, or its evaluation failed.
    #[track_caller]
    pub fn payload(&self) -> &Payload {
        match &self.state {
            State::Resolved(payload) => payload,
            State::Unresolved { .. } => panic!("did not resolve EvalValue after evaluation"),
            State::Failed(err) => panic!("read EvalValue whose evaluation failed: {err}"),
        }
    }

    /// Signed view of an integer payload; unsigned payloads reinterpret.
    #[track_caller]
    pub(crate) fn read_i64(&self) -> i64 {
        match self.payload() {
            Payload::Int(i) => *i,
            Payload::Uint(u) => *u as i64,
            Payload::WideUint(_) => u64::MAX as i64,
            Payload::Empty => 0,
            _ => payload_mismatch("int64", self.ty),
        }
    }

    /// Unsigned view of an integer payload; signed payloads reinterpret.
    #[track_caller]
    pub(crate) fn read_u64(&self) -> u64 {
        match self.payload() {
            Payload::Uint(u) => *u,
            Payload::WideUint(_) => u64::MAX,
            Payload::Int(i) => *i as u64,
            Payload::Empty => 0,
            _ => payload_mismatch("uint64", self.ty),
        }
    }

    #[track_caller]
    pub(crate) fn read_f64(&self) -> f64 {
        match self.payload() {
            Payload::Float(f) => *f,
            Payload::Empty => 0.0,
            _ => payload_mismatch("float64", self.ty),
        }
    }

    #[track_caller]
    pub(crate) fn read_decimal(&self) -> SqlDecimal {
        match self.payload() {
            Payload::Decimal { value, .. } => value.clone(),
            Payload::Empty => SqlDecimal::ZERO,
            _ => payload_mismatch("decimal", self.ty),
        }
    }

    /// Display scale of a decimal payload.
    #[track_caller]
    pub(crate) fn read_scale(&self) -> i32 {
        match self.payload() {
            Payload::Decimal { scale, .. } => *scale,
            Payload::Empty => 0,
            _ => payload_mismatch("decimal", self.ty),
        }
    }

    #[track_caller]
    pub(crate) fn read_bytes(&self) -> &[u8] {
        match self.payload() {
            Payload::Bytes(bytes) => bytes,
            Payload::Empty => &[],
            _ => payload_mismatch("bytes", self.ty),
        }
    }

    #[track_caller]
    pub(crate) fn read_tuple(&self) -> &[EvalValue] {
        match self.payload() {
            Payload::Tuple(values) => values,
            Payload::Empty => &[],
            _ => payload_mismatch("tuple", self.ty),
        }
    }

    // Setters used by expressions

    pub fn set_null(&mut self) {
        self.flags |= ValueFlags::NULLABLE | ValueFlags::NULL;
        self.state = State::Resolved(Payload::Empty);
    }

    /// `1` or `0` as `INT64`.
    pub fn set_bool(&mut self, b: bool) {
        self.set_int64(i64::from(b));
    }

    pub fn set_boolean(&mut self, b: Boolean) {
        match b {
            Boolean::Null => self.set_null(),
            Boolean::True => self.set_bool(true),
            Boolean::False => self.set_bool(false),
        }
    }

    pub fn set_raw(&mut self, ty: SqlType, raw: Vec<u8>, collation: TypedCollation) {
        self.ty = ty;
        self.state = State::Resolved(Payload::Bytes(raw));
        self.collation = collation;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
    }

    /// `VARCHAR` text in `collation`.
    pub fn set_string(&mut self, text: &str, collation: TypedCollation) {
        self.set_raw(SqlType::VarChar, text.as_bytes().to_vec(), collation);
    }

    /// Decoded bytes of a hex literal. Replaces all flags with `HEX`.
    pub fn set_binary_hex(&mut self, raw: Vec<u8>) {
        self.ty = SqlType::VarBinary;
        self.state = State::Resolved(Payload::Bytes(raw));
        self.collation = TypedCollation::BINARY;
        self.flags = ValueFlags::HEX;
    }

    /// A numeric payload given as its raw 64-bit pattern, read per `ty`.
    /// Flags are left as they are.
    pub fn set_raw_numeric(&mut self, ty: SqlType, bits: u64) {
        let payload = if ty.is_float() {
            Payload::Float(f64::from_bits(bits))
        } else if ty.is_signed() {
            Payload::Int(bits as i64)
        } else {
            Payload::Uint(bits)
        };
        self.ty = ty;
        self.state = State::Resolved(payload);
        self.collation = TypedCollation::NUMERIC;
    }

    pub fn set_int64(&mut self, i: i64) {
        self.ty = SqlType::Int64;
        self.state = State::Resolved(Payload::Int(i));
        self.collation = TypedCollation::NUMERIC;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
        self.flags |= ValueFlags::for_int64(i);
    }

    pub fn set_uint64(&mut self, u: u64) {
        self.ty = SqlType::Uint64;
        self.state = State::Resolved(Payload::Uint(u));
        self.collation = TypedCollation::NUMERIC;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
        self.flags |= ValueFlags::for_uint64(u);
    }

    /// `UINT64` saturated at `u64::MAX` that remembers its exact value.
    pub(crate) fn set_wide_uint64(&mut self, exact: SqlDecimal) {
        self.ty = SqlType::Uint64;
        self.state = State::Resolved(Payload::WideUint(exact));
        self.collation = TypedCollation::NUMERIC;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
        self.flags |= ValueFlags::for_uint64(u64::MAX);
    }

    pub fn set_float(&mut self, f: f64) {
        self.ty = SqlType::Float64;
        self.state = State::Resolved(Payload::Float(f));
        self.collation = TypedCollation::NUMERIC;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
    }

    pub fn set_decimal(&mut self, value: SqlDecimal, scale: i32) {
        self.ty = SqlType::Decimal;
        self.state = State::Resolved(Payload::Decimal { value, scale });
        self.collation = TypedCollation::NUMERIC;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
    }

    pub fn set_tuple(&mut self, values: Vec<EvalValue>) {
        self.ty = SqlType::Tuple;
        self.state = State::Resolved(Payload::Tuple(values));
        self.collation = TypedCollation::default();
        self.flags.remove(ValueFlags::INTEGER_RANGE);
    }

    /// Overwrite the collation metadata without touching the bytes.
    pub fn replace_collation(&mut self, collation: TypedCollation) {
        self.collation = collation;
    }

    /// Load a literal.
    ///
    /// Integers and floats widen to their 64-bit types, decimals keep the
    /// literal's scale, hex literals decode to flagged `VARBINARY`, text
    /// becomes `VARCHAR` in `collation`, and temporal values keep their
    /// text.
    pub fn set_value(&mut self, value: &SqlValue, collation: TypedCollation) -> EvalResult {
        let ty = value.ty();
        match ty {
            SqlType::Null => self.set_null(),
            _ if ty.is_signed() => self.set_int64(value.to_i64()?),
            _ if ty.is_unsigned() => self.set_uint64(value.to_u64()?),
            SqlType::Float32 => self.set_float(f64::from(value.to_f32()?)),
            SqlType::Float64 => self.set_float(value.to_f64()?),
            SqlType::Decimal => {
                let dec = SqlDecimal::parse_mysql(value.raw())?;
                let scale = -dec.exponent();
                self.set_decimal(dec, scale);
            }
            SqlType::HexNum => self.set_binary_hex(decode_hex_number(value.raw())?),
            SqlType::HexVal => self.set_binary_hex(decode_hex_literal(value.raw())?),
            SqlType::VarChar | SqlType::Text | SqlType::Char => {
                self.set_raw(SqlType::VarChar, value.raw().to_vec(), collation);
            }
            SqlType::VarBinary | SqlType::Blob | SqlType::Binary => {
                self.set_raw(SqlType::VarBinary, value.raw().to_vec(), TypedCollation::BINARY);
            }
            _ if ty.is_date() => {
                self.set_raw(ty, value.raw().to_vec(), TypedCollation::NUMERIC);
            }
            _ => return Err(unsupported_literal(ty, value)),
        }
        Ok(())
    }

    // Public surface

    /// The value as a typed raw SQL value.
    ///
    /// # Panics
    ///
    /// If the value has not been resolved.
    #[track_caller]
    pub fn value(&self) -> SqlValue {
        self.payload();
        if self.flags.is_null() {
            return SqlValue::NULL;
        }
        SqlValue::make_trusted(self.ty, self.to_raw_bytes())
    }

    /// Member values of a tuple, resolving each member. Empty for
    /// non-tuples.
    ///
    /// # Panics
    ///
    /// If this value has not been resolved.
    #[track_caller]
    pub fn tuple_values(&mut self) -> EvalResult<Vec<SqlValue>> {
        let payload = match &mut self.state {
            State::Resolved(payload) => payload,
            State::Failed(err) => return Err(err.clone()),
            State::Unresolved { .. } => panic!("did not resolve EvalValue after evaluation"),
        };
        let Payload::Tuple(members) = payload else {
            return Ok(Vec::new());
        };
        members
            .iter_mut()
            .map(|member| -> EvalResult<SqlValue> {
                ensure_sufficient_stack(|| member.resolve())?;
                Ok(member.value())
            })
            .collect()
    }

    /// Two-valued conversion for contexts that reject anything but the
    /// canonical spellings: integers `0`/`1` and the strings `on`, `off`,
    /// `true`, `false`, `1`, `0` in any case.
    ///
    /// # Panics
    ///
    /// If the value has not been resolved.
    #[track_caller]
    pub fn to_boolean_strict(&self) -> EvalResult<bool> {
        self.payload();
        if self.flags.is_null() {
            return Err(not_a_boolean("NULL"));
        }
        if self.ty.is_signed() {
            return match self.read_i64() {
                0 => Ok(false),
                1 => Ok(true),
                i => Err(not_a_boolean(i.to_string())),
            };
        }
        if self.ty.is_unsigned() {
            return match self.read_u64() {
                0 => Ok(false),
                1 => Ok(true),
                u => Err(not_a_boolean(u.to_string())),
            };
        }
        if matches!(self.ty, SqlType::VarChar | SqlType::VarBinary) {
            let lower = String::from_utf8_lossy(self.read_bytes()).to_lowercase();
            return match lower.as_str() {
                "on" | "true" | "1" => Ok(true),
                "off" | "false" | "0" => Ok(false),
                _ => Err(not_a_boolean(format!("'{lower}'"))),
            };
        }
        let rendered = self.to_raw_bytes();
        Err(not_a_boolean(format!("'{}'", String::from_utf8_lossy(&rendered))))
    }

    /// SQL truthiness: non-zero numbers and text that parses to a non-zero
    /// number are true.
    ///
    /// # Panics
    ///
    /// On tuples, which have no truth value.
    pub fn truthy(&mut self) -> EvalResult<Boolean> {
        if self.null()? {
            return Ok(Boolean::Null);
        }
        self.resolve()?;
        let ty = self.ty;
        let truth = if ty.is_integral() {
            self.read_u64() != 0
        } else if ty.is_float() {
            self.read_f64() != 0.0
        } else if ty == SqlType::Decimal {
            !self.read_decimal().is_zero()
        } else if ty.is_textual() {
            parse_float_lenient(&String::from_utf8_lossy(self.read_bytes())) != 0.0
        } else if ty == SqlType::Tuple {
            panic!("did not typecheck tuples")
        } else {
            true
        };
        Ok(Boolean::from(truth))
    }

    /// Informal rendering for logs and test failures.
    pub fn debug_string(&self) -> String {
        let payload = match &self.state {
            State::Resolved(payload) => payload,
            State::Unresolved { .. } => return format!("({}) <unresolved>", self.ty),
            State::Failed(err) => return format!("({}) <failed: {err}>", self.ty),
        };
        let body = match payload {
            Payload::Empty => "<empty>".to_owned(),
            Payload::Int(i) => format!("0x{:016x} {i}", *i as u64),
            Payload::Uint(u) => format!("0x{u:016x} {u}"),
            Payload::WideUint(exact) => format!("0x{:016x} {exact}", u64::MAX),
            Payload::Float(f) => format!("0x{:016x} {f}", f.to_bits()),
            Payload::Decimal { value, scale } => format!("{value} (scale {scale})"),
            Payload::Bytes(bytes) => format!("{:?}", String::from_utf8_lossy(bytes)),
            Payload::Tuple(members) => {
                let rendered: Vec<String> = members
                    .iter()
                    .map(|member| ensure_sufficient_stack(|| member.debug_string()))
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
        };
        let null = if self.flags.is_null() { " NULL" } else { "" };
        format!("({}){null} {body}", self.ty)
    }
}

/// The type a literal of type `ty` takes once loaded with
/// [`EvalValue::set_value`], or `None` if such literals are rejected.
pub fn literal_type(ty: SqlType) -> Option<SqlType> {
    match ty {
        SqlType::Null => Some(SqlType::Null),
        _ if ty.is_signed() => Some(SqlType::Int64),
        _ if ty.is_unsigned() => Some(SqlType::Uint64),
        SqlType::Float32 | SqlType::Float64 => Some(SqlType::Float64),
        SqlType::Decimal => Some(SqlType::Decimal),
        SqlType::HexNum | SqlType::HexVal => Some(SqlType::VarBinary),
        SqlType::VarChar | SqlType::Text | SqlType::Char => Some(SqlType::VarChar),
        SqlType::VarBinary | SqlType::Blob | SqlType::Binary => Some(SqlType::VarBinary),
        _ if ty.is_date() => Some(ty),
        _ => None,
    }
}

/// Flags a literal of `value` will carry once loaded.
pub fn literal_flags(value: &SqlValue) -> ValueFlags {
    match value.ty() {
        SqlType::Null => ValueFlags::NULL | ValueFlags::NULLABLE,
        SqlType::HexNum | SqlType::HexVal => ValueFlags::HEX,
        ty if ty.is_signed() => value.to_i64().map_or(ValueFlags::empty(), ValueFlags::for_int64),
        ty if ty.is_unsigned() => value.to_u64().map_or(ValueFlags::empty(), ValueFlags::for_uint64),
        _ => ValueFlags::empty(),
    }
}

#[cold]
#[track_caller]
fn payload_mismatch(wanted: &str, ty: SqlType) -> ! {
    panic!("EvalValue of type {ty} does not hold a {wanted} payload")
}

impl fmt::Display for EvalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Unresolved { .. } => write!(f, "<unresolved {}>", self.ty),
            State::Failed(err) => write!(f, "<failed {}: {err}>", self.ty),
            State::Resolved(_) => fmt::Display::fmt(&self.value(), f),
        }
    }
}

#[cfg(test)]
mod tests;
