//! Null-safe hashing consistent with comparison.
//!
//! Two values that compare equal after coercion to a shared type hash
//! identically: numbers hash their 64-bit pattern in the coerced type, text
//! hashes through its collation, temporal values hash the instant they name.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use qe_collations::{CollationEnv, CollationId};
use qe_types::{SqlType, SqlValue};

use crate::errors::{invalid_temporal, unknown_collation, unsupported_hash_type, EvalResult};
use crate::value::Payload;
use crate::EvalValue;

pub type HashCode = u64;

/// Hash of every NULL, whatever its type.
pub const NULL_HASH: HashCode = u64::MAX;

impl EvalValue {
    /// Hash this value.
    ///
    /// Decimals hash the bit pattern of their nearest float so that equal
    /// decimals of different scales agree.
    pub fn null_safe_hashcode(&mut self) -> EvalResult<HashCode> {
        self.resolve()?;
        if self.flags.is_null() {
            return Ok(NULL_HASH);
        }

        let ty = self.ty;
        if ty.is_number() {
            let code = match self.payload() {
                Payload::Int(i) => *i as u64,
                Payload::Uint(u) => *u,
                Payload::WideUint(_) => u64::MAX,
                Payload::Float(f) => f.to_bits(),
                Payload::Decimal { value, .. } => value.to_f64().unwrap_or(0.0).to_bits(),
                _ => 0,
            };
            return Ok(code);
        }

        if ty.is_textual() {
            let id = self.collation.collation;
            let collation = CollationEnv::local()
                .lookup_by_id(id)
                .ok_or_else(|| unknown_collation(id))?;
            return Ok(collation.hash(self.read_bytes(), 0));
        }

        if ty.is_date() {
            let raw = String::from_utf8_lossy(self.read_bytes());
            let nanos = temporal_nanos(ty, raw.trim()).ok_or_else(|| invalid_temporal(ty, &raw))?;
            return Ok(nanos as u64);
        }

        Err(unsupported_hash_type(ty))
    }
}

/// Hash `value` the way the comparison path sees it: cast to `coerce_type`,
/// tagged with `collation`.
pub fn null_safe_hashcode_of(
    value: &SqlValue,
    collation: CollationId,
    coerce_type: SqlType,
) -> EvalResult<HashCode> {
    let mut cast = EvalValue::cast_to(value, coerce_type)?;
    cast.collation.collation = collation;
    cast.null_safe_hashcode()
}

/// Nanoseconds since the Unix epoch for dates and datetimes (read as UTC),
/// since midnight for times.
fn temporal_nanos(ty: SqlType, raw: &str) -> Option<i64> {
    match ty {
        SqlType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)?
            .and_utc()
            .timestamp_nanos_opt(),
        SqlType::Datetime | SqlType::Timestamp => {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()?
                .and_utc()
                .timestamp_nanos_opt()
        }
        SqlType::Time => {
            let time = NaiveTime::parse_from_str(raw, "%H:%M:%S%.f").ok()?;
            let seconds = i64::from(time.num_seconds_from_midnight());
            Some(seconds * 1_000_000_000 + i64::from(time.nanosecond()))
        }
        _ => None,
    }
}
