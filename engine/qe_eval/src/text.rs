//! Textual materialization: rendering payloads as bytes, re-typing values
//! as text or binary, re-encoding between collations, and truncation.

use qe_collations::{convert, slice, CollationEnv, CollationId, TypedCollation};
use qe_types::{SqlType, SqlValue};

use crate::errors::{unknown_collation, EvalResult};
use crate::format::format_float;
use crate::value::{Payload, State};
use crate::{EvalValue, ValueFlags};

impl EvalValue {
    /// The canonical byte rendering of the payload.
    ///
    /// NULL renders empty, integers as decimal digits, floats through
    /// [`format_float`], decimals in fixed point at their display scale.
    ///
    /// # Panics
    ///
    /// If the value has not been resolved.
    #[track_caller]
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        let payload = self.payload();
        if self.flags.is_null() {
            return Vec::new();
        }
        match payload {
            Payload::Int(i) => i.to_string().into_bytes(),
            Payload::Uint(u) => u.to_string().into_bytes(),
            Payload::WideUint(_) => u64::MAX.to_string().into_bytes(),
            Payload::Float(f) => format_float(SqlType::Float64, *f),
            Payload::Decimal { value, scale } => value.format_mysql(*scale),
            Payload::Bytes(bytes) => bytes.clone(),
            Payload::Empty | Payload::Tuple(_) => Vec::new(),
        }
    }

    /// Re-type as `VARBINARY`, rendering numbers to bytes first.
    pub fn make_binary(&mut self) -> EvalResult {
        self.resolve()?;
        self.materialize_bytes();
        self.ty = SqlType::VarBinary;
        self.collation = TypedCollation::BINARY;
        self.flags
            .remove(ValueFlags::HEX | ValueFlags::BIT | ValueFlags::INTEGER_RANGE);
        Ok(())
    }

    /// Re-type as `VARCHAR` in `collation` without converting the bytes.
    pub fn make_textual(&mut self, collation: CollationId) -> EvalResult {
        self.resolve()?;
        self.materialize_bytes();
        self.ty = SqlType::VarChar;
        self.collation.collation = collation;
        self.flags.remove(ValueFlags::INTEGER_RANGE);
        Ok(())
    }

    /// Re-type as `VARCHAR` in `collation`, re-encoding the bytes from the
    /// current collation's charset.
    ///
    /// A value with no collation is read as binary. When either collation
    /// is unknown or the bytes are not valid in the source charset, the
    /// value becomes NULL and `false` is returned.
    pub fn make_textual_and_convert(&mut self, collation: CollationId) -> EvalResult<bool> {
        self.resolve()?;
        self.materialize_bytes();
        self.collation.collation = self.byte_collation();
        self.ty = SqlType::VarChar;
        self.flags.remove(ValueFlags::INTEGER_RANGE);

        let env = CollationEnv::local();
        let from = env.lookup_by_id(self.collation.collation);
        let to = env.lookup_by_id(collation);
        let (Some(from), Some(to)) = (from, to) else {
            tracing::debug!(
                from = self.collation.collation.0,
                to = collation.0,
                "unknown collation, value becomes NULL"
            );
            self.set_null();
            return Ok(false);
        };

        match convert(&*to, self.read_bytes(), &*from) {
            Ok(converted) => {
                self.state = State::Resolved(Payload::Bytes(converted));
                self.collation.collation = collation;
                Ok(true)
            }
            Err(err) => {
                tracing::debug!(%err, to = to.name(), "re-encoding failed, value becomes NULL");
                self.set_null();
                Ok(false)
            }
        }
    }

    /// Cut or pad to `size`.
    ///
    /// Binary strings are zero-padded or cut at `size` bytes. Text is cut at
    /// `size` characters of its collation's charset and never grows; text
    /// with no collation counts bytes.
    ///
    /// # Panics
    ///
    /// If the value is neither text nor binary.
    pub fn truncate(&mut self, size: usize) -> EvalResult {
        self.resolve()?;
        let ty = self.ty;
        if ty.is_binary() {
            self.materialize_bytes().resize(size, 0);
        } else if ty.is_text() {
            let id = self.byte_collation();
            let collation = CollationEnv::local()
                .lookup_by_id(id)
                .ok_or_else(|| unknown_collation(id))?;
            let bytes = self.materialize_bytes();
            let keep = slice(&*collation, bytes, 0, size).len();
            bytes.truncate(keep);
        } else {
            panic!("called EvalValue::truncate on non-quoted value of type {ty}");
        }
        Ok(())
    }

    /// Render as a value of `result_type`.
    ///
    /// Integer targets take integer payloads (reinterpreting across
    /// signedness) and truncate floats. Float and decimal targets take any
    /// number. Other targets take the byte rendering. Combinations with no
    /// rendering give NULL.
    ///
    /// # Panics
    ///
    /// If the value has not been resolved.
    #[track_caller]
    pub fn to_sql_value(&self, result_type: SqlType) -> SqlValue {
        let payload = self.payload();
        if self.flags.is_null() {
            return SqlValue::NULL;
        }

        let raw = if result_type.is_signed() {
            match payload {
                Payload::Int(_) | Payload::Uint(_) | Payload::WideUint(_) => {
                    self.read_i64().to_string().into_bytes()
                }
                Payload::Float(f) => (*f as i64).to_string().into_bytes(),
                _ => return SqlValue::NULL,
            }
        } else if result_type.is_unsigned() {
            match payload {
                Payload::Int(_) | Payload::Uint(_) | Payload::WideUint(_) => {
                    self.read_u64().to_string().into_bytes()
                }
                Payload::Float(f) => (*f as u64).to_string().into_bytes(),
                _ => return SqlValue::NULL,
            }
        } else if result_type.is_float() || result_type == SqlType::Decimal {
            match payload {
                Payload::Int(i) => i.to_string().into_bytes(),
                Payload::Uint(u) => u.to_string().into_bytes(),
                Payload::WideUint(_) => u64::MAX.to_string().into_bytes(),
                Payload::Float(f) => format_float(result_type, *f),
                Payload::Decimal { value, scale } => value.format_mysql(*scale),
                _ => return SqlValue::NULL,
            }
        } else {
            self.to_raw_bytes()
        };
        SqlValue::make_trusted(result_type, raw)
    }

    /// Collation the bytes are read in. A value with none is binary.
    fn byte_collation(&self) -> CollationId {
        let id = self.collation.collation;
        if id.is_unknown() {
            CollationId::BINARY
        } else {
            id
        }
    }

    /// Swap a non-byte payload for its rendering and hand back the bytes.
    fn materialize_bytes(&mut self) -> &mut Vec<u8> {
        if !matches!(self.state, State::Resolved(Payload::Bytes(_))) {
            let raw = self.to_raw_bytes();
            self.state = State::Resolved(Payload::Bytes(raw));
        }
        let State::Resolved(Payload::Bytes(bytes)) = &mut self.state else {
            unreachable!("payload was just replaced with bytes")
        };
        bytes
    }
}
