//! SQL type system shared by the evaluation engine.
//!
//! This crate provides:
//! - `SqlType`: the closed enumeration of MySQL column/literal types
//! - `SqlValue`: a type tag plus the value's raw MySQL text encoding
//! - Lenient and strict parsing helpers used when ingesting literals
//!
//! # Raw Encoding
//!
//! `SqlValue` stores values the way they travel on the MySQL wire: integers,
//! floats and decimals as their decimal text, strings and blobs as bytes,
//! hex literals as their source spelling (`0x1F`, `X'1F'`). Typed accessors
//! (`to_i64`, `to_f64`, ...) parse on demand.

mod errors;
pub mod parse;
mod sql_type;
mod value;

pub use errors::ValueError;
pub use sql_type::SqlType;
pub use value::SqlValue;
