//! Scalar coercion from raw service values into fixed-width types
//!
//! Integer converters never fail: unrecognized representations become `0`.
//! The float converter reports unrecognized input as a [`CoerceError`] so the
//! caller can tell "absent" from "zero" if it wants to. Narrowing follows `as`
//! cast semantics (two's complement wraparound, no overflow checks).

use crate::source::RawValue;
use thiserror::Error;

/// Errors reported by [`to_f64`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("unexpected type for GNSS value: {found}")]
    UnsupportedType { found: &'static str },
    #[error("invalid decimal string {text:?}")]
    InvalidNumber { text: String },
}

macro_rules! integer_coercion {
    ($(#[$doc:meta])* $name:ident -> $ty:ty) => {
        $(#[$doc])*
        pub fn $name(value: &RawValue) -> $ty {
            match value {
                RawValue::I8(v) => *v as $ty,
                RawValue::U8(v) => *v as $ty,
                RawValue::I16(v) => *v as $ty,
                RawValue::U16(v) => *v as $ty,
                RawValue::I32(v) => *v as $ty,
                RawValue::U32(v) => *v as $ty,
                RawValue::I64(v) => *v as $ty,
                RawValue::U64(v) => *v as $ty,
                RawValue::F64(_)
                | RawValue::Str(_)
                | RawValue::Seq(_)
                | RawValue::Unsupported(_) => 0,
            }
        }
    };
}

integer_coercion!(
    /// Coerce to `i8`, `0` for non-integer input
    to_i8 -> i8
);
integer_coercion!(
    /// Coerce to `i32`, `0` for non-integer input
    to_i32 -> i32
);
integer_coercion!(
    /// Coerce to `u8`, `0` for non-integer input
    to_u8 -> u8
);
integer_coercion!(
    /// Coerce to `u64`, `0` for non-integer input
    to_u64 -> u64
);

/// Coerce to `f64`
///
/// Accepts floats, any integer width and decimal strings. Strings are parsed
/// as-is; surrounding whitespace is an error.
pub fn to_f64(value: &RawValue) -> Result<f64, CoerceError> {
    match value {
        RawValue::F64(v) => Ok(*v),
        RawValue::I8(v) => Ok(f64::from(*v)),
        RawValue::U8(v) => Ok(f64::from(*v)),
        RawValue::I16(v) => Ok(f64::from(*v)),
        RawValue::U16(v) => Ok(f64::from(*v)),
        RawValue::I32(v) => Ok(f64::from(*v)),
        RawValue::U32(v) => Ok(f64::from(*v)),
        RawValue::I64(v) => Ok(*v as f64),
        RawValue::U64(v) => Ok(*v as f64),
        RawValue::Str(text) => text.parse::<f64>().map_err(|_| CoerceError::InvalidNumber {
            text: text.clone(),
        }),
        RawValue::Seq(_) | RawValue::Unsupported(_) => Err(CoerceError::UnsupportedType {
            found: value.type_name(),
        }),
    }
}

/// Extract a string, empty for any other representation
pub fn to_text(value: &RawValue) -> String {
    match value {
        RawValue::Str(text) => text.clone(),
        _ => String::new(),
    }
}
