//! Acquisition channel for raw positioning records
//!
//! This module provides the abstraction over the local positioning service,
//! the dynamically-typed record it returns, and the D-Bus and mock backends.

pub mod channel;
pub mod dbus;
pub mod mock;
pub mod error;

pub use channel::PositionSource;
pub use dbus::DbusPositionSource;
pub use mock::MockPositionSource;
pub use error::{AcquireError, AcquireResult};

use std::collections::HashMap;

/// Dynamically-typed value as delivered by the positioning service
///
/// The concrete representation of a field differs between firmware builds,
/// so integers of every width are kept distinct and resolved by the
/// coercion functions in [`crate::processing::coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    Seq(Vec<RawValue>),
    /// Any other wire type (booleans, dictionaries, object paths, ...)
    Unsupported(&'static str),
}

impl RawValue {
    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::I8(_) => "i8",
            RawValue::U8(_) => "u8",
            RawValue::I16(_) => "i16",
            RawValue::U16(_) => "u16",
            RawValue::I32(_) => "i32",
            RawValue::U32(_) => "u32",
            RawValue::I64(_) => "i64",
            RawValue::U64(_) => "u64",
            RawValue::F64(_) => "f64",
            RawValue::Str(_) => "string",
            RawValue::Seq(_) => "sequence",
            RawValue::Unsupported(name) => *name,
        }
    }

    /// Borrow the elements if this value is a sequence
    pub fn as_seq(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::Seq(items) => Some(items),
            _ => None,
        }
    }
}

macro_rules! raw_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for RawValue {
                fn from(value: $ty) -> Self {
                    RawValue::$variant(value)
                }
            }
        )*
    };
}

raw_value_from!(
    i8 => I8, u8 => U8, i16 => I16, u16 => U16,
    i32 => I32, u32 => U32, i64 => I64, u64 => U64,
    f64 => F64, String => Str,
);

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Str(value.to_string())
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        RawValue::Seq(values.into_iter().map(Into::into).collect())
    }
}

/// One reply of the positioning service: field name to raw value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
