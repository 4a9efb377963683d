//! Coercion and decoding of raw positioning records

pub mod coerce;
pub mod decoder;

pub use coerce::CoerceError;
pub use decoder::decode;
