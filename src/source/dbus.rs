//! D-Bus backend for the Tachyon GNSS modem service

use crate::source::{AcquireResult, PositionSource, RawRecord, RawValue};
use std::collections::HashMap;
use tracing::debug;
use zbus::zvariant::{OwnedValue, Value};
use zbus::{Connection, Proxy};

/// Well-known bus name of the GNSS service
pub const GNSS_BUS_NAME: &str = "io.particle.tachyon.GNSS";
/// Object path of the modem exposing fix data
pub const GNSS_OBJECT_PATH: &str = "/io/particle/tachyon/GNSS/Modem";
/// Interface carrying the `GetGnss` method
pub const GNSS_INTERFACE: &str = "io.particle.tachyon.GNSS.Modem";
/// Method returning the `a{sv}` positioning record
pub const GET_GNSS_METHOD: &str = "GetGnss";

/// Position source backed by the system bus
///
/// Owns one proxy for the lifetime of the process.
pub struct DbusPositionSource {
    proxy: Proxy<'static>,
}

impl DbusPositionSource {
    /// Connect to the system bus and bind the modem proxy
    pub async fn connect() -> AcquireResult<Self> {
        let connection = Connection::system().await?;
        Self::with_connection(&connection).await
    }

    /// Bind the modem proxy on an existing connection
    pub async fn with_connection(connection: &Connection) -> AcquireResult<Self> {
        let proxy = Proxy::new(connection, GNSS_BUS_NAME, GNSS_OBJECT_PATH, GNSS_INTERFACE).await?;
        Ok(Self { proxy })
    }
}

impl PositionSource for DbusPositionSource {
    async fn acquire(&mut self) -> AcquireResult<RawRecord> {
        let reply: HashMap<String, OwnedValue> = self.proxy.call(GET_GNSS_METHOD, &()).await?;
        debug!(fields = reply.len(), "GetGnss reply received");

        Ok(reply
            .iter()
            .map(|(key, value)| (key.clone(), raw_value(value)))
            .collect())
    }

    fn name(&self) -> &str {
        GNSS_BUS_NAME
    }
}

/// Convert a bus value into the closed [`RawValue`] set
///
/// Variants are unwrapped; arrays and structures both become sequences.
pub fn raw_value(value: &Value<'_>) -> RawValue {
    match value {
        Value::U8(v) => RawValue::U8(*v),
        Value::I16(v) => RawValue::I16(*v),
        Value::U16(v) => RawValue::U16(*v),
        Value::I32(v) => RawValue::I32(*v),
        Value::U32(v) => RawValue::U32(*v),
        Value::I64(v) => RawValue::I64(*v),
        Value::U64(v) => RawValue::U64(*v),
        Value::F64(v) => RawValue::F64(*v),
        Value::Str(s) => RawValue::Str(s.as_str().to_string()),
        Value::Value(inner) => raw_value(inner),
        Value::Array(array) => RawValue::Seq(array.inner().iter().map(raw_value).collect()),
        Value::Structure(structure) => RawValue::Seq(structure.fields().iter().map(raw_value).collect()),
        Value::Bool(_) => RawValue::Unsupported("bool"),
        Value::Dict(_) => RawValue::Unsupported("dict"),
        _ => RawValue::Unsupported("other"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbus::zvariant::Array;

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(raw_value(&Value::I32(-3)), RawValue::I32(-3));
        assert_eq!(raw_value(&Value::U64(42)), RawValue::U64(42));
        assert_eq!(raw_value(&Value::F64(1.5)), RawValue::F64(1.5));
        assert_eq!(raw_value(&Value::from("N")), RawValue::Str("N".to_string()));
        assert_eq!(raw_value(&Value::Bool(true)), RawValue::Unsupported("bool"));
    }

    #[test]
    fn test_nested_variant_is_unwrapped() {
        let wrapped = Value::Value(Box::new(Value::U8(7)));
        assert_eq!(raw_value(&wrapped), RawValue::U8(7));
    }

    #[test]
    fn test_array_becomes_sequence() {
        let array = Array::from(vec![2024i32, 6, 15]);
        assert_eq!(
            raw_value(&Value::Array(array)),
            RawValue::Seq(vec![RawValue::I32(2024), RawValue::I32(6), RawValue::I32(15)])
        );
    }

    #[test]
    fn test_structure_becomes_sequence() {
        let raw = raw_value(&Value::from((5u8, 45u8, 180i32, 38u8)));
        assert_eq!(raw.as_seq().map(|s| s.len()), Some(4));
        assert_eq!(raw.as_seq().unwrap()[2], RawValue::I32(180));
    }
}
