//! Decoded hostnamed property values.
//!
//! hostnamed exports its properties as D-Bus variants. [`PropertyValue`]
//! unwraps them into a plain enum so callers can match on the payload or use
//! the checked accessors instead of inspecting `zvariant` types directly.

use std::fmt;

use serde::Serialize;
use zbus::zvariant::{Array, Value};

/// A property value with its variant wrapper removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Str(String),
    ObjectPath(String),
    Signature(String),
    /// `ay` values such as `MachineID` and `BootID`.
    Bytes(Vec<u8>),
    Array(Vec<PropertyValue>),
    /// Containers passed through without decoding (dicts, structs, fds).
    Other { signature: String },
}

impl PropertyValue {
    /// D-Bus name of the value's type, used in type mismatch errors.
    pub fn type_name(&self) -> &str {
        match self {
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Byte(_) => "byte",
            PropertyValue::Int16(_) => "int16",
            PropertyValue::UInt16(_) => "uint16",
            PropertyValue::Int32(_) => "int32",
            PropertyValue::UInt32(_) => "uint32",
            PropertyValue::Int64(_) => "int64",
            PropertyValue::UInt64(_) => "uint64",
            PropertyValue::Double(_) => "double",
            PropertyValue::Str(_) => "string",
            PropertyValue::ObjectPath(_) => "object path",
            PropertyValue::Signature(_) => "signature",
            PropertyValue::Bytes(_) => "byte array",
            PropertyValue::Array(_) => "array",
            PropertyValue::Other { signature } => signature,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Unsigned integers widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::Byte(v) => Some(u64::from(*v)),
            PropertyValue::UInt16(v) => Some(u64::from(*v)),
            PropertyValue::UInt32(v) => Some(u64::from(*v)),
            PropertyValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PropertyValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Take the string payload, handing the value back if it is not a string.
    pub fn into_string(self) -> Result<String, PropertyValue> {
        match self {
            PropertyValue::Str(s) => Ok(s),
            other => Err(other),
        }
    }

    fn from_array(array: &Array<'_>) -> Self {
        if array.element_signature().to_string() == "y" {
            let bytes = array
                .inner()
                .iter()
                .filter_map(|element| match element {
                    Value::U8(b) => Some(*b),
                    _ => None,
                })
                .collect();
            return PropertyValue::Bytes(bytes);
        }

        PropertyValue::Array(array.inner().iter().map(PropertyValue::from).collect())
    }
}

impl From<&Value<'_>> for PropertyValue {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Bool(b) => PropertyValue::Bool(*b),
            Value::U8(v) => PropertyValue::Byte(*v),
            Value::I16(v) => PropertyValue::Int16(*v),
            Value::U16(v) => PropertyValue::UInt16(*v),
            Value::I32(v) => PropertyValue::Int32(*v),
            Value::U32(v) => PropertyValue::UInt32(*v),
            Value::I64(v) => PropertyValue::Int64(*v),
            Value::U64(v) => PropertyValue::UInt64(*v),
            Value::F64(v) => PropertyValue::Double(*v),
            Value::Str(s) => PropertyValue::Str(s.to_string()),
            Value::ObjectPath(p) => PropertyValue::ObjectPath(p.to_string()),
            Value::Signature(s) => PropertyValue::Signature(s.to_string()),
            Value::Value(inner) => PropertyValue::from(&**inner),
            Value::Array(array) => PropertyValue::from_array(array),
            other => PropertyValue::Other {
                signature: other.value_signature().to_string(),
            },
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Byte(v) => write!(f, "{v}"),
            PropertyValue::Int16(v) => write!(f, "{v}"),
            PropertyValue::UInt16(v) => write!(f, "{v}"),
            PropertyValue::Int32(v) => write!(f, "{v}"),
            PropertyValue::UInt32(v) => write!(f, "{v}"),
            PropertyValue::Int64(v) => write!(f, "{v}"),
            PropertyValue::UInt64(v) => write!(f, "{v}"),
            PropertyValue::Double(v) => write!(f, "{v}"),
            PropertyValue::Str(s) | PropertyValue::ObjectPath(s) | PropertyValue::Signature(s) => {
                f.write_str(s)
            }
            // Same rendering hostnamectl uses for machine and boot IDs
            PropertyValue::Bytes(b) => f.write_str(&hex::encode(b)),
            PropertyValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            PropertyValue::Other { signature } => write!(f, "<{signature}>"),
        }
    }
}
