// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{UclError, Value};

fn expected(what: &str, value: &Value, hint: &str, code: u32) -> UclError {
    UclError::TypeError {
        message: format!("Expected {}, got {} {}", what, value.type_name(), value),
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(expected("string", &value, "Quote the value in your config", 420)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(n) => Ok(n),
            Value::Int(n) => Ok(n as f64),
            _ => Err(expected("number", &value, "Use a number value in your config", 421)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

impl TryFrom<Value> for i64 {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(n),
            Value::Float(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => Ok(n as i64),
            Value::Float(_) => Err(expected(
                "integer",
                &value,
                "Use a whole number, or convert with .int in your config",
                421,
            )),
            _ => Err(expected("integer", &value, "Use a number value in your config", 421)),
        }
    }
}

macro_rules! impl_try_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = UclError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$ty>::try_from(n).map_err(|_| UclError::TypeError {
                        message: format!("Number {} out of range for {}", n, stringify!($ty)),
                        hint: Some(format!(
                            "Use a number between {} and {}",
                            <$ty>::MIN,
                            <$ty>::MAX
                        )),
                        code: Some(422),
                    })
                }
            }
        )*
    };
}

impl_try_from_int!(i32, u16, u32, u64, usize);

impl TryFrom<Value> for bool {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(expected(
                "boolean",
                &value,
                "Use true or false, or convert with .bool in your config",
                423,
            )),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = UclError>,
{
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items.into_iter().map(T::try_from).collect(),
            _ => Err(expected("array", &value, "Use [a, b, c] in your config", 424)),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = UclError>,
{
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(None),
            other => T::try_from(other).map(Some),
        }
    }
}

impl TryFrom<Value> for IndexMap<String, Value> {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => Ok(items),
            _ => Err(expected("object", &value, "Use a section or a {...} literal", 425)),
        }
    }
}

impl TryFrom<Value> for HashMap<String, Value> {
    type Error = UclError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        IndexMap::<String, Value>::try_from(value).map(|items| items.into_iter().collect())
    }
}
