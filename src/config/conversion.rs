// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::ast::Value;
use crate::TomlError;

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> TomlError {
    TomlError::TypeError {
        message: format!("Expected {}, got {}", expected, value.type_name()),
        line: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

fn range_error(target: &str, n: i64) -> TomlError {
    TomlError::TypeError {
        message: format!("Integer {} is out of range for {}", n, target),
        line: 0,
        hint: None,
        code: Some(402),
    }
}

impl TryFrom<Value> for bool {
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(type_error("bool", &value, "Use true or false", 403)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(type_error("string", &value, "Use a quoted string", 401)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(n),
            _ => Err(type_error("integer", &value, "Use a whole number without a decimal point", 402)),
        }
    }
}

macro_rules! narrow_int {
    ($($target:ty),*) => {
        $(
            impl TryFrom<Value> for $target {
                type Error = TomlError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$target>::try_from(n).map_err(|_| range_error(stringify!($target), n))
                }
            }
        )*
    };
}

narrow_int!(i8, i16, i32, u8, u16, u32, u64, usize);

impl TryFrom<Value> for f64 {
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(n) => Ok(n as f64),
            _ => Err(type_error("number", &value, "Use a number value", 404)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|f| f as f32)
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Timestamp(ts) => Ok(ts),
            _ => Err(type_error("timestamp", &value, "Use the form YYYY-MM-DDTHH:MM:SSZ", 406)),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = TomlError>,
{
    type Error = TomlError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| T::try_from(item.into_value()))
                .collect(),
            _ => Err(type_error("array", &value, "Use an array [...]", 405)),
        }
    }
}
