use std::str::FromStr;

use crate::ast::Value;
use crate::UclError;

/// Target of an explicit `.int`, `.float`, `.string` or `.bool` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Int,
    Float,
    String,
    Bool,
}

impl TargetType {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Int => "int",
            TargetType::Float => "float",
            TargetType::String => "string",
            TargetType::Bool => "bool",
        }
    }
}

impl FromStr for TargetType {
    type Err = UclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(TargetType::Int),
            "float" => Ok(TargetType::Float),
            "string" => Ok(TargetType::String),
            "bool" => Ok(TargetType::Bool),
            other => Err(UclError::type_error(format!("Unknown target type: {}", other), 409)),
        }
    }
}

/// Apply an explicit conversion.
///
/// `string` never fails. `int` truncates floats toward zero and parses
/// numeric text. `bool` accepts numbers (non-zero is true) and the words
/// true/false, yes/no, 1/0 in any case.
pub fn convert(value: &Value, target: TargetType) -> Result<Value, UclError> {
    match target {
        TargetType::Int => to_int(value).map(Value::Int),
        TargetType::Float => to_float(value).map(Value::Float),
        TargetType::String => Ok(Value::String(value.to_string())),
        TargetType::Bool => to_bool(value).map(Value::Bool),
    }
}

fn to_int(value: &Value) -> Result<i64, UclError> {
    let truncated = match value {
        Value::Int(i) => return Ok(*i),
        Value::Float(f) => truncate(*f),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    };
    truncated.ok_or_else(|| cannot_convert(value, TargetType::Int, 401))
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn to_float(value: &Value) -> Result<f64, UclError> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| cannot_convert(value, TargetType::Float, 402)),
        _ => Err(cannot_convert(value, TargetType::Float, 402)),
    }
}

fn to_bool(value: &Value) -> Result<bool, UclError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(cannot_convert(value, TargetType::Bool, 403)
                .with_hint("Recognised words are true/false, yes/no and 1/0")),
        },
        _ => Err(cannot_convert(value, TargetType::Bool, 404)),
    }
}

fn cannot_convert(value: &Value, target: TargetType, code: u32) -> UclError {
    UclError::type_error(
        format!("Cannot convert {} '{}' to {}", value.type_name(), value, target.as_str()),
        code,
    )
}
