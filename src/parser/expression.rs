use log::trace;

use super::value::is_variable_reference;
use super::*;
use crate::lexer::{find_unquoted, tokenize_expression, ExprToken, Operator};
use crate::utils::{format_float_plain, quote};

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl<'a> Resolver<'a> {
    /// Evaluate an arithmetic or concatenation expression.
    ///
    /// Parenthesised groups are reduced innermost-first and their result is
    /// spliced back in as literal text. The flat remainder is folded in two
    /// passes, `* / %` then `+ -`, each left to right.
    pub fn evaluate_expression(&self, expr: &str) -> Result<Value, UclError> {
        let mut expr = expr.to_string();

        while let Some(start) = expr.rfind('(') {
            let end = expr[start..]
                .find(')')
                .map(|offset| start + offset)
                .ok_or_else(|| mismatched_parens(&expr))?;

            let group = self.evaluate_flat(&expr[start + 1..end])?;
            trace!("group '{}' -> {:?}", &expr[start..=end], group);
            expr = format!("{}{}{}", &expr[..start], splice_text(&group), &expr[end + 1..]);
        }

        if find_unquoted(&expr, |c| c == ')').is_some() {
            return Err(mismatched_parens(&expr));
        }

        self.evaluate_flat(&expr)
    }

    fn evaluate_flat(&self, expr: &str) -> Result<Value, UclError> {
        let mut operands: Vec<Value> = Vec::new();
        let mut operators: Vec<Operator> = Vec::new();
        let mut negate = false;

        for token in tokenize_expression(expr) {
            let expecting_operand = operands.len() == operators.len();
            match token {
                ExprToken::Operator(Operator::Sub) if expecting_operand => negate = !negate,
                ExprToken::Operator(op) if expecting_operand => {
                    return Err(UclError::syntax(
                        format!("Unexpected operator '{}' in expression: {}", op.symbol(), expr),
                        208,
                    ));
                }
                ExprToken::Operator(op) => operators.push(op),
                ExprToken::Operand(text) if expecting_operand => {
                    let value = self.resolve_operand(&text)?;
                    operands.push(if negate { negate_value(&value)? } else { value });
                    negate = false;
                }
                ExprToken::Operand(text) => {
                    return Err(UclError::syntax(
                        format!("Missing operator before '{}' in expression: {}", text, expr),
                        209,
                    )
                    .with_hint("Quote text that contains spaces"));
                }
            }
        }

        if operands.is_empty() {
            return Err(UclError::syntax(format!("Empty expression: '{}'", expr), 210));
        }
        if operands.len() == operators.len() {
            return Err(UclError::syntax(format!("Expression ends with an operator: {}", expr), 211));
        }

        let (operands, operators) = fold(operands, operators, true)?;
        let (mut operands, _) = fold(operands, operators, false)?;
        Ok(operands.pop().unwrap_or_default())
    }

    fn resolve_operand(&self, text: &str) -> Result<Value, UclError> {
        if is_variable_reference(text) {
            self.resolve_reference(text)
        } else {
            self.decode_literal(text)
        }
    }
}

/// Fold every operator of one precedence class, left to right. Operators of
/// the other class are passed through with their right operand.
fn fold(
    operands: Vec<Value>,
    operators: Vec<Operator>,
    multiplicative: bool,
) -> Result<(Vec<Value>, Vec<Operator>), UclError> {
    let mut rest = operands.into_iter();
    let mut values = vec![rest.next().unwrap_or_default()];
    let mut pending = Vec::new();

    for (op, rhs) in operators.into_iter().zip(rest) {
        if op.is_multiplicative() == multiplicative {
            let lhs = values.pop().unwrap_or_default();
            values.push(apply(op, lhs, rhs)?);
        } else {
            pending.push(op);
            values.push(rhs);
        }
    }
    Ok((values, pending))
}

fn apply(op: Operator, lhs: Value, rhs: Value) -> Result<Value, UclError> {
    if op == Operator::Add && (matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_))) {
        return Ok(Value::String(format!("{}{}", lhs, rhs)));
    }

    let (l, r) = (to_number(&lhs)?, to_number(&rhs)?);
    match op {
        Operator::Add => Ok(int_or_float(l, r, i64::checked_add, |a, b| a + b)),
        Operator::Sub => Ok(int_or_float(l, r, i64::checked_sub, |a, b| a - b)),
        Operator::Mul => Ok(int_or_float(l, r, i64::checked_mul, |a, b| a * b)),
        Operator::Div => {
            if r.is_zero() {
                return Err(UclError::type_error(format!("Division by zero: {} / {}", lhs, rhs), 406));
            }
            Ok(Value::Float(l.as_f64() / r.as_f64()))
        }
        Operator::Rem => {
            if r.is_zero() {
                return Err(UclError::type_error(format!("Modulo by zero: {} % {}", lhs, rhs), 407));
            }
            Ok(match (l, r) {
                (Number::Int(a), Number::Int(b)) => match a.checked_rem(b) {
                    Some(m) if m != 0 && (m < 0) != (b < 0) => Value::Int(m + b),
                    Some(m) => Value::Int(m),
                    None => Value::Int(0),
                },
                _ => Value::Float(floor_mod(l.as_f64(), r.as_f64())),
            })
        }
    }
}

fn int_or_float(l: Number, r: Number, int_op: fn(i64, i64) -> Option<i64>, float_op: fn(f64, f64) -> f64) -> Value {
    if let (Number::Int(a), Number::Int(b)) = (l, r) {
        if let Some(result) = int_op(a, b) {
            return Value::Int(result);
        }
    }
    Value::Float(float_op(l.as_f64(), r.as_f64()))
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: f64, b: f64) -> f64 {
    let m = a % b;
    if m != 0.0 && (m < 0.0) != (b < 0.0) { m + b } else { m }
}

fn to_number(value: &Value) -> Result<Number, UclError> {
    let parsed = match value {
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    };

    parsed.ok_or_else(|| {
        UclError::type_error(format!("Cannot convert '{}' to number", value), 405)
            .with_hint("Arithmetic needs numeric operands; only + accepts strings")
    })
}

fn parse_number(text: &str) -> Option<Number> {
    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>().ok().map(Number::Float)
    } else {
        text.parse::<i64>().ok().map(Number::Int)
    }
}

fn negate_value(value: &Value) -> Result<Value, UclError> {
    Ok(match to_number(value)? {
        Number::Int(i) => i.checked_neg().map_or(Value::Float(-(i as f64)), Value::Int),
        Number::Float(f) => Value::Float(-f),
    })
}

/// Text that decodes back to `value` when re-tokenized as an operand.
fn splice_text(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Float(f) => format_float_plain(*f),
        other => other.to_string(),
    }
}

fn mismatched_parens(expr: &str) -> UclError {
    UclError::syntax(format!("Mismatched parentheses in expression: {}", expr), 207)
        .with_hint("Close every '(' with ')'")
}
