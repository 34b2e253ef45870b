use super::*;

/// Split an expression into operands and operators.
///
/// A quoted span is one operand with its quotes kept. Each unquoted operator
/// char is its own token, whitespace separates operands, and everything else
/// accumulates, so dotted paths survive intact. Brackets get no special
/// treatment.
pub fn tokenize_expression(expr: &str) -> Vec<ExprToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for ch in expr.chars() {
        match quote {
            Some(q) => {
                current.push(ch);
                if ch == q && prev != Some('\\') {
                    tokens.push(ExprToken::Operand(std::mem::take(&mut current)));
                    quote = None;
                }
            }
            None if ch == '"' || ch == '\'' => {
                flush_operand(&mut tokens, &mut current);
                current.push(ch);
                quote = Some(ch);
            }
            None => {
                if let Some(op) = Operator::from_char(ch) {
                    flush_operand(&mut tokens, &mut current);
                    tokens.push(ExprToken::Operator(op));
                } else if ch.is_whitespace() {
                    flush_operand(&mut tokens, &mut current);
                } else {
                    current.push(ch);
                }
            }
        }
        prev = Some(ch);
    }

    flush_operand(&mut tokens, &mut current);
    tokens
}

fn flush_operand(tokens: &mut Vec<ExprToken>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        tokens.push(ExprToken::Operand(trimmed.to_string()));
    }
    current.clear();
}
