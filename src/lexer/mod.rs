// Author: Dustin Pilgrim
// License: MIT

mod scanner;
mod tokenizer;

pub use scanner::{
    contains_operator, find_top_level, find_unquoted, split_key_value, split_top_level,
    strip_block_comments, strip_comments, strip_line_comment, QuoteTracker,
};
pub use tokenizer::tokenize_expression;

/// Arithmetic operators recognised outside quoted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// A token of an arithmetic/concatenation expression.
///
/// Operands keep their raw text (quotes included) and are decoded later.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprToken {
    Operand(String),
    Operator(Operator),
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '%' => Some(Operator::Rem),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Rem => '%',
        }
    }

    /// `*`, `/` and `%` bind tighter than `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div | Operator::Rem)
    }
}

pub(crate) fn is_operator_char(ch: char) -> bool {
    Operator::from_char(ch).is_some()
}

#[cfg(test)]
mod tests;
