//! Numeric literal values.
//!
//! Integers become `i64`. A literal with a fraction or an exponent (rich
//! dialect only) becomes `f64`.

use crate::lex_error::LexError;
use crate::Span;

/// Decoded value of a number token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

/// Decode a number token. Out-of-range values push an error and saturate.
pub fn cook_number(text: &str, span: Span, errors: &mut Vec<LexError>) -> NumberValue {
    if text.contains(['.', 'e', 'E']) {
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => NumberValue::Float(value),
            _ => {
                errors.push(LexError::float_overflow(span));
                NumberValue::Float(f64::MAX)
            }
        }
    } else {
        match text.parse::<i64>() {
            Ok(value) => NumberValue::Int(value),
            Err(_) => {
                errors.push(LexError::int_overflow(span));
                NumberValue::Int(i64::MAX)
            }
        }
    }
}
