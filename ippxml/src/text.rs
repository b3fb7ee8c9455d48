use std::str::FromStr;

use ippvm::{FrameTag, Int, Value, Variable};

use crate::error::{LoadError, Result};

/// Parses the `order` attribute: a decimal positive integer, leading
/// zeros allowed.
pub fn parse_order(text: &str) -> Result<u32> {
    match text.trim().parse::<u32>() {
        Ok(order) if order > 0 => Ok(order),
        _ => Err(LoadError::structure(format!(
            "order \"{}\" is not a positive integer",
            text
        ))),
    }
}

/// Replaces every `\ddd` escape (exactly three decimal digits) with the
/// character with that code point.
pub fn decode_escapes(text: &str) -> Result<String> {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        let mut code = 0u32;
        for _ in 0..3 {
            let digit = chars
                .next()
                .and_then(|d| d.to_digit(10))
                .ok_or_else(|| LoadError::BadEscape(text.to_string()))?;
            code = code * 10 + digit;
        }
        let decoded =
            std::char::from_u32(code).ok_or_else(|| LoadError::BadEscape(text.to_string()))?;
        result.push(decoded);
    }

    Ok(result)
}

/// Parses a `var` body of the form `FRAME@name`.
pub fn parse_variable(text: &str) -> Result<Variable> {
    let at = text
        .find('@')
        .ok_or_else(|| LoadError::BadVariable(text.to_string()))?;
    let (frame, name) = (&text[..at], &text[at + 1..]);

    if name.is_empty() {
        return Err(LoadError::BadVariable(text.to_string()));
    }

    let frame = FrameTag::from_str(frame).map_err(LoadError::UnknownFrame)?;
    Ok(Variable::new(frame, name))
}

/// Parses a literal body into a runtime value.
pub fn parse_literal(ty: &str, body: &str) -> Result<Option<Value>> {
    let value = match ty {
        "int" => Value::Int(body.parse::<Int>().map_err(|_| LoadError::BadLiteral {
            ty: "int",
            text: body.to_string(),
        })?),
        "string" => Value::Str(decode_escapes(body)?),
        "bool" => match body {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => {
                return Err(LoadError::BadLiteral {
                    ty: "bool",
                    text: body.to_string(),
                })
            }
        },
        "nil" => {
            if body != "nil" {
                return Err(LoadError::BadLiteral {
                    ty: "nil",
                    text: body.to_string(),
                });
            }
            Value::Nil
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}
