//! Bracketed attribute lists
//!
//!     Tokenizes the inside of `[...]` into an ordered, typed [`Attributes`] map.
//!
//!     Grammar per token: `key`, `key=unquoted`, `key="double quoted"` or
//!     `key='single quoted'`. Quoted values may contain spaces and stay strings.
//!     Unquoted values are coerced in this order: integer (`^\d+$`), float
//!     (`^\d*\.\d+$`), the literals `true`/`false`, otherwise a plain string. A bare
//!     key is the boolean `true`.
//!
//!     Tokens that cannot be read (a stray quote, a leading `=`, a key with
//!     characters HTML does not allow in attribute names) are skipped; they never
//!     make the surrounding field fail.

use crate::model::{AttributeValue, Attributes};
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d*\.\d+$").unwrap());

/// One `key[=value]` token of a bracket interior.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeToken<'a> {
    pub key: &'a str,
    pub value: AttributeValue,
    /// The value as written, without quotes. Empty for a bare key.
    pub lexeme: &'a str,
}

/// Parse a bracket interior such as `required min=3 placeholder="Enter name"`.
pub fn parse_attributes(input: &str) -> Attributes {
    attribute_tokens(input)
        .into_iter()
        .map(|token| (token.key.to_string(), token.value))
        .collect()
}

/// The readable tokens of a bracket interior, in source order.
pub fn attribute_tokens(input: &str) -> Vec<AttributeToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let key_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '"' || c == '\'')
            .unwrap_or(rest.len());
        let (key, after_key) = rest.split_at(key_len);

        if key.is_empty() {
            rest = skip_token(rest);
            continue;
        }

        let (value, lexeme, remaining) = match after_key.strip_prefix('=') {
            Some(after_eq) => read_value(after_eq),
            None => (AttributeValue::Bool(true), "", after_key),
        };
        rest = remaining;

        if is_attribute_name(key) {
            tokens.push(AttributeToken { key, value, lexeme });
        }
    }

    tokens
}

/// Whether `key` may be written out as an HTML attribute name.
pub fn is_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
}

/// Coerce an unquoted value.
pub fn coerce_value(raw: &str) -> AttributeValue {
    if INTEGER.is_match(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return AttributeValue::Integer(n);
        }
    }
    if FLOAT.is_match(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return AttributeValue::Float(f);
        }
    }
    match raw {
        "true" => AttributeValue::Bool(true),
        "false" => AttributeValue::Bool(false),
        _ => AttributeValue::String(raw.to_string()),
    }
}

fn read_value(input: &str) -> (AttributeValue, &str, &str) {
    let mut chars = input.chars();
    match chars.next() {
        Some(quote @ ('"' | '\'')) => {
            let body = &input[1..];
            match body.find(quote) {
                Some(end) => (
                    AttributeValue::String(body[..end].to_string()),
                    &body[..end],
                    &body[end + 1..],
                ),
                // Unterminated quote: take the remainder as the value
                None => (AttributeValue::String(body.to_string()), body, ""),
            }
        }
        Some(c) if !c.is_whitespace() => {
            let end = input.find(char::is_whitespace).unwrap_or(input.len());
            let raw = &input[..end];
            (coerce_value(raw), raw, &input[end..])
        }
        _ => (AttributeValue::String(String::new()), "", input),
    }
}

/// Skip one unreadable token, honouring quotes so a quoted run is skipped whole.
fn skip_token(input: &str) -> &str {
    let mut quote: Option<char> = None;
    for (idx, ch) in input.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch.is_whitespace() && idx > 0 => return &input[idx..],
            None => {}
        }
    }
    ""
}
