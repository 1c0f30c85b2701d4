//! Canonical text form of value trees.
//!
//! The corruption engine mutates the *text* produced by [`serialize`] and
//! parses it back with [`deserialize`], so the two functions form a contract:
//! object keys keep their insertion order, numbers stay numbers and strings
//! stay strings.
//!
//! # Example
//!
//! ```
//! use badbatch::codec;
//! use serde_json::json;
//!
//! let text = codec::serialize(&json!({"b": 1, "a": "x"}))?;
//! assert_eq!(text, "{\n  \"b\": 1,\n  \"a\": \"x\"\n}");
//!
//! // Redundant leading zeros, as left behind by digit substitution, parse.
//! assert_eq!(codec::deserialize("{\"n\": 00}")?, json!({"n": 0}));
//! # Ok::<(), badbatch::Error>(())
//! ```

use crate::Result;
use serde_json::Value;

/// Serialize a tree to its canonical, pretty-printed text.
///
/// Entries are indented by two spaces and keys are separated from values by
/// `": "`.
pub fn serialize(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parse canonical text back into a tree.
///
/// Numeric literals with redundant leading zeros in their integer part are
/// accepted and read as if the zeros were absent. String contents are never
/// touched.
pub fn deserialize(text: &str) -> Result<Value> {
    let normalized = trim_leading_zeros(text);
    Ok(serde_json::from_str(&normalized)?)
}

/// Collapse leading zeros in the integer part of every numeric literal that
/// sits outside of a string.
fn trim_leading_zeros(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '-' | '0'..='9' => {
                let mut literal = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() || matches!(next, '.' | 'e' | 'E' | '+' | '-') {
                        literal.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                push_number(&mut out, &literal);
            }
            _ => out.push(c),
        }
    }

    out
}

fn push_number(out: &mut String, literal: &str) {
    let (sign, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", literal),
    };
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (integer, tail) = unsigned.split_at(split);

    out.push_str(sign);
    let trimmed = integer.trim_start_matches('0');
    if trimmed.is_empty() && !integer.is_empty() {
        out.push('0');
    } else {
        out.push_str(trimmed);
    }
    out.push_str(tail);
}
