//! Attribute bodies (the text between `#[` and `]`) → annotations.

use super::lex::{literal_len, split_top_level};
use crate::metadata::Annotation;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*(?:\s*::\s*[A-Za-z_]\w*)*").unwrap());

static RE_API_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^api_method(?:\s*\(\s*\))?$").unwrap());

static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^api_description\s*(?:\((.*)\)|=(.*))$").unwrap());

static RE_INT_VALIDATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^api_int_validation\s*\(\s*",
        r"(?:min\s*=\s*)?(-?\d+)\s*,\s*",
        r"(?:max\s*=\s*)?(-?\d+)\s*,?\s*\)$"
    ))
    .unwrap()
});

static RE_REQUIRED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^api_required(?:\s*\(\s*(true|false)\s*\))?$").unwrap());

static RE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^api_return\s*\((.*)\)$").unwrap());

/// What a parsed attribute attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Annotation on the type, method or parameter that follows.
    Item(Annotation),
    /// `#[api_return(...)]`: annotations on the method's return position.
    Return(Vec<Annotation>),
}

/// Parse one attribute body, e.g. `api_int_validation(1, 10)`.
pub fn parse_attribute(body: &str) -> Attribute {
    let body = body.trim();
    if let Some(caps) = RE_RETURN.captures(body) {
        let inner = split_top_level(&caps[1], ',')
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(parse_annotation)
            .collect();
        return Attribute::Return(inner);
    }
    Attribute::Item(parse_annotation(body))
}

/// Parse a single annotation. Unknown or malformed attributes become
/// [`Annotation::Other`] carrying the attribute path.
pub fn parse_annotation(body: &str) -> Annotation {
    let body = body.trim();

    if RE_API_METHOD.is_match(body) {
        return Annotation::ApiMethod;
    }

    if let Some(caps) = RE_DESCRIPTION.captures(body) {
        let lit = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        if let Some(text) = string_literal(lit.trim()) {
            return Annotation::Description(text);
        }
    }

    if let Some(caps) = RE_INT_VALIDATION.captures(body) {
        match (caps[1].parse::<i64>(), caps[2].parse::<i64>()) {
            (Ok(min), Ok(max)) => return Annotation::IntValidation { min, max },
            _ => debug!(attribute = body, "validation bounds out of range"),
        }
    }

    if let Some(caps) = RE_REQUIRED.captures(body) {
        let required = caps.get(1).map_or(true, |m| m.as_str() == "true");
        return Annotation::Required(required);
    }

    let path: String = RE_PATH
        .find(body)
        .map_or(body, |m| m.as_str())
        .split_whitespace()
        .collect();
    if path.starts_with("api_") {
        debug!(attribute = body, "unrecognized api attribute kept as opaque");
    }
    Annotation::Other(path)
}

/// Value of a plain (`"..."`) or raw (`r#"..."#`) string literal spanning
/// all of `lit`.
fn string_literal(lit: &str) -> Option<String> {
    if !(lit.starts_with('"') || lit.starts_with('r')) || literal_len(lit)? != lit.len() {
        return None;
    }
    if let Some(raw) = lit.strip_prefix('r') {
        let hashes = &raw[..raw.len() - raw.trim_start_matches('#').len()];
        let closing = format!("\"{hashes}");
        let text = raw[hashes.len()..]
            .strip_prefix('"')?
            .strip_suffix(closing.as_str())?;
        return Some(text.to_string());
    }
    let text = lit.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(text))
}

/// Resolve the escapes a string literal may contain.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let rest = chars.as_str();
                let byte = rest
                    .get(..2)
                    .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match byte {
                    Some(byte) if byte.is_ascii() => {
                        out.push(char::from(byte));
                        chars = rest[2..].chars();
                    }
                    _ => out.push_str("\\x"),
                }
            }
            Some('u') => {
                let rest = chars.as_str();
                let decoded = rest
                    .strip_prefix('{')
                    .and_then(|r| r.find('}').map(|end| (&r[..end], end + 2)))
                    .and_then(|(hex, used)| {
                        let code = u32::from_str_radix(&hex.replace('_', ""), 16).ok()?;
                        char::from_u32(code).map(|c| (c, used))
                    });
                match decoded {
                    Some((c, used)) => {
                        out.push(c);
                        chars = rest[used..].chars();
                    }
                    None => out.push_str("\\u"),
                }
            }
            // line continuation: drop the line break and leading whitespace
            Some('\n') => {
                chars = chars.as_str().trim_start().chars();
            }
            Some('\r') if chars.as_str().starts_with('\n') => {
                chars = chars.as_str().trim_start().chars();
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
