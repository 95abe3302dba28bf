//! Literal-, comment- and bracket-aware scanning helpers shared by the
//! source and attribute parsers.

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length of the string, byte-string, raw-string or char literal at the
/// start of `s`, or `None` if `s` does not start with one.
///
/// Lifetimes (`'a`) are not literals. Unterminated literals run to the end.
pub(crate) fn literal_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'b') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'r') {
        let mut j = i + 1;
        while bytes.get(j) == Some(&b'#') {
            j += 1;
        }
        if bytes.get(j) != Some(&b'"') {
            return None;
        }
        let closing = format!("\"{}", "#".repeat(j - i - 1));
        let body = j + 1;
        return Some(
            s[body..]
                .find(&closing)
                .map_or(s.len(), |k| body + k + closing.len()),
        );
    }
    match bytes.get(i) {
        Some(b'"') => Some(i + quoted_len(&s[i..])),
        Some(b'\'') => char_literal_len(&s[i..]).map(|n| i + n),
        _ => None,
    }
}

/// `s` starts with `"`.
fn quoted_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    s.len()
}

/// `s` starts with `'`.
fn char_literal_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices().skip(1);
    let (_, first) = chars.next()?;
    match first {
        '\\' => {
            chars.next()?;
            chars
                .take(8)
                .find(|&(_, c)| c == '\'')
                .map(|(i, _)| i + 1)
        }
        '\'' => None,
        _ => match chars.next() {
            Some((i, '\'')) => Some(i + 1),
            _ => None,
        },
    }
}

/// Length of a (possibly nested) block comment at the start of `s`.
fn block_comment_len(s: &str) -> usize {
    let mut depth = 0usize;
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if rest.starts_with("/*") {
            depth += 1;
            i += 2;
        } else if rest.starts_with("*/") {
            depth = depth.saturating_sub(1);
            i += 2;
            if depth == 0 {
                return i;
            }
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    s.len()
}

/// Replace line and block comments (doc comments included) with a space.
pub(crate) fn strip_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut prev = ' ';
    let mut i = 0;
    while i < src.len() {
        let rest = &src[i..];
        if rest.starts_with("//") {
            i += rest.find('\n').unwrap_or(rest.len());
            out.push(' ');
            prev = ' ';
            continue;
        }
        if rest.starts_with("/*") {
            i += block_comment_len(rest);
            out.push(' ');
            prev = ' ';
            continue;
        }
        if !is_ident_char(prev) {
            if let Some(n) = literal_len(rest) {
                out.push_str(&rest[..n]);
                i += n;
                prev = '"';
                continue;
            }
        }
        let c = rest.chars().next().unwrap_or(' ');
        out.push(c);
        prev = c;
        i += c.len_utf8();
    }
    out
}

/// Length of the bracket group opening at the start of `s`, closing
/// bracket included. `()`, `[]` and `{}` are counted together.
pub(crate) fn balanced_len(s: &str) -> usize {
    let mut depth = 0usize;
    let mut prev = ' ';
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if !is_ident_char(prev) {
            if let Some(n) = literal_len(rest) {
                i += n;
                prev = '"';
                continue;
            }
        }
        let c = rest.chars().next().unwrap_or(' ');
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        prev = c;
        i += c.len_utf8();
    }
    s.len()
}

/// Length of the generic parameter list opening with `<` at the start of
/// `s`, closing `>` included. Arrows (`->`) do not close the list.
pub(crate) fn angle_len(s: &str) -> usize {
    let mut depth = 0usize;
    let mut prev = ' ';
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if prev == '-' => {}
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        prev = c;
    }
    s.len()
}

/// Split `s` on `sep` wherever it is outside brackets, generics and
/// literals.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = ' ';
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if !is_ident_char(prev) {
            if let Some(n) = literal_len(rest) {
                i += n;
                prev = '"';
                continue;
            }
        }
        let c = rest.chars().next().unwrap_or(' ');
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == '-' || prev == '=' => {}
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
        prev = c;
        i += c.len_utf8();
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_lengths() {
        assert_eq!(literal_len(r#""a\"b" rest"#), Some(6));
        assert_eq!(literal_len(r##"r#"x"y"# rest"##), Some(8));
        assert_eq!(literal_len("b\"xy\""), Some(5));
        assert_eq!(literal_len("'{' rest"), Some(3));
        assert_eq!(literal_len(r"'\'' rest"), Some(4));
        assert_eq!(literal_len("'a> rest"), None);
        assert_eq!(literal_len("bar"), None);
        assert_eq!(literal_len("return"), None);
    }

    #[test]
    fn strip_comments_keeps_strings() {
        let src = "a // line\nb /* block /* nested */ */ c \"// not a comment\"";
        assert_eq!(strip_comments(src), "a  \nb   c \"// not a comment\"");
    }

    #[test]
    fn balanced_skips_literals() {
        let s = "{ let c = '}'; let s = \"}\"; } tail";
        assert_eq!(&s[..balanced_len(s)], "{ let c = '}'; let s = \"}\"; }");
    }

    #[test]
    fn angle_ignores_arrows() {
        let s = "<F: Fn(u8) -> u8>(f: F)";
        assert_eq!(&s[..angle_len(s)], "<F: Fn(u8) -> u8>");
    }

    #[test]
    fn split_respects_nesting() {
        let parts = split_top_level("a: HashMap<K, V>, f: impl Fn(u8, u8) -> u8, s: &str", ',');
        assert_eq!(
            parts,
            vec!["a: HashMap<K, V>", " f: impl Fn(u8, u8) -> u8", " s: &str"]
        );
    }

    #[test]
    fn split_ignores_separators_in_strings() {
        let parts = split_top_level(r#"api_description("a, b"), api_required"#, ',');
        assert_eq!(parts, vec![r#"api_description("a, b")"#, " api_required"]);
    }
}
