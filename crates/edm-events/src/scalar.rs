//! String literal unescaping.

use std::borrow::Cow;

/// Unescape the body of a JSON string literal (quotes already stripped).
///
/// On failure, returns the offending escape sequence.
pub fn unescape(s: &str) -> Result<Cow<'_, str>, String> {
    if !s.contains('\\') {
        return Ok(Cow::Borrowed(s));
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{08}'),
            Some('f') => result.push('\u{0C}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('u') => {
                let high = hex4(&mut chars)?;
                let ch = if (0xD800..0xDC00).contains(&high) {
                    // Surrogate pair: a second \uXXXX must follow.
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(format!("\\u{high:04x}"));
                    }
                    let low = hex4(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(format!("\\u{low:04x}"));
                    }
                    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
                } else {
                    char::from_u32(high)
                };
                match ch {
                    Some(ch) => result.push(ch),
                    None => return Err(format!("\\u{high:04x}")),
                }
            }
            Some(other) => return Err(format!("\\{other}")),
            None => return Err("\\".to_string()),
        }
    }

    Ok(Cow::Owned(result))
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("\\u{hex}"));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| format!("\\u{hex}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_no_escapes_borrows() {
        assert!(matches!(unescape("plain"), Ok(Cow::Borrowed("plain"))));
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(unescape(r#"a\"b\\c\/d\n"#).unwrap(), "a\"b\\c/d\n");
        assert_eq!(unescape(r"\t\r\b\f").unwrap(), "\t\r\u{08}\u{0C}");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(unescape(r"\u00e9").unwrap(), "é");
        assert_eq!(unescape(r"\ud83d\ude00").unwrap(), "😀");
    }

    #[test]
    fn test_invalid_escapes() {
        assert_eq!(unescape(r"\q").unwrap_err(), r"\q");
        assert_eq!(unescape(r"\u12").unwrap_err(), r"\u12");
        assert_eq!(unescape(r"\ud83d").unwrap_err(), r"\ud83d");
    }
}
