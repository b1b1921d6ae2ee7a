/// Whether `value` is a non-empty run of DID `idchar`s.
///
/// `idchar = ALPHA / DIGIT / "." / "-" / "_" / pct-encoded`
/// ([DID Core](https://www.w3.org/TR/did-core/#did-syntax)).
pub fn is_idchar_segment(value: &str) -> bool {
    !value.is_empty() && scan(value, is_idchar)
}

/// Whether `value` conforms to `segment` from
/// [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-3.3).
///
/// `segment = *pchar`, `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub fn is_path_segment(value: &str) -> bool {
    scan(value, |c| {
        is_unreserved(c) || is_sub_delim(c) || c == ':' || c == '@'
    })
}

/// Whether `value` conforms to `fragment` from
/// [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-3.5).
///
/// `fragment = *( pchar / "/" / "?" )`
pub fn is_fragment(value: &str) -> bool {
    scan(value, |c| {
        is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@' | '/' | '?')
    })
}

/// Walks `value`, accepting `allowed` characters and complete
/// `pct-encoded = "%" HEXDIG HEXDIG` escapes.
fn scan(value: &str, allowed: impl Fn(char) -> bool) -> bool {
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex = (chars.next(), chars.next());
            match hex {
                (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => continue,
                _ => return false,
            }
        }

        if !allowed(c) {
            return false;
        }
    }

    true
}

fn is_idchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}
