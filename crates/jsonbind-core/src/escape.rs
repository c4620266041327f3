//! The JSON escape codec -- the named escape set plus `\uXXXX`.

/// Decode a named escape character (the character following a backslash).
///
/// The accepted set is `"` `\` `n` `r` `t` `b` `f` `/`. Note that `/` is
/// accepted here but never produced by [`escape_into`].
pub(crate) fn decode_escape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        '/' => Some('/'),
        _ => None,
    }
}

/// Append `text` to `out` with JSON escaping applied.
///
/// `"`, `\` and every character below U+0020 are escaped. Characters in
/// the named set use their short form; the remaining control characters
/// fall back to `\uXXXX` with four uppercase hex digits.
pub(crate) fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        if c >= ' ' && c != '"' && c != '\\' {
            out.push(c);
            continue;
        }
        out.push('\\');
        match c {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '\n' => out.push('n'),
            '\r' => out.push('r'),
            '\t' => out.push('t'),
            '\u{8}' => out.push('b'),
            '\u{c}' => out.push('f'),
            other => out.push_str(&format!("u{:04X}", other as u32)),
        }
    }
}
