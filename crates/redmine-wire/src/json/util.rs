//! JSON string helpers shared by the reader and writer.

/// Finds the closing `"` of a JSON string whose body starts at `x`.
///
/// Handles backslash escaping: `\"` inside the string does not terminate it.
/// Returns `None` when the input ends first.
pub(crate) fn find_ending_quote(data: &[u8], mut x: usize) -> Option<usize> {
    let len = data.len();
    let mut prev: u8 = 0;
    while x < len {
        let ch = data[x];
        if ch == b'"' && prev != b'\\' {
            return Some(x);
        }
        // double-backslash cancels the escape
        if ch == b'\\' && prev == b'\\' {
            prev = 0;
        } else {
            prev = ch;
        }
        x += 1;
    }
    None
}

/// Decodes a JSON string body (between the quotes), resolving escapes.
///
/// Returns `None` for invalid UTF-8 or a malformed escape sequence.
pub(crate) fn decode_json_string(bytes: &[u8]) -> Option<String> {
    if !bytes.contains(&b'\\') {
        return std::str::from_utf8(bytes).ok().map(str::to_owned);
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).ok()
}

/// Appends `s` to `out` as a quoted JSON string.
pub(crate) fn write_json_string(out: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let plain = bytes
        .iter()
        .all(|&b| (32..=126).contains(&b) && b != b'"' && b != b'\\');
    if plain {
        out.reserve(bytes.len() + 2);
        out.push(b'"');
        out.extend_from_slice(bytes);
        out.push(b'"');
        return;
    }
    match serde_json::to_string(s) {
        Ok(quoted) => out.extend_from_slice(quoted.as_bytes()),
        Err(_) => out.extend_from_slice(b"\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ending_quote_skips_escaped_quotes() {
        let data = br#"a\"b" tail"#;
        assert_eq!(find_ending_quote(data, 0), Some(4));
        assert_eq!(find_ending_quote(br#"a\\"#, 0), None);
        assert_eq!(find_ending_quote(br#"a\\" x"#, 0), Some(3));
    }

    #[test]
    fn escapes_round_trip() {
        assert_eq!(decode_json_string(br"a\nb").as_deref(), Some("a\nb"));
        assert_eq!(decode_json_string("caf\u{e9}".as_bytes()).as_deref(), Some("café"));
        let mut out = Vec::new();
        write_json_string(&mut out, "say \"hi\"\n");
        assert_eq!(out, br#""say \"hi\"\n""#);
    }
}
