//! Form-body and cookie field extraction.

use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body into key/value pairs.
///
/// Pairs are split on `&`, then on the first `=`; both halves are
/// percent-decoded. Segments without `=` are skipped, and later keys
/// overwrite earlier ones.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (percent_decode(key), percent_decode(value)))
        .collect()
}

/// Percent-decode a form component, turning `+` into a space.
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced with
/// the Unicode replacement character.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                if let (Some(h), Some(l)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    decoded.push((h << 4) | l);
                    i += 3;
                    continue;
                }
                decoded.push(b'%');
            }
            b'+' => decoded.push(b' '),
            b => decoded.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Pull the `sessionId` attribute out of a `Cookie` header value.
///
/// This is a linear scan for `sessionId=`: the id runs to the next `;` or the
/// end of the header and is trimmed. No other cookie attribute is consulted.
pub fn session_id_from_cookie(cookie: &str) -> Option<String> {
    let (_, rest) = cookie.split_once("sessionId=")?;
    let id = rest.split(';').next().unwrap_or_default();
    Some(id.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_pairs() {
        let form = parse_form("username=alice&email=alice%40example.com");
        assert_eq!(form.get("username").unwrap(), "alice");
        assert_eq!(form.get("email").unwrap(), "alice@example.com");
    }

    #[test]
    fn test_parse_form_skips_bare_segments() {
        let form = parse_form("flag&name=x&&");
        assert_eq!(form.len(), 1);
        assert_eq!(form.get("name").unwrap(), "x");
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
    }

    #[test]
    fn test_session_id_from_cookie() {
        assert_eq!(session_id_from_cookie("sessionId=abc").as_deref(), Some("abc"));
        assert_eq!(session_id_from_cookie("theme=dark; sessionId= abc-123 ; lang=en").as_deref(), Some("abc-123"));
        assert_eq!(session_id_from_cookie("theme=dark"), None);
        assert_eq!(session_id_from_cookie(""), None);
    }
}
