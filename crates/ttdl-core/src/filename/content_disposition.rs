//! Content-Disposition header parsing (filename and filename*).

/// Extracts the suggested filename from a raw Content-Disposition value.
///
/// Accepts `filename="value"`, `filename=value` and
/// `filename*=UTF-8''percent-encoded`. Quote characters are stripped and
/// surrounding whitespace trimmed. If both forms exist, `filename*` wins
/// (RFC 6266), not whichever parameter appears first in the header.
/// Returns `None` when no parameter yields a non-empty name.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in header_value.split(';') {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim();

        if name.eq_ignore_ascii_case("filename*") {
            let decoded = percent_decode(extended_value(value.trim()));
            let cleaned = strip_quotes(&decoded);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        } else if name.eq_ignore_ascii_case("filename") && plain.is_none() {
            let cleaned = strip_quotes(value);
            if !cleaned.is_empty() {
                plain = Some(cleaned);
            }
        }
    }

    plain
}

/// Drops the `charset'language'` prefix of an RFC 5987 value, if any.
fn extended_value(v: &str) -> &str {
    let mut parts = v.splitn(3, '\'');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_charset), Some(_lang), Some(rest)) => rest,
        _ => v,
    }
}

fn strip_quotes(v: &str) -> String {
    v.chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Percent-decode for filename* values; invalid escapes are kept verbatim.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
