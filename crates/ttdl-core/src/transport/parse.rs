//! Parse raw header lines collected by libcurl.

/// Turns header lines into name/value pairs for the final response.
///
/// libcurl reports every response it sees (redirects, `100 Continue`), so a
/// new status line discards what was collected so far.
pub(crate) fn parse_headers(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    headers
}
