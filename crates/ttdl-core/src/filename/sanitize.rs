//! Filesystem-safe filenames for saved downloads.

/// Makes a suggested filename safe to create inside the download directory.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims surrounding whitespace and leading dots (no hidden files, no `..`)
/// - Limits length to 255 bytes (Linux NAME_MAX)
///
/// Inner spaces are kept so the saved name matches what the server suggested.
/// Returns an empty string when nothing usable remains.
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced
        .trim()
        .trim_start_matches('.')
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_start();

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
