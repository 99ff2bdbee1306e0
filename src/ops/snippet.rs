/// Trims a snippet and cuts it at the first line break.
pub fn first_line_of(snippet: &str) -> &str {
    let trimmed = snippet.trim();
    match trimmed.find('\n') {
        Some(end) => &trimmed[..end],
        None => trimmed,
    }
}
