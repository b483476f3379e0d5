use std::sync::LazyLock;

use regex::Regex;

/// Letters, numbers and `_`. Combining marks are not word characters here.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_]").expect("invalid regex"));

/// Makes a display name usable as the `name` field of a chat completion message,
/// which only allows word characters.
pub fn normalize_username(name: &str) -> String {
    NON_WORD.replace_all(&name.replace(' ', "_"), "").into_owned()
}

/// Fixed-width split on character boundaries. Every chunk but the last holds
/// exactly `limit` characters.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let chars: Vec<char> = text.chars().collect();

    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
