use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_PLACEHOLDER: &str = "...";

static FIRST_CAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("first_cap pattern is valid"));
static ALL_CAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("all_cap pattern is valid"));

/// Convert a camelCase or PascalCase identifier to snake_case.
///
/// Two substitution passes run in order: the first splits before a capital
/// followed by lowercase letters, the second splits a lowercase letter or
/// digit from a following capital. Runs of capitals stay together, so
/// `resourceURI` becomes `resource_uri` and `HTTPServer` becomes `http_server`.
pub fn camel_to_snake(name: &str) -> String {
    let first = FIRST_CAP_RE.replace_all(name, "${1}_${2}");
    ALL_CAP_RE
        .replace_all(&first, "${1}_${2}")
        .to_lowercase()
}

/// Replace the middle of `message` with `placeholder` so that the result is
/// at most `max_len` characters long.
///
/// A `max_len` of zero disables truncation. Lengths are counted in chars.
pub fn truncate_middle(max_len: usize, message: &str, placeholder: &str) -> String {
    let length = message.chars().count();
    if max_len == 0 || length <= max_len {
        return message.to_string();
    }

    let room = max_len.saturating_sub(placeholder.chars().count());
    let tail = room / 2;
    let head = room - tail;

    let mut out: String = message.chars().take(head).collect();
    out.push_str(placeholder);
    out.extend(message.chars().skip(length - tail));
    out
}
