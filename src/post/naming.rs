//! Turning user text into tags and file names.

use regex::Regex;
use std::sync::LazyLock;

// --- Compiled regexes (one-time via LazyLock) ---

/// ASCII comma, full-width comma, or whitespace.
static TAG_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,，\s]+").unwrap());

/// Characters that are not allowed in file names on at least one platform.
static FORBIDDEN_IN_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\<>?:*|"]"#).unwrap());

/// Split a tag list, dropping empty pieces.
///
/// ```
/// use bmt::post::parse_tags;
///
/// assert_eq!(parse_tags("rust, cli，notes  web"), ["rust", "cli", "notes", "web"]);
/// assert!(parse_tags(" , ").is_empty());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    TAG_SEPARATOR
        .split(input)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove characters that cannot appear in a file name.
pub fn sanitize_file_stem(title: &str) -> String {
    FORBIDDEN_IN_FILENAME.replace_all(title, "").trim().to_string()
}
