//! Content classification for preview input

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static VIMGREP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?):(\d+):(\d+):.*$").expect("valid vimgrep regex"));
static GREP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?):(\d+):.*$").expect("valid grep regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid url regex"));

/// What a piece of preview text refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedContent {
    /// `path:line:col:text` where `path` is an existing file
    Vimgrep {
        path: String,
        line: usize,
        column: usize,
    },
    /// `path:line:text` where `path` is an existing file
    Grep { path: String, line: usize },
    /// First http(s) URL found in the text
    Url(String),
    File(String),
    Directory(String),
    /// Anything else, carrying the original untrimmed text
    Unknown(String),
}

/// Classify `text`, first match wins:
/// vimgrep, grep, URL, file, directory, unknown.
pub fn parse(text: &str) -> ParsedContent {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedContent::Unknown(text.to_string());
    }

    if let Some(caps) = VIMGREP_RE.captures(trimmed) {
        let path = &caps[1];
        if let (true, Ok(line), Ok(column)) =
            (is_file(path), caps[2].parse::<usize>(), caps[3].parse::<usize>())
        {
            return ParsedContent::Vimgrep {
                path: path.to_string(),
                line,
                column,
            };
        }
    }

    if let Some(caps) = GREP_RE.captures(trimmed) {
        let path = &caps[1];
        if let (true, Ok(line)) = (is_file(path), caps[2].parse::<usize>()) {
            return ParsedContent::Grep {
                path: path.to_string(),
                line,
            };
        }
    }

    if let Some(url) = extract_first_url(trimmed) {
        return ParsedContent::Url(url.to_string());
    }

    if is_file(trimmed) {
        return ParsedContent::File(trimmed.to_string());
    }
    if Path::new(trimmed).is_dir() {
        return ParsedContent::Directory(trimmed.to_string());
    }

    ParsedContent::Unknown(text.to_string())
}

/// First `http://` or `https://` URL in `text`
pub fn extract_first_url(text: &str) -> Option<&str> {
    URL_RE.find(text).map(|m| m.as_str())
}

fn is_file(path: &str) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
