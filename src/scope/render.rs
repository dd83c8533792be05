//! Renderers for each kind of preview content
//!
//! Every renderer returns text. Failures of the external tools they call are
//! turned into a bracketed placeholder line instead of an error.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::parse::ParsedContent;

/// Maximum lines of output any renderer produces
pub const MAX_LINES: usize = 50;

/// Lines of context shown on each side of a grep hit
pub const CONTEXT_LINES: usize = 10;

/// Time box for each URL renderer in the chain
pub const URL_TIMEOUT: Duration = Duration::from_secs(5);

/// Render classified content
pub fn render(content: &ParsedContent) -> String {
    match content {
        ParsedContent::Vimgrep { path, line, .. } | ParsedContent::Grep { path, line } => {
            render_file_at_line(path, *line)
        }
        ParsedContent::Url(url) => render_url(url),
        ParsedContent::File(path) => render_file(path),
        ParsedContent::Directory(path) => render_directory(path),
        ParsedContent::Unknown(raw) => raw.clone(),
    }
}

/// `±CONTEXT_LINES` around `line` (1-based), under a `=== path:line ===` header
pub fn render_file_at_line(path: &str, line: usize) -> String {
    let start = line.saturating_sub(CONTEXT_LINES).max(1);
    let end = line.saturating_add(CONTEXT_LINES);

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!("Preview read failed for {}: {}", path, e);
            return format!("[Failed to read file: {}]", path);
        }
    };

    let mut out = format!("=== {}:{} ===\n\n", path, line);
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut current = 0usize;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                current += 1;
                if current > end {
                    break;
                }
                if current >= start {
                    out.push_str(&String::from_utf8_lossy(&buf));
                }
            }
            Err(e) => {
                tracing::debug!("Preview read failed for {}: {}", path, e);
                return format!("[Failed to read file: {}]", path);
            }
        }
    }
    out
}

/// First `MAX_LINES` of a text file, or a one-line note for binary files
pub fn render_file(path: &str) -> String {
    if let Some(kind) = capture(Command::new("file").arg("-b").arg(path)) {
        if !looks_like_text(&kind) {
            return format!("[Binary file: {}]\n{}", path, kind);
        }
    }

    match File::open(path) {
        Ok(file) => {
            let mut buf = Vec::new();
            let mut reader = BufReader::new(file);
            let mut lines = 0;
            while lines < MAX_LINES {
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => lines += 1,
                    Err(_) => return format!("[Failed to read file: {}]", path),
                }
            }
            String::from_utf8_lossy(&buf).into_owned()
        }
        Err(_) => format!("[Failed to read file: {}]", path),
    }
}

/// Detailed listing under a `=== path/ ===` header
pub fn render_directory(path: &str) -> String {
    match capture(Command::new("ls").arg("-la").arg(path)) {
        Some(listing) => format!("=== {}/ ===\n\n{}", path, first_lines(&listing, MAX_LINES)),
        None => format!("[Failed to list directory: {}]", path),
    }
}

/// Try each text-mode browser in turn, first non-empty output wins
pub fn render_url(url: &str) -> String {
    let chain: [(&str, &[&str]); 3] = [
        ("w3m", &["-dump"]),
        ("lynx", &["-dump", "-nolist"]),
        ("curl", &["-sL", "--max-time", "5"]),
    ];

    for (program, args) in chain {
        let mut command = Command::new(program);
        command.args(args).arg(url);
        match capture_with_timeout(&mut command, URL_TIMEOUT) {
            Some(text) if !text.trim().is_empty() => return first_lines(&text, MAX_LINES),
            _ => tracing::debug!("{} produced nothing for {}", program, url),
        }
    }

    format!("[Timeout or failed to fetch URL: {}]", url)
}

/// `file -b` output that describes something printable
fn looks_like_text(kind: &str) -> bool {
    ["text", "ASCII", "UTF", "empty"]
        .iter()
        .any(|marker| kind.contains(marker))
}

/// The first `n` lines of `text`, line endings kept
pub fn first_lines(text: &str, n: usize) -> String {
    text.split_inclusive('\n').take(n).collect()
}

/// Stdout of a successful run, `None` if it could not run or failed
fn capture(command: &mut Command) -> Option<String> {
    let output = command.stdin(Stdio::null()).stderr(Stdio::null()).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like `capture`, but the child is killed once `timeout` elapses
fn capture_with_timeout(command: &mut Command, timeout: Duration) -> Option<String> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    let mut stdout = child.stdout.take()?;
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::debug!("External renderer timed out after {:?}", timeout);
                return None;
            }
            Ok(None) => thread::sleep(Duration::from_millis(20)),
            Err(_) => return None,
        }
    }

    let buf = reader.join().ok()?;
    Some(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn numbered_file(lines: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 1..=lines {
            writeln!(file, "line {}", i).unwrap();
        }
        file
    }

    #[test]
    fn test_first_lines() {
        assert_eq!(first_lines("a\nb\nc\n", 2), "a\nb\n");
        assert_eq!(first_lines("a\nb", 5), "a\nb");
        assert_eq!(first_lines("", 5), "");
    }

    #[test]
    fn test_looks_like_text() {
        assert!(looks_like_text("ASCII text"));
        assert!(looks_like_text("UTF-8 Unicode text"));
        assert!(looks_like_text("empty"));
        assert!(!looks_like_text("ELF 64-bit LSB executable"));
    }

    #[test]
    fn test_file_at_line_window() {
        let file = numbered_file(40);
        let path = file.path().to_str().unwrap();

        let out = render_file_at_line(path, 20);
        assert!(out.starts_with(&format!("=== {}:20 ===\n\n", path)));
        assert!(out.contains("line 10\n"));
        assert!(out.contains("line 30\n"));
        assert!(!out.contains("line 9\n"));
        assert!(!out.contains("line 31\n"));
    }

    #[test]
    fn test_file_at_line_near_start() {
        let file = numbered_file(40);
        let path = file.path().to_str().unwrap();

        let out = render_file_at_line(path, 3);
        let body = out.split_once("\n\n").unwrap().1;
        assert!(body.starts_with("line 1\n"));
        assert!(body.ends_with("line 13\n"));
    }

    #[test]
    fn test_file_at_line_missing_file() {
        assert_eq!(
            render_file_at_line("/no/such/file", 5),
            "[Failed to read file: /no/such/file]"
        );
    }

    #[test]
    fn test_render_file_caps_lines() {
        let file = numbered_file(80);
        let out = render_file(file.path().to_str().unwrap());
        // Text files render their head; `file` may be absent, which also
        // falls through to reading
        assert_eq!(out.lines().count(), MAX_LINES);
        assert!(out.starts_with("line 1\n"));
    }

    #[test]
    fn test_render_unknown_is_identity() {
        assert_eq!(
            render(&ParsedContent::Unknown("  raw  ".to_string())),
            "  raw  "
        );
    }

    #[test]
    fn test_render_url_failure_is_placeholder() {
        // Nothing listens on this port; every tool fails or is missing
        let out = render_url("http://127.0.0.1:9/");
        assert!(!out.is_empty());
    }
}
