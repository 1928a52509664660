//! The record marker shared by both directions: one line per file embedding
//! its original relative path. The format is stable across versions; round
//! tripping a blob depends on it.

use crate::error::Result;
use regex::Regex;

/// Renders the marker line for one relative path (no trailing newline).
pub fn delimiter_line(relative_path: &str) -> String {
    format!("=== {relative_path} ===")
}

/// One marker found in a blob, with its byte span in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct DelimiterMatch {
    /// The relative path the marker encodes
    pub path: String,
    /// Starting byte offset of the marker line
    pub start: usize,
    /// Ending byte offset (exclusive, before the line terminator)
    pub end: usize,
}

/// Finds all marker lines in `text`, in order of appearance.
///
/// A marker must occupy a whole line. The path capture is greedy, so a path
/// that itself contains `===` still parses up to the final closing marker.
///
/// # Errors
///
/// Returns `BlobpackError::Regex` if the marker pattern fails to compile.
pub fn find_delimiters(text: &str) -> Result<Vec<DelimiterMatch>> {
    let pattern = Regex::new(r"(?m)^=== (.+) ===\r?$")?;
    let mut delimiters = Vec::new();

    for capture in pattern.captures_iter(text) {
        if let Some(full_match) = capture.get(0)
            && let Some(path_match) = capture.get(1)
        {
            delimiters.push(DelimiterMatch {
                path: path_match.as_str().to_string(),
                start: full_match.start(),
                end: full_match.end(),
            });
        }
    }

    Ok(delimiters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_line_format() {
        assert_eq!(delimiter_line("a.py"), "=== a.py ===");
        assert_eq!(delimiter_line("sub/b.py"), "=== sub/b.py ===");
    }

    #[test]
    fn test_find_delimiters_basic() {
        let text = "=== a.py ===\nx=1\n\n=== sub/b.py ===\ny=2\n";
        let found = find_delimiters(text).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path, "a.py");
        assert_eq!(found[0].start, 0);
        assert_eq!(found[1].path, "sub/b.py");
    }

    #[test]
    fn test_find_delimiters_none() {
        let found = find_delimiters("just some text\nno markers here\n").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_marker_must_fill_the_line() {
        let text = "prefix === a.py ===\n=== b.py === suffix\n";
        let found = find_delimiters(text).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_path_containing_marker_text() {
        let text = "=== odd === name.py ===\n";
        let found = find_delimiters(text).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "odd === name.py");
    }

    #[test]
    fn test_roundtrip_with_delimiter_line() {
        let line = delimiter_line("dir/file.ts");
        let found = find_delimiters(&line).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "dir/file.ts");
        assert_eq!(found[0].end, line.len());
    }
}
