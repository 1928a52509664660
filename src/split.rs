use crate::delimiter::find_delimiters;
use crate::error::{BlobpackError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// One record rejected by the path safety check, reported in the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// The relative path as encoded in the blob
    pub path: String,
    pub reason: String,
}

/// Outcome of one split run.
#[derive(Debug, Default)]
pub struct SplitSummary {
    /// Number of files written under the output root
    pub written: usize,
    /// Records whose encoded path was rejected
    pub skipped: Vec<SkippedRecord>,
}

/// Splits a previously concatenated blob back into individual files under
/// `output_root`, one per marker line. Existing files are overwritten (last
/// write wins). A blob with no marker lines yields zero files, not an error.
///
/// Records whose encoded path is absolute or escapes the output root via `..`
/// are skipped and reported in the summary; the run still completes.
///
/// # Errors
///
/// - `BlobpackError::InvalidInput` if the blob is missing or unreadable.
/// - `BlobpackError::OutputWrite` if a target file or its parent directories
///   cannot be created.
/// - `BlobpackError::Regex` if the marker pattern fails to compile.
pub fn split(input_path: &Path, output_root: &Path) -> Result<SplitSummary> {
    let text = fs::read_to_string(input_path).map_err(|e| BlobpackError::InvalidInput {
        path: input_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let delimiters = find_delimiters(&text)?;
    let mut summary = SplitSummary::default();

    for (i, delim) in delimiters.iter().enumerate() {
        // Content runs from the line after the marker up to the next marker
        // or end of input; the blank separator the concatenator appended is
        // trimmed back off.
        let content_start = if delim.end < text.len() {
            delim.end + 1
        } else {
            text.len()
        };
        let content_end = delimiters.get(i + 1).map_or(text.len(), |next| next.start);
        let content = text[content_start..content_end].trim_end_matches(['\n', '\r']);

        let Some(rel) = safe_relative_path(&delim.path) else {
            summary.skipped.push(SkippedRecord {
                path: delim.path.clone(),
                reason: "path escapes the output root".to_string(),
            });
            continue;
        };

        let target = output_root.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| BlobpackError::OutputWrite {
                path: target.clone(),
                source: e,
            })?;
        }
        fs::write(&target, content).map_err(|e| BlobpackError::OutputWrite {
            path: target.clone(),
            source: e,
        })?;
        summary.written += 1;
    }

    Ok(summary)
}

/// Validates an encoded record path: must be relative and stay inside the
/// output root. Absolute paths and any `..` component are rejected; `.`
/// components are dropped. Returns the sanitized path, or `None` when the
/// record must be skipped.
fn safe_relative_path(encoded: &str) -> Option<PathBuf> {
    if encoded.trim().is_empty() {
        return None;
    }

    let mut clean = PathBuf::new();
    for component in Path::new(encoded).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concat::concat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_basic() {
        let temp_dir = TempDir::new().unwrap();
        let blob_path = temp_dir.path().join("blob.txt");
        fs::write(&blob_path, "=== a.py ===\nx=1\n\n=== sub/b.py ===\ny=2\n").unwrap();

        let out = temp_dir.path().join("out");
        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 2);
        assert!(summary.skipped.is_empty());

        assert_eq!(fs::read_to_string(out.join("a.py")).unwrap(), "x=1");
        assert_eq!(fs::read_to_string(out.join("sub/b.py")).unwrap(), "y=2");
    }

    #[test]
    fn test_split_no_delimiters() {
        let temp_dir = TempDir::new().unwrap();
        let blob_path = temp_dir.path().join("blob.txt");
        fs::write(&blob_path, "plain text\nwith no markers\n").unwrap();

        let out = temp_dir.path().join("out");
        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 0);
    }

    #[test]
    fn test_split_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = split(
            &temp_dir.path().join("nope.txt"),
            &temp_dir.path().join("out"),
        );
        assert!(matches!(result, Err(BlobpackError::InvalidInput { .. })));
    }

    #[test]
    fn test_split_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let blob_path = temp_dir.path().join("blob.txt");
        fs::write(
            &blob_path,
            "=== ../../etc/passwd ===\nroot:x\n\n=== ok.py ===\nfine\n",
        )
        .unwrap();

        let out = temp_dir.path().join("out");
        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].path, "../../etc/passwd");

        assert_eq!(fs::read_to_string(out.join("ok.py")).unwrap(), "fine");
        assert!(!out.join("etc/passwd").exists());
    }

    #[test]
    fn test_split_rejects_absolute_path() {
        let temp_dir = TempDir::new().unwrap();
        let blob_path = temp_dir.path().join("blob.txt");
        fs::write(&blob_path, "=== /etc/evil.py ===\nnope\n").unwrap();

        let out = temp_dir.path().join("out");
        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 0);
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn test_split_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let blob_path = temp_dir.path().join("blob.txt");
        fs::write(&blob_path, "=== a.py ===\nnew\n").unwrap();

        let out = temp_dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("a.py"), "old").unwrap();

        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(fs::read_to_string(out.join("a.py")).unwrap(), "new");
    }

    #[test]
    fn test_split_record_with_blank_lines_inside() {
        let temp_dir = TempDir::new().unwrap();
        let blob_path = temp_dir.path().join("blob.txt");
        fs::write(
            &blob_path,
            "=== a.py ===\ndef f():\n\n    return 1\n\n=== b.py ===\nz\n",
        )
        .unwrap();

        let out = temp_dir.path().join("out");
        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 2);
        assert_eq!(
            fs::read_to_string(out.join("a.py")).unwrap(),
            "def f():\n\n    return 1"
        );
    }

    #[test]
    fn test_safe_relative_path() {
        assert_eq!(
            safe_relative_path("a/b.py"),
            Some(PathBuf::from("a/b.py"))
        );
        assert_eq!(
            safe_relative_path("./a/b.py"),
            Some(PathBuf::from("a/b.py"))
        );
        assert_eq!(safe_relative_path("../escape.py"), None);
        assert_eq!(safe_relative_path("a/../../escape.py"), None);
        assert_eq!(safe_relative_path("/abs.py"), None);
        assert_eq!(safe_relative_path(""), None);
        assert_eq!(safe_relative_path("."), None);
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("proj");
        fs::create_dir_all(root.join("sub/deep")).unwrap();
        fs::write(root.join("a.py"), "x=1").unwrap();
        fs::write(root.join("sub/b.py"), "y=2").unwrap();
        fs::write(root.join("sub/deep/c.ts"), "const z = 3;").unwrap();

        let blob_path = temp_dir.path().join("blob.txt");
        let concatenated = concat(&root, &blob_path, None).unwrap();
        assert_eq!(concatenated.written, 3);

        let out = temp_dir.path().join("restored");
        let summary = split(&blob_path, &out).unwrap();
        assert_eq!(summary.written, 3);

        assert_eq!(fs::read_to_string(out.join("a.py")).unwrap(), "x=1");
        assert_eq!(fs::read_to_string(out.join("sub/b.py")).unwrap(), "y=2");
        assert_eq!(
            fs::read_to_string(out.join("sub/deep/c.ts")).unwrap(),
            "const z = 3;"
        );
    }

    #[test]
    fn test_round_trip_normalizes_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("proj");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.py"), "x=1\n").unwrap();

        let blob_path = temp_dir.path().join("blob.txt");
        concat(&root, &blob_path, None).unwrap();

        let out = temp_dir.path().join("restored");
        split(&blob_path, &out).unwrap();

        // The blank-line separator absorbs the trailing newline; everything
        // before it is byte-identical.
        assert_eq!(fs::read_to_string(out.join("a.py")).unwrap(), "x=1");
    }
}
