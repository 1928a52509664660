use crate::delimiter::delimiter_line;
use crate::error::{BlobpackError, Result};
use crate::filter::ExtensionFilter;
use crate::ignore::IgnoreMatcher;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Why a file survived traversal and filtering but was left out of the blob.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Contents are not valid UTF-8; treated as binary
    NotUtf8,
    /// The file could not be read
    Unreadable(String),
}

/// One file excluded from the blob, reported in the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    /// Path relative to the input root, POSIX separators
    pub path: String,
    pub reason: SkipReason,
}

/// Outcome of one concat run.
#[derive(Debug, Default)]
pub struct ConcatSummary {
    /// Number of file records written to the blob
    pub written: usize,
    /// Files excluded for per-file reasons (binary content, read failure)
    pub skipped: Vec<SkippedFile>,
    /// Warnings from loading the ignore pattern set
    pub pattern_warnings: Vec<String>,
}

/// Walks `input_root`, applies the ignore and extension filters, and writes
/// every surviving UTF-8 text file into a single blob at `output_path`, each
/// record preceded by a marker line encoding its relative path.
///
/// The blob is assembled in memory and written in one operation, so a failed
/// run never leaves a truncated output file behind. Parent directories of
/// `output_path` are created as needed. Matching nothing is not an error: the
/// output is written empty and the summary reports zero records.
///
/// # Errors
///
/// - `BlobpackError::InvalidInput` if `input_root` does not exist or is not a
///   directory.
/// - `BlobpackError::OutputWrite` if the output file cannot be created or
///   written.
/// - `BlobpackError::WalkDir` if traversal fails below the root.
pub fn concat(
    input_root: &Path,
    output_path: &Path,
    extensions: Option<&[String]>,
) -> Result<ConcatSummary> {
    let root = input_root
        .canonicalize()
        .map_err(|e| BlobpackError::InvalidInput {
            path: input_root.to_path_buf(),
            reason: e.to_string(),
        })?;
    if !root.is_dir() {
        return Err(BlobpackError::InvalidInput {
            path: input_root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let matcher = IgnoreMatcher::for_root(&root);
    let filter = ExtensionFilter::new(extensions);

    // Absolute location the blob will land at, so a stale blob from a prior
    // run sitting inside the tree is never swallowed into the new one.
    let output_abs = resolve_output_location(output_path);

    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                return false;
            }
            let rel = relative_posix(entry.path(), &root);
            !matcher.is_ignored(&rel, entry.file_type().is_dir())
        });

    let mut blob = String::new();
    let mut summary = ConcatSummary {
        pattern_warnings: matcher.warnings().to_vec(),
        ..ConcatSummary::default()
    };

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if output_abs.as_deref() == Some(entry.path()) {
            continue;
        }
        if !filter.is_allowed(entry.path()) {
            continue;
        }

        let rel = relative_posix(entry.path(), &root);
        match fs::read(entry.path()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => {
                    blob.push_str(&delimiter_line(&rel));
                    blob.push('\n');
                    blob.push_str(&content);
                    if !content.ends_with('\n') {
                        blob.push('\n');
                    }
                    blob.push('\n');
                    summary.written += 1;
                }
                Err(_) => summary.skipped.push(SkippedFile {
                    path: rel,
                    reason: SkipReason::NotUtf8,
                }),
            },
            Err(e) => summary.skipped.push(SkippedFile {
                path: rel,
                reason: SkipReason::Unreadable(e.to_string()),
            }),
        }
    }

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| BlobpackError::OutputWrite {
            path: output_path.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(output_path, &blob).map_err(|e| BlobpackError::OutputWrite {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(summary)
}

/// Relative path from `root` to `path` with POSIX separators, regardless of
/// host convention.
fn relative_posix(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Best-effort absolute form of the output path. The file usually does not
/// exist yet, so canonicalize its parent and re-append the file name. `None`
/// when the parent does not exist either (then it cannot be inside the tree).
fn resolve_output_location(output_path: &Path) -> Option<PathBuf> {
    if output_path.exists() {
        return output_path.canonicalize().ok();
    }
    let parent = output_path.parent()?;
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    Some(parent.canonicalize().ok()?.join(output_path.file_name()?))
}
