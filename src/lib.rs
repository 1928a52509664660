//! # blobpack
//!
//! A library and CLI tool for packing a project's source files into a single
//! annotated text blob (for pasting into an LLM context window) and unpacking
//! such a blob back into individual files at their original relative paths.
//!
//! ## Features
//!
//! - Respects the project's `.gitignore` (with a sensible built-in fallback)
//! - Filters by file suffix, with web/Python defaults
//! - Skips binary (non-UTF-8) files instead of failing
//! - Security: rejects blob records whose paths escape the output root
//! - Deterministic traversal order for reproducible blobs
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use std::path::Path;
//!
//! let summary = blobpack::concat(Path::new("."), Path::new("blob.txt"), None)?;
//! println!("{} files packed", summary.written);
//!
//! let summary = blobpack::split(Path::new("blob.txt"), Path::new("restored"))?;
//! println!("{} files restored", summary.written);
//! # Ok::<(), blobpack::BlobpackError>(())
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Pack a project into one blob
//! blobpack --mode concat --input ./proj --output blob.txt
//!
//! # Restrict to specific suffixes
//! blobpack --mode concat --input ./proj --output blob.txt --extensions .rs .toml
//!
//! # Unpack an (edited) blob back into files
//! blobpack --mode split --input blob.txt --output ./restored
//! ```

pub mod concat;
pub mod delimiter;
pub mod error;
pub mod filter;
pub mod ignore;
pub mod split;

// Re-export main types and functions for convenience
pub use concat::{ConcatSummary, SkipReason, SkippedFile, concat};
pub use error::{BlobpackError, Result};
pub use filter::{DEFAULT_EXTENSIONS, ExtensionFilter};
pub use ignore::{DEFAULT_PATTERNS, IgnoreMatcher};
pub use split::{SkippedRecord, SplitSummary, split};
