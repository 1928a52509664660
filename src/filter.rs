use std::path::Path;

/// Suffixes admitted when no `--extensions` override is given.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".css", ".scss", ".html",
];

/// Allow-list of lowercase file suffixes (each including its leading dot).
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    allowed: Vec<String>,
}

impl ExtensionFilter {
    /// Builds a filter from a configured suffix list, normalizing each entry
    /// to lowercase with a leading dot. `None` or an empty list selects
    /// [`DEFAULT_EXTENSIONS`].
    pub fn new(extensions: Option<&[String]>) -> Self {
        let allowed = match extensions {
            Some(exts) if !exts.is_empty() => exts
                .iter()
                .map(|ext| {
                    let lower = ext.trim().to_lowercase();
                    if lower.starts_with('.') {
                        lower
                    } else {
                        format!(".{lower}")
                    }
                })
                .collect(),
            _ => DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        };

        Self { allowed }
    }

    /// Returns whether the file's lowercased suffix is in the allow-list.
    /// Files without a suffix are rejected.
    pub fn is_allowed(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => {
                let dotted = format!(".{}", ext.to_lowercase());
                self.allowed.iter().any(|allowed| *allowed == dotted)
            }
            None => false,
        }
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(None)
    }
}
