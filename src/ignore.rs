use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::Path;

/// Patterns used when the project has no `.gitignore` of its own.
pub const DEFAULT_PATTERNS: &[&str] = &[
    ".git/",
    "__pycache__/",
    "node_modules/",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".Python",
    ".env",
    ".venv/",
    "env/",
    "venv/",
    ".idea/",
    ".vscode/",
];

/// One parsed ignore rule: a plain data value plus its compiled globs.
///
/// `matcher` covers the rule itself; `subtree` covers everything beneath a
/// matched directory, so `is_ignored` stays correct for paths inside an
/// ignored tree even without traversal pruning.
#[derive(Debug, Clone)]
struct IgnoreRule {
    negated: bool,
    dir_only: bool,
    matcher: GlobMatcher,
    subtree: GlobMatcher,
}

/// Ordered `.gitignore`-style pattern set for one project root.
///
/// Matching is a fold over the rule list keeping the last applicable verdict,
/// so a later `!pattern` re-includes a path excluded by an earlier rule.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
    warnings: Vec<String>,
}

impl IgnoreMatcher {
    /// Builds a matcher for `root`, reading `<root>/.gitignore` if present and
    /// falling back to [`DEFAULT_PATTERNS`] when it is missing, unreadable, or
    /// contains no rules. Never fails: unreadable files and unparseable lines
    /// become warnings.
    pub fn for_root(root: &Path) -> Self {
        let gitignore = root.join(".gitignore");
        let mut read_warning = None;

        let lines: Vec<String> = match fs::read_to_string(&gitignore) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(ToString::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                read_warning = Some(format!(
                    "Could not read {}: {e}; using default ignore patterns",
                    gitignore.display()
                ));
                Vec::new()
            }
        };

        let mut matcher = if lines.is_empty() {
            Self::from_patterns(DEFAULT_PATTERNS.iter().copied())
        } else {
            Self::from_patterns(lines.iter().map(String::as_str))
        };

        if let Some(w) = read_warning {
            matcher.warnings.insert(0, w);
        }
        matcher
    }

    /// Builds a matcher from an explicit ordered pattern list. Comment and
    /// empty lines are dropped; lines that fail to compile are skipped and
    /// reported through [`IgnoreMatcher::warnings`].
    pub fn from_patterns<'a, I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = Vec::new();
        let mut warnings = Vec::new();

        for line in patterns {
            match parse_rule(line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {}
                Err(message) => warnings.push(message),
            }
        }

        Self { rules, warnings }
    }

    /// Returns whether `relative_path` (POSIX separators, relative to the
    /// matcher's root) is excluded. `is_dir` distinguishes directory-only
    /// rules, which never match a plain file directly but do match files
    /// beneath a matched directory.
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        let mut ignored = false;

        for rule in &self.rules {
            let direct = rule.matcher.is_match(relative_path);
            let nested = rule.subtree.is_match(relative_path);
            let applies = if rule.dir_only {
                nested || (is_dir && direct)
            } else {
                direct || nested
            };
            if applies {
                ignored = !rule.negated;
            }
        }

        ignored
    }

    /// Warnings accumulated while loading patterns (unreadable file,
    /// unparseable lines). Empty on a clean load.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Parses one `.gitignore` line into a rule. `Ok(None)` for blank and comment
/// lines; `Err` carries a human-readable warning for unparseable patterns.
fn parse_rule(line: &str) -> std::result::Result<Option<IgnoreRule>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (negated, rest) = match trimmed.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (dir_only, rest) = match rest.strip_suffix('/') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };

    // A leading slash anchors to the root; so does any slash elsewhere in the
    // pattern. Slash-free patterns match at any depth.
    let (anchored, pattern) = match rest.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (rest.contains('/'), rest),
    };

    if pattern.is_empty() {
        return Err(format!("Skipping empty ignore pattern: '{trimmed}'"));
    }

    let glob_str = if anchored {
        pattern.to_string()
    } else {
        format!("**/{pattern}")
    };

    let compile = |glob: &str| {
        GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|e| format!("Skipping unparseable ignore pattern '{trimmed}': {e}"))
    };

    let matcher = compile(&glob_str)?;
    let subtree = compile(&format!("{glob_str}/**"))?;

    Ok(Some(IgnoreRule {
        negated,
        dir_only,
        matcher,
        subtree,
    }))
}
