//! Extension-based exclusion rules
//!
//! The ignore file holds one glob-like extension pattern per line and is
//! seeded with a default set on first run so it stays reproducible and
//! user-editable.

use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Default exclusion patterns seeded on first run
pub const DEFAULT_PATTERNS: &[&str] = &[
    "*.sys", "*.html", "*.cnt", "*.scr", "*.hlp", "*.txt", "*.asp", "*.aspx",
];

/// Set of glob-like extension patterns loaded from the ignore file
#[derive(Debug, Clone)]
pub struct IgnoreList {
    // joined, lowercased pattern text; matching is a substring search
    patterns: String,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::from_patterns(DEFAULT_PATTERNS.iter().copied())
    }
}

impl IgnoreList {
    /// Build a list from individual patterns
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(";");

        Self { patterns: joined }
    }

    /// Load the ignore file, seeding the default set when it is absent.
    ///
    /// Never fails: an unreadable file degrades to the defaults with a
    /// warning, and a failed seed write leaves the in-memory defaults
    /// active for this run.
    pub async fn load(path: &Path) -> Self {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let list = Self::from_patterns(content.lines());
                debug!("loaded ignore patterns from {}", path.display());
                list
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("seeding default ignore file at {}", path.display());
                if let Err(e) = fs::write(path, Self::default_file_content()).await {
                    warn!("could not seed ignore file {}: {e}", path.display());
                }
                Self::default()
            }
            Err(e) => {
                warn!(
                    "could not read ignore file {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Whether a filename is excluded from synchronization.
    ///
    /// The extension runs from the last `.` to the end of the filename; a
    /// filename without any `.` is always excluded. The check is a
    /// case-insensitive substring search of `*<ext>` within the joined
    /// pattern text, so `*.cntx` also matches a `.cnt` extension. Kept
    /// for compatibility with existing ignore files.
    pub fn should_ignore(&self, filename: &str) -> bool {
        let Some(pos) = filename.rfind('.') else {
            return true;
        };

        let needle = format!("*{}", filename[pos..].to_ascii_lowercase());
        self.patterns.contains(&needle)
    }

    /// Joined pattern text, mainly for diagnostics
    pub fn as_str(&self) -> &str {
        &self.patterns
    }

    /// Default ignore-file body seeded on first run: one pattern per line.
    fn default_file_content() -> String {
        let mut content = DEFAULT_PATTERNS.join("\n");
        content.push('\n');
        content
    }
}
