//! Persistent sync-status records
//!
//! The status file is a flat text file with one `filename;signature` record
//! per line, rewritten wholesale at the end of every run that downloaded
//! anything.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use webmirror_types::{Error, Result, SyncStatus};

/// Delimiter between filename and signature in a status record
const DELIMITER: char = ';';

/// Store for the filename → last-synced-signature map
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    /// Create a store over the given status file path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted status map.
    ///
    /// A missing file yields an empty map. A record without the delimiter
    /// is a data-integrity fault: it is skipped with a warning rather than
    /// aborting the run.
    pub async fn load(&self) -> SyncStatus {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no status file at {}; starting empty", self.path.display());
                return SyncStatus::new();
            }
            Err(e) => {
                warn!(
                    "could not read status file {}: {e}; starting empty",
                    self.path.display()
                );
                return SyncStatus::new();
            }
        };

        let mut status = SyncStatus::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once(DELIMITER) {
                Some((filename, signature)) => {
                    status.insert(filename.to_string(), signature.to_string());
                }
                None => warn!("malformed status record skipped: {line}"),
            }
        }

        debug!("loaded {} status records", status.len());
        status
    }

    /// Rewrite the status file wholesale, one `filename;signature` per line
    pub async fn save(&self, status: &SyncStatus) -> Result<()> {
        let mut content = String::new();
        for (filename, signature) in status {
            content.push_str(filename);
            content.push(DELIMITER);
            content.push_str(signature);
            content.push('\n');
        }

        fs::write(&self.path, content).await.map_err(|e| {
            Error::status(format!(
                "could not write status file {}: {e}",
                self.path.display()
            ))
        })?;

        debug!("saved {} status records", status.len());
        Ok(())
    }

    /// Path of the underlying status file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
