//! Atomic staged downloads into the target directory
//!
//! Downloads never land directly in the target: each transfer writes into a
//! staging directory first and only a completed download is moved over the
//! destination, so a partial write can never contaminate the mirror.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;
use webmirror_types::{PlanItem, RemoteSource, TransferOutcome};

/// Downloads planned items through a staging directory
#[derive(Debug, Clone)]
pub struct TransferEngine {
    cache_dir: PathBuf,
}

impl TransferEngine {
    /// Create an engine staging into the given directory
    pub fn new<P: Into<PathBuf>>(cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Transfer one planned item into `target_dir`.
    ///
    /// Every fault (staging setup, the network fetch, the final move) is
    /// converted into a failed outcome; nothing escalates past the item.
    /// The staging copy is cleaned up best-effort on every exit path.
    pub async fn transfer(
        &self,
        source: &dyn RemoteSource,
        item: &PlanItem,
        target_dir: &Path,
    ) -> TransferOutcome {
        if let Err(e) = fs::create_dir_all(&self.cache_dir).await {
            warn!(
                "cannot create staging directory {}: {e}",
                self.cache_dir.display()
            );
            return TransferOutcome::failure(item.filename.clone(), item.signature.clone());
        }

        let cache_file = self.stage_path(&item.filename).await;

        if let Err(e) = source.fetch_file(&item.filename, &cache_file).await {
            warn!("download of {} failed: {e}", item.filename);
            self.cleanup(&cache_file).await;
            return TransferOutcome::failure(item.filename.clone(), item.signature.clone());
        }

        let final_path = target_dir.join(&item.filename);
        let moved = self.promote(&cache_file, &final_path).await;
        self.cleanup(&cache_file).await;

        if moved {
            TransferOutcome::success(item.filename.clone(), item.signature.clone())
        } else {
            TransferOutcome::failure(item.filename.clone(), item.signature.clone())
        }
    }

    /// Pick the staging path, clearing any leftover file of the same name.
    ///
    /// A leftover that cannot be removed (e.g. still locked) falls back to
    /// a collision-resistant generated name instead of failing the item.
    async fn stage_path(&self, filename: &str) -> PathBuf {
        let cache_file = self.cache_dir.join(filename);
        match fs::remove_file(&cache_file).await {
            Ok(()) => cache_file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => cache_file,
            Err(e) => {
                debug!(
                    "leftover staging file {} is busy ({e}); using a generated name",
                    cache_file.display()
                );
                let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");
                self.cache_dir
                    .join(format!("{}-{stamp}-{filename}", Uuid::new_v4()))
            }
        }
    }

    /// Move a completed download over the destination, falling back to a
    /// copy when the staging directory lives on another filesystem.
    async fn promote(&self, cache_file: &Path, final_path: &Path) -> bool {
        match fs::rename(cache_file, final_path).await {
            Ok(()) => true,
            Err(rename_err) => {
                debug!(
                    "rename into {} failed ({rename_err}); copying instead",
                    final_path.display()
                );
                match fs::copy(cache_file, final_path).await {
                    Ok(_) => true,
                    Err(copy_err) => {
                        warn!(
                            "could not move {} into place: {copy_err}",
                            final_path.display()
                        );
                        false
                    }
                }
            }
        }
    }

    /// Best-effort removal of the staging copy; never escalates
    async fn cleanup(&self, cache_file: &Path) {
        match fs::remove_file(cache_file).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "could not clean up staging file {}: {e}",
                cache_file.display()
            ),
        }
    }
}
