//! Sync run orchestration
//!
//! One [`SyncEngine::run`] call performs a full pass: fetch and parse the
//! listing, reconcile it against the persisted status and ignore rules,
//! transfer each planned item sequentially, then fold the successes back
//! into the status file. The engine owns no process-wide state: it is
//! constructed over an immutable, already-validated configuration.

use crate::{
    ignore::IgnoreList, listing, reconcile, status::StatusStore, transfer::TransferEngine,
};
use std::time::Instant;
use tracing::{error, info, warn};
use webmirror_config::Config;
use webmirror_types::{RemoteSource, Result, SyncObserver, SyncOutcome, SyncReport};

/// Orchestrates one incremental sync run
pub struct SyncEngine<S: RemoteSource> {
    config: Config,
    source: S,
}

impl<S: RemoteSource> SyncEngine<S> {
    /// Create an engine over a validated configuration and a remote source
    pub fn new(config: Config, source: S) -> Self {
        Self { config, source }
    }

    /// The configuration the engine was constructed with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one sync pass.
    ///
    /// Acquisition faults (listing unfetchable, empty, or unparseable) end
    /// the run gracefully with nothing changed; per-item transfer faults
    /// are isolated to their item. Only unexpected faults surface as `Err`.
    pub async fn run(&self, observer: &dyn SyncObserver) -> Result<SyncReport> {
        let started = Instant::now();
        info!(
            "starting sync of {} into {}",
            self.config.remote.url,
            self.config.local.directory.display()
        );

        let markup = match self.source.fetch_listing().await {
            Ok(markup) => markup,
            Err(e) => {
                error!("could not fetch remote listing: {e}");
                let mut report = SyncReport::new(SyncOutcome::ListingUnavailable);
                report.duration = started.elapsed();
                return Ok(report);
            }
        };

        let remote = listing::parse_listing(&markup);
        if remote.is_empty() {
            warn!("remote listing is empty or unparseable; nothing to do");
            let mut report = SyncReport::new(SyncOutcome::ListingUnavailable);
            report.duration = started.elapsed();
            return Ok(report);
        }
        observer.listing_loaded(remote.len());

        let status_store = StatusStore::new(self.config.status_path());
        let status = status_store.load().await;
        let ignores = IgnoreList::load(&self.config.ignore_path()).await;

        let (plan, summary) = reconcile::plan(&remote, &status, &ignores);
        observer.plan_ready(&summary);

        let mut report = SyncReport::new(SyncOutcome::UpToDate);
        report.files_listed = remote.len();
        report.summary = summary;

        if !summary.has_work() {
            // nothing to download; the status file stays untouched
            report.duration = started.elapsed();
            return Ok(report);
        }

        report.outcome = SyncOutcome::Synced;
        let transfers = TransferEngine::new(self.config.cache_dir());
        let mut next_status = status;

        for plan_item in &plan {
            observer.transfer_started(plan_item);
            let outcome = transfers
                .transfer(&self.source, plan_item, &self.config.local.directory)
                .await;
            observer.transfer_finished(&outcome, plan_item.is_new);

            if outcome.succeeded {
                // successes carry their new signature forward; failed items
                // keep their old record and are re-planned next run
                next_status.insert(outcome.filename, outcome.signature);
                if plan_item.is_new {
                    report.files_new += 1;
                } else {
                    report.files_updated += 1;
                }
            } else {
                report.failed.push(outcome.filename);
            }
        }

        if let Err(e) = status_store.save(&next_status).await {
            // the next run simply re-detects the same diffs
            error!("could not persist sync status: {e}");
        }

        report.duration = started.elapsed();
        info!(
            "sync finished: {} new, {} updated, {} failed",
            report.files_new,
            report.files_updated,
            report.files_failed()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use tempfile::TempDir;
    use webmirror_config::ConfigBuilder;
    use webmirror_types::{Error, NullObserver};

    struct UnreachableSource;

    #[async_trait]
    impl RemoteSource for UnreachableSource {
        async fn fetch_listing(&self) -> Result<String> {
            Err(Error::network("connection refused"))
        }

        async fn fetch_file(&self, _filename: &str, _dest: &Path) -> Result<()> {
            panic!("no file fetch should be attempted");
        }
    }

    struct EmptyListingSource;

    #[async_trait]
    impl RemoteSource for EmptyListingSource {
        async fn fetch_listing(&self) -> Result<String> {
            Ok("<html><body>maintenance page</body></html>".to_string())
        }

        async fn fetch_file(&self, _filename: &str, _dest: &Path) -> Result<()> {
            panic!("no file fetch should be attempted");
        }
    }

    fn config_for(dir: &TempDir) -> Config {
        ConfigBuilder::new()
            .url("https://example.com/tools/")
            .directory(dir.path())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_failure_ends_gracefully() {
        let target = TempDir::new().unwrap();
        let engine = SyncEngine::new(config_for(&target), UnreachableSource);

        let report = engine.run(&NullObserver).await.unwrap();

        assert_eq!(report.outcome, SyncOutcome::ListingUnavailable);
        assert!(!target.path().join(".syncstatus").exists());
    }

    #[tokio::test]
    async fn test_empty_listing_short_circuits() {
        let target = TempDir::new().unwrap();
        let engine = SyncEngine::new(config_for(&target), EmptyListingSource);

        let report = engine.run(&NullObserver).await.unwrap();

        assert_eq!(report.outcome, SyncOutcome::ListingUnavailable);
        assert_eq!(report.files_listed, 0);
        // no downloads were attempted and no state files were written
        assert!(!target.path().join(".syncstatus").exists());
        assert!(!target.path().join(".syncignore").exists());
    }
}
