//! Core traits for WebMirror operations
//!
//! These traits are the seams of the sync engine: [`RemoteSource`] abstracts
//! the transport behind the listing and file downloads, and [`SyncObserver`]
//! carries per-run reporting out of the engine without coupling it to any
//! terminal rendering.

use crate::{PlanItem, PlanSummary, Result, TransferOutcome};
use async_trait::async_trait;
use std::path::Path;

/// Source of the remote listing and the files it describes
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the raw listing markup
    async fn fetch_listing(&self) -> Result<String>;

    /// Fetch a single listed file into `dest`
    async fn fetch_file(&self, filename: &str, dest: &Path) -> Result<()>;
}

/// Observer for run progress; all methods default to no-ops
pub trait SyncObserver: Send + Sync {
    /// The listing was fetched and parsed into `entries` rows
    fn listing_loaded(&self, entries: usize) {
        let _ = entries;
    }

    /// Reconciliation finished with the given per-class counts
    fn plan_ready(&self, summary: &PlanSummary) {
        let _ = summary;
    }

    /// A planned transfer is about to start
    fn transfer_started(&self, item: &PlanItem) {
        let _ = item;
    }

    /// A planned transfer finished
    fn transfer_finished(&self, outcome: &TransferOutcome, is_new: bool) {
        let _ = (outcome, is_new);
    }
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SyncObserver for NullObserver {}
