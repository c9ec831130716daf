//! Core data types for the incremental sync run
//!
//! A run turns a freshly scraped [`RemoteListing`] plus the persisted
//! [`SyncStatus`] into a download plan; transfer outcomes for that plan fold
//! back into the status map that is persisted at the end of the run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Mapping of remote filename to its listing signature, built fresh each run
pub type RemoteListing = HashMap<String, String>;

/// Mapping of filename to the signature it carried when last synced
pub type SyncStatus = HashMap<String, String>;

/// One row of the remote listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Remote filename, the unique key of the listing
    pub filename: String,
    /// Opaque change-detection token; compared case-insensitively
    pub signature: String,
}

impl ToolEntry {
    /// Create a new listing entry
    pub fn new<S: Into<String>>(filename: S, signature: S) -> Self {
        Self {
            filename: filename.into(),
            signature: signature.into(),
        }
    }
}

/// A file selected for download in the current run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Remote filename to download
    pub filename: String,
    /// Signature the listing currently advertises for this file
    pub signature: String,
    /// True iff the filename was absent from the persisted status
    pub is_new: bool,
}

impl PlanItem {
    /// Create a new plan item
    pub fn new<S: Into<String>>(filename: S, signature: S, is_new: bool) -> Self {
        Self {
            filename: filename.into(),
            signature: signature.into(),
            is_new,
        }
    }
}

/// Per-class counts produced by the reconciler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Files present in the listing but not in the status map
    pub new_count: usize,
    /// Files whose signature differs from the last synced one
    pub update_count: usize,
    /// Files whose signature matches the last synced one
    pub up_to_date_count: usize,
}

impl PlanSummary {
    /// Whether the run has anything to download
    pub fn has_work(&self) -> bool {
        self.new_count > 0 || self.update_count > 0
    }

    /// Total number of planned downloads
    pub fn planned(&self) -> usize {
        self.new_count + self.update_count
    }
}

/// Result of one attempted transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// Filename the transfer was for
    pub filename: String,
    /// Signature the file was downloaded under
    pub signature: String,
    /// Whether the file reached the target directory
    pub succeeded: bool,
}

impl TransferOutcome {
    /// Record a successful transfer
    pub fn success<S: Into<String>>(filename: S, signature: S) -> Self {
        Self {
            filename: filename.into(),
            signature: signature.into(),
            succeeded: true,
        }
    }

    /// Record a failed transfer
    pub fn failure<S: Into<String>>(filename: S, signature: S) -> Self {
        Self {
            filename: filename.into(),
            signature: signature.into(),
            succeeded: false,
        }
    }
}

/// Terminal state of a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncOutcome {
    /// At least one download was attempted and the status map was persisted
    Synced,
    /// Listing matched the status map after ignores; nothing was downloaded
    UpToDate,
    /// The listing could not be fetched or parsed; nothing was attempted
    ListingUnavailable,
}

/// Run-level result returned by the sync engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// How the run ended
    pub outcome: SyncOutcome,
    /// Number of entries scraped from the remote listing
    pub files_listed: usize,
    /// Reconciliation counts for the run
    pub summary: PlanSummary,
    /// New files downloaded successfully
    pub files_new: usize,
    /// Updated files downloaded successfully
    pub files_updated: usize,
    /// Filenames whose transfer failed; retried automatically next run
    pub failed: Vec<String>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl SyncReport {
    /// Create an empty report with the given outcome
    pub fn new(outcome: SyncOutcome) -> Self {
        Self {
            outcome,
            files_listed: 0,
            summary: PlanSummary::default(),
            files_new: 0,
            files_updated: 0,
            failed: Vec::new(),
            duration: Duration::default(),
        }
    }

    /// Number of failed transfers
    pub fn files_failed(&self) -> usize {
        self.failed.len()
    }
}
