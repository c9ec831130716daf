//! Incremental listing synchronization engine for WebMirror
//!
//! This crate mirrors a remote HTML index page into a local directory. One
//! run scrapes the listing into a filename → signature map, diffs it against
//! the persisted sync status while honoring the local exclusion list,
//! downloads the changed files through an atomically staged transfer, and
//! folds the successes back into the status file. Failed items keep their
//! old record, so they are re-planned on the next run.
//!
//! # Examples
//!
//! ```no_run
//! use webmirror_config::ConfigBuilder;
//! use webmirror_sync::{HttpSource, SyncEngine};
//! use webmirror_types::NullObserver;
//!
//! # async fn example() -> webmirror_types::Result<()> {
//! let config = ConfigBuilder::new()
//!     .url("https://live.sysinternals.com/")
//!     .build()?;
//! let source = HttpSource::new(&config)?;
//! let engine = SyncEngine::new(config, source);
//!
//! let report = engine.run(&NullObserver).await?;
//! println!("{} new, {} updated", report.files_new, report.files_updated);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod ignore;
pub mod listing;
pub mod reconcile;
pub mod source;
pub mod status;
pub mod transfer;

// Re-export commonly used types
pub use engine::SyncEngine;
pub use ignore::IgnoreList;
pub use listing::parse_listing;
pub use source::HttpSource;
pub use status::StatusStore;
pub use transfer::TransferEngine;
