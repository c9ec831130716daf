//! Core type system and error handling for WebMirror
//!
//! This crate provides the foundational types shared across the WebMirror
//! workspace:
//!
//! - **Error handling**: a structured error type with categorized variants
//! - **Core types**: listing entries, download plans, outcomes, and reports
//! - **Traits**: the remote-source and observer seams used by the sync engine
//!
//! # Examples
//!
//! ```rust
//! use webmirror_types::{PlanItem, PlanSummary};
//!
//! let item = PlanItem::new("procmon.exe", "Friday May 2 2025 1445648", true);
//! let mut summary = PlanSummary::default();
//! summary.new_count += 1;
//! assert!(summary.has_work());
//! assert!(item.is_new);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use result::Result;
pub use traits::{NullObserver, RemoteSource, SyncObserver};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_summary_has_work() {
        let mut summary = PlanSummary::default();
        assert!(!summary.has_work());

        summary.up_to_date_count = 10;
        assert!(!summary.has_work());

        summary.update_count = 1;
        assert!(summary.has_work());
    }

    #[test]
    fn test_error_kind() {
        let err = Error::network("connection refused");
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_recoverable());

        let err = Error::config("bad url");
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!err.is_recoverable());
    }
}
