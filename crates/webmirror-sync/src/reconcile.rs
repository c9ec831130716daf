//! Download planning against persisted status and exclusion rules

use crate::ignore::IgnoreList;
use tracing::debug;
use webmirror_types::{PlanItem, PlanSummary, RemoteListing, SyncStatus};

/// Diff the remote listing against the persisted status, honoring ignores.
///
/// Signatures compare case-insensitively. Ignored files contribute to
/// neither the plan nor the counts. Iteration order over the listing is
/// unspecified; nothing downstream depends on it.
pub fn plan(
    listing: &RemoteListing,
    status: &SyncStatus,
    ignores: &IgnoreList,
) -> (Vec<PlanItem>, PlanSummary) {
    let mut items = Vec::new();
    let mut summary = PlanSummary::default();

    for (filename, signature) in listing {
        if ignores.should_ignore(filename) {
            debug!("ignoring {filename}");
            continue;
        }

        let previous = status.get(filename);
        let is_new = previous.is_none();

        let changed = match previous {
            Some(last) => !last.eq_ignore_ascii_case(signature),
            None => true,
        };

        if changed {
            items.push(PlanItem::new(filename.clone(), signature.clone(), is_new));
            if is_new {
                summary.new_count += 1;
            } else {
                summary.update_count += 1;
            }
        } else {
            summary.up_to_date_count += 1;
        }
    }

    debug!(
        "planned {} downloads ({} new, {} updates, {} up to date)",
        items.len(),
        summary.new_count,
        summary.update_count,
        summary.up_to_date_count
    );
    (items, summary)
}
