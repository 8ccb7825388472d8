use crate::HomeworkRecord;

/// True when `current` differs from the last observed record by identity or status.
///
/// `date_updated` is ignored: a resubmission that keeps its status is not a change.
pub fn has_changed(previous: Option<&HomeworkRecord>, current: &HomeworkRecord) -> bool {
    match previous {
        None => true,
        Some(prev) => prev.identity() != current.identity() || prev.status != current.status,
    }
}
