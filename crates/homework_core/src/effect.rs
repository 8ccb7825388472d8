use chrono::{DateTime, Utc};

use crate::{ClassifiedError, HomeworkRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand `text` to the notifier. `observed` is committed once delivery is settled.
    Notify {
        text: String,
        observed: Option<HomeworkRecord>,
    },
    /// The tracked submission kept its status.
    Unchanged {
        name: String,
        updated_at: Option<DateTime<Utc>>,
    },
    /// Log a classified failure at its severity.
    Report(ClassifiedError),
    /// Stop the loop and terminate the process.
    Abort(ClassifiedError),
}
