use crate::{HomeworkRecord, PipelineError};

/// Result of handing a message to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// False when the message matched the last one sent and was skipped.
    pub sent: bool,
    pub last_sent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The status endpoint answered, or failed to.
    Polled(Result<serde_json::Value, PipelineError>),
    /// The notifier delivered or deduplicated a message.
    Notified {
        outcome: NotifyOutcome,
        observed: Option<HomeworkRecord>,
    },
    /// The messaging channel refused a message.
    NotifyFailed(PipelineError),
}
