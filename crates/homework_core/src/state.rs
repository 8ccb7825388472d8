use crate::HomeworkRecord;

/// In-memory progress of the poll loop. Nothing here survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollState {
    last_poll_timestamp: i64,
    last_observed: Option<HomeworkRecord>,
    last_sent: Option<String>,
}

impl PollState {
    pub fn new(initial_timestamp: i64) -> Self {
        Self {
            last_poll_timestamp: initial_timestamp,
            ..Self::default()
        }
    }

    /// Value sent as `from_date` on the next poll.
    pub fn last_poll_timestamp(&self) -> i64 {
        self.last_poll_timestamp
    }

    pub fn last_observed(&self) -> Option<&HomeworkRecord> {
        self.last_observed.as_ref()
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    /// Moves the poll cursor forward; a server date older than the cursor is ignored.
    pub(crate) fn advance_to(&mut self, current_date: i64) {
        self.last_poll_timestamp = self.last_poll_timestamp.max(current_date);
    }

    pub(crate) fn record_sent(&mut self, text: String) {
        self.last_sent = Some(text);
    }

    pub(crate) fn record_observed(&mut self, record: HomeworkRecord) {
        self.last_observed = Some(record);
    }
}
