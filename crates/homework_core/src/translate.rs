use crate::{HomeworkRecord, HomeworkStatus, PipelineError};

impl HomeworkStatus {
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Reviewed: the reviewer liked everything. Hooray!",
            HomeworkStatus::Reviewing => "Submitted for review.",
            HomeworkStatus::Rejected => "Reviewed: the reviewer has comments.",
        }
    }
}

/// Builds the notification text for a record's current status.
pub fn translate(record: &HomeworkRecord) -> Result<String, PipelineError> {
    let status = record
        .known_status()
        .ok_or_else(|| PipelineError::UnknownStatus(record.status.clone()))?;
    Ok(format!(
        "Status changed for submission \"{}\". {}",
        record.name,
        status.verdict()
    ))
}
