use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::SchemaError;

/// Review states documented by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// One submission as reported by the status endpoint.
///
/// `status` keeps the raw code so an undocumented value can still be reported
/// by [`crate::translate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub date_updated: Option<String>,
}

impl HomeworkRecord {
    /// Key used for change detection: the API id, or the name when no id is sent.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    pub fn known_status(&self) -> Option<HomeworkStatus> {
        HomeworkStatus::from_code(&self.status)
    }

    /// Parses `date_updated`, accepting RFC 3339 and the bare `YYYY-MM-DDTHH:MM:SS` form as UTC.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date_updated.as_deref()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub(crate) fn from_json(value: &Value) -> Result<Self, SchemaError> {
        let raw = RawRecord::deserialize(value)
            .map_err(|err| SchemaError::MalformedRecord(err.to_string()))?;
        let id = raw.id.map(RecordId::into_string);
        let name = match (raw.homework_name, id.as_ref()) {
            (Some(name), _) => name,
            (None, Some(id)) => id.clone(),
            (None, None) => {
                return Err(SchemaError::MalformedRecord(
                    "record has neither `id` nor `homework_name`".into(),
                ))
            }
        };
        Ok(Self {
            id,
            name,
            status: raw.status,
            date_updated: raw.date_updated,
        })
    }
}

#[derive(Deserialize)]
struct RawRecord {
    id: Option<RecordId>,
    homework_name: Option<String>,
    status: String,
    date_updated: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    fn into_string(self) -> String {
        match self {
            RecordId::Number(n) => n.to_string(),
            RecordId::Text(s) => s,
        }
    }
}

/// Validated poll response. `homeworks` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub homeworks: Vec<HomeworkRecord>,
    pub current_date: i64,
}

impl ApiResponse {
    /// The tracked submission: the API lists the newest record first.
    pub fn tracked(&self) -> Option<&HomeworkRecord> {
        self.homeworks.first()
    }
}
