use serde_json::Value;

use crate::{ApiResponse, HomeworkRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("api response is not a mapping")]
    NotAMapping,
    #[error("no data under keys <homeworks> or <current_date>")]
    MissingKeys,
    #[error("homework entries arrive as nested lists")]
    MalformedList,
    #[error("malformed homework data: {0}")]
    MalformedRecord(String),
}

/// Checks a raw poll response and extracts the typed records.
///
/// Only the first homework entry is decoded strictly; later entries that do
/// not decode are dropped because only the newest submission is tracked.
pub fn validate(raw: &Value) -> Result<ApiResponse, SchemaError> {
    let map = raw.as_object().ok_or(SchemaError::NotAMapping)?;

    let homeworks = map.get("homeworks").filter(|v| is_truthy(v));
    let current_date = map.get("current_date").filter(|v| is_truthy(v));
    let (Some(homeworks), Some(current_date)) = (homeworks, current_date) else {
        return Err(SchemaError::MissingKeys);
    };

    let entries = homeworks
        .as_array()
        .ok_or_else(|| SchemaError::MalformedRecord("<homeworks> is not a list".into()))?;
    let current_date = current_date
        .as_i64()
        .ok_or_else(|| SchemaError::MalformedRecord("<current_date> is not an integer".into()))?;

    let (first, rest) = entries.split_first().ok_or(SchemaError::MissingKeys)?;
    if first.is_array() {
        return Err(SchemaError::MalformedList);
    }

    let mut records = Vec::with_capacity(entries.len());
    records.push(HomeworkRecord::from_json(first)?);
    records.extend(
        rest.iter()
            .filter(|entry| !entry.is_array())
            .filter_map(|entry| HomeworkRecord::from_json(entry).ok()),
    );

    Ok(ApiResponse {
        homeworks: records,
        current_date,
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
