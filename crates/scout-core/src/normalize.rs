use serde_json::Value;

use crate::error::AppError;
use crate::record::JobRecord;

/// Result of normalizing one upstream response.
///
/// Zero records with no error is a valid, non-exceptional outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedResponse {
    pub records: Vec<JobRecord>,
    /// Error message carried by the payload, if any.
    pub error: Option<String>,
}

impl NormalizedResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Convert an error-carrying response into `AppError::UpstreamError`.
    pub fn into_result(self) -> Result<Vec<JobRecord>, AppError> {
        match self.error {
            Some(message) => Err(AppError::UpstreamError(message)),
            None => Ok(self.records),
        }
    }
}

/// Convert a raw search response into canonical job records.
///
/// Never fails: an `error` member yields no records plus the message, and a
/// missing or non-array `data` member yields no records.
pub fn normalize(raw: &Value) -> NormalizedResponse {
    if let Some(error) = raw.get("error").filter(|e| !e.is_null()) {
        let message = error_message(error);
        tracing::warn!(error = %message, "Search response carries an error");
        return NormalizedResponse {
            records: Vec::new(),
            error: Some(message),
        };
    }

    let items = match raw.get("data") {
        None | Some(Value::Null) => {
            tracing::info!("Search response has no data collection");
            return NormalizedResponse::default();
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!(kind = json_kind(other), "Ignoring non-array data member");
            return NormalizedResponse::default();
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(job) => records.push(JobRecord::from_source(job)),
            None => tracing::warn!(index, kind = json_kind(item), "Skipping non-object job entry"),
        }
    }

    tracing::debug!("Normalized {} of {} job entries", records.len(), items.len());

    NormalizedResponse {
        records,
        error: None,
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(obj) => match obj.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => error.to_string(),
        },
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
