//! Test utilities: a mock [`JobSearchClient`].

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::query::ParameterSet;
use crate::traits::JobSearchClient;

/// Mock client returning queued responses and recording every parameter set.
#[derive(Clone)]
pub struct MockSearchClient {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns `{"data": []}`.
    responses: Arc<Mutex<Vec<Result<serde_json::Value, AppError>>>>,
    pub calls: Arc<Mutex<Vec<ParameterSet>>>,
}

impl MockSearchClient {
    pub fn new(body: serde_json::Value) -> Self {
        Self::with_responses(vec![Ok(body)])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<serde_json::Value, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl JobSearchClient for MockSearchClient {
    async fn search(&self, params: &ParameterSet) -> Result<serde_json::Value, AppError> {
        self.calls.lock().unwrap().push(params.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(serde_json::json!({"data": []}))
        } else {
            responses.remove(0)
        }
    }
}
