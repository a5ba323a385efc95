use std::future::Future;

use crate::error::AppError;
use crate::query::ParameterSet;

/// Sends one search request and returns the decoded JSON body.
///
/// Implementations make a single attempt per call. Transport failures map to
/// [`AppError::TransportError`], error statuses to [`AppError::UpstreamError`].
pub trait JobSearchClient: Send + Sync + Clone {
    fn search(
        &self,
        params: &ParameterSet,
    ) -> impl Future<Output = Result<serde_json::Value, AppError>> + Send;
}
