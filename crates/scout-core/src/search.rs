use crate::criteria::SearchCriteria;
use crate::error::AppError;
use crate::normalize::normalize;
use crate::record::JobRecord;
use crate::traits::JobSearchClient;

/// Runs the search pipeline: criteria → parameters → request → records.
///
/// Generic over the HTTP collaborator so it can be exercised without a
/// network.
pub struct SearchService<C: JobSearchClient> {
    client: C,
}

impl<C: JobSearchClient> SearchService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one search.
    ///
    /// An empty record list is a success. An error member in the response
    /// becomes [`AppError::UpstreamError`]. Nothing is retried.
    pub async fn run(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>, AppError> {
        let params = criteria.to_params();
        tracing::info!(query = criteria.query(), pages = criteria.num_pages(), "Searching jobs");

        let raw = self.client.search(&params).await?;
        let records = normalize(&raw).into_result()?;

        tracing::info!("Search returned {} jobs", records.len());
        Ok(records)
    }
}
