use mockito::{Matcher, Mock, ServerGuard};
use scout_client::{ApiConfig, JSearchClient};

/// Starts a mock JSearch server and returns a client pointed at it.
pub async fn setup_mock_api() -> (ServerGuard, JSearchClient) {
    let server = mockito::Server::new_async().await;
    let config = ApiConfig::new("integration-key")
        .expect("valid key")
        .with_base_url(server.url());
    let client = JSearchClient::new(config).expect("client builds");
    (server, client)
}

/// Registers a `/search` mock answering every query with `status` and `body`.
pub async fn mock_search(server: &mut ServerGuard, status: usize, body: serde_json::Value) -> Mock {
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .match_header("x-rapidapi-key", "integration-key")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// A JSearch-shaped job object.
pub fn sample_job(id: usize) -> serde_json::Value {
    serde_json::json!({
        "job_id": format!("job-{id}"),
        "employer_name": "Acme Corp",
        "employer_logo": "https://example.com/logo.png",
        "job_publisher": "LinkedIn",
        "job_employment_type": "FULLTIME",
        "job_title": format!("Rust Engineer {id}"),
        "job_apply_link": format!("https://example.com/apply/{id}"),
        "job_description": "Build   reliable\nsystems.\n\nRemote friendly.",
        "job_is_remote": id % 2 == 0,
        "job_posted_at_timestamp": 1_790_000_000 + id,
        "job_posted_at_datetime_utc": "2026-09-21T10:00:00.000Z",
        "job_city": "Madrid",
        "job_state": null,
        "job_country": "ES",
        "job_latitude": 40.4168,
        "job_longitude": -3.7038,
        "job_benefits": ["health_insurance", "paid_time_off"],
        "job_required_skills": null,
        "job_min_salary": 50000,
        "job_max_salary": null,
        "job_salary_currency": "EUR",
        "job_salary_period": "YEAR",
        "job_highlights": {"Qualifications": ["Rust"]}
    })
}
