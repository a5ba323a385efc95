use std::path::Path;

use scout_core::export::export_csv;
use scout_core::{AppError, EXPORT_COLUMNS, JobField, SearchCriteria, SearchService, render};

use crate::common::{mock_search, sample_job, setup_mock_api};

fn read_csv(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader.records().map(Result::unwrap).collect();
    (headers, rows)
}

#[tokio::test]
async fn search_render_and_export() {
    let (mut server, client) = setup_mock_api().await;
    let mock = mock_search(
        &mut server,
        200,
        serde_json::json!({
            "status": "OK",
            "request_id": "req-1",
            "data": [sample_job(1), sample_job(2), sample_job(3)]
        }),
    )
    .await;

    let criteria = SearchCriteria::new("rust engineer, madrid!")
        .unwrap()
        .with_country("es");
    let records = SearchService::new(client).run(&criteria).await.unwrap();
    mock.assert_async().await;

    assert_eq!(records.len(), 3);
    assert!(records[0].get(JobField::State).is_none());
    assert_eq!(records[0].number(JobField::Latitude), Some(40.4168));

    let summary = render(&records);
    assert!(summary.contains("SEARCH SUMMARY - 3 jobs found"));
    assert!(summary.contains("   Location: Madrid, N/A, ES\n"));
    assert!(summary.contains("   Salary: 50000 - N/A EUR/YEAR\n"));

    let dir = tempfile::tempdir().unwrap();
    let path = export_csv(&records, criteria.query(), dir.path()).unwrap();
    let file_name = path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("rust_engineer_madrid_"));
    assert!(file_name.ends_with(".csv"));

    let (headers, rows) = read_csv(&path);
    assert_eq!(headers.len(), 22);
    assert_eq!(headers[0], "job_id");
    assert_eq!(rows.len(), 3);

    let col = |name: &str| EXPORT_COLUMNS.iter().position(|f| f.name() == name).unwrap();
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(&row[col("job_id")], format!("job-{}", i + 1));
        assert_eq!(&row[col("job_state")], "");
        assert_eq!(&row[col("job_max_salary")], "");
        assert_eq!(&row[col("job_benefits")], "health_insurance, paid_time_off");
        assert_eq!(
            &row[col("job_description")],
            "Build reliable systems. Remote friendly...."
        );
    }
}

#[tokio::test]
async fn upstream_error_payload_is_search_failure() {
    let (mut server, client) = setup_mock_api().await;
    let _mock = mock_search(&mut server, 200, serde_json::json!({"error": "quota exceeded"})).await;

    let criteria = SearchCriteria::new("rust").unwrap();
    let err = SearchService::new(client).run(&criteria).await.unwrap_err();

    assert!(err.is_search_failure());
    assert!(matches!(err, AppError::UpstreamError(ref m) if m == "quota exceeded"));
}

#[tokio::test]
async fn unauthorized_is_search_failure() {
    let (mut server, client) = setup_mock_api().await;
    let _mock = mock_search(
        &mut server,
        403,
        serde_json::json!({"message": "You are not subscribed to this API."}),
    )
    .await;

    let criteria = SearchCriteria::new("rust").unwrap();
    let err = SearchService::new(client).run(&criteria).await.unwrap_err();

    assert!(err.is_search_failure());
    assert_eq!(err.message(), "HTTP 403: You are not subscribed to this API.");
}

#[tokio::test]
async fn empty_result_is_success() {
    let (mut server, client) = setup_mock_api().await;
    let _mock = mock_search(&mut server, 200, serde_json::json!({"status": "OK", "data": []})).await;

    let criteria = SearchCriteria::new("cobol wizard").unwrap();
    let records = SearchService::new(client).run(&criteria).await.unwrap();

    assert!(records.is_empty());
}
