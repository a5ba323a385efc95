//! CSV export of normalized job records.
//!
//! Rows are rendered from borrowed records; sanitization never touches the
//! records themselves.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde_json::Value;

use crate::error::AppError;
use crate::record::{JobField, JobRecord, display_value};

/// Exported columns, in file order.
pub const EXPORT_COLUMNS: [JobField; 22] = [
    JobField::JobId,
    JobField::Title,
    JobField::EmployerName,
    JobField::City,
    JobField::State,
    JobField::Country,
    JobField::IsRemote,
    JobField::EmploymentType,
    JobField::MinSalary,
    JobField::MaxSalary,
    JobField::SalaryCurrency,
    JobField::SalaryPeriod,
    JobField::Description,
    JobField::ApplyLink,
    JobField::PostedAtDatetime,
    JobField::Publisher,
    JobField::RequiredExperience,
    JobField::RequiredSkills,
    JobField::RequiredEducation,
    JobField::Benefits,
    JobField::GoogleLink,
    JobField::OfferExpirationDatetime,
];

/// Maximum number of characters kept from a description.
pub const DESCRIPTION_LIMIT: usize = 500;

const ELLIPSIS: &str = "...";
const FILE_EXTENSION: &str = "csv";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FALLBACK_STEM: &str = "jobs";
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Write `records` to a new CSV file in `destination_dir`, named after
/// `query_label` and the current local time.
pub fn export_csv(
    records: &[JobRecord],
    query_label: &str,
    destination_dir: impl AsRef<Path>,
) -> Result<PathBuf, AppError> {
    export_csv_at(records, query_label, destination_dir, Local::now().naive_local())
}

/// Like [`export_csv`], with an explicit capture timestamp.
///
/// An existing file is never overwritten: when the name is taken, a `_N`
/// suffix is added before the extension.
pub fn export_csv_at(
    records: &[JobRecord],
    query_label: &str,
    destination_dir: impl AsRef<Path>,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, AppError> {
    let dir = destination_dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        AppError::ExportError(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })?;

    let (path, file) = create_unique(dir, &file_stem(query_label, timestamp))?;
    write_csv(records, file, &path)?;

    tracing::info!(path = %path.display(), rows = records.len(), "Exported jobs to CSV");
    Ok(path)
}

fn create_unique(dir: &Path, stem: &str) -> Result<(PathBuf, File), AppError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = match attempt {
            0 => format!("{stem}.{FILE_EXTENSION}"),
            n => format!("{stem}_{n}.{FILE_EXTENSION}"),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(write_error(&path, e)),
        }
    }

    Err(AppError::ExportError(format!(
        "No free file name for {stem}.{FILE_EXTENSION} in {}",
        dir.display()
    )))
}

fn write_csv(records: &[JobRecord], file: File, path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(EXPORT_COLUMNS.iter().map(|f| f.name()))
        .map_err(|e| write_error(path, e))?;

    for record in records {
        writer
            .write_record(export_row(record))
            .map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::ExportError(format!("Failed to write {}: {e}", path.display()))
}

/// The sanitized cells of one record, in [`EXPORT_COLUMNS`] order.
pub fn export_row(record: &JobRecord) -> Vec<String> {
    EXPORT_COLUMNS
        .iter()
        .map(|field| export_cell(*field, record.get(*field)))
        .collect()
}

/// Render one exported cell. Missing values become an empty cell.
pub fn export_cell(field: JobField, value: Option<&Value>) -> String {
    match (field, value) {
        (_, None | Some(Value::Null)) => String::new(),
        (JobField::Description, Some(Value::String(text))) if !text.is_empty() => {
            truncate_description(text)
        }
        (JobField::RequiredSkills | JobField::Benefits, Some(Value::Array(items))) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        (_, Some(value)) => display_value(value),
    }
}

/// Collapse whitespace, keep the first [`DESCRIPTION_LIMIT`] characters and
/// append `...`.
///
/// The marker is appended whether or not anything was cut.
pub fn truncate_description(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out: String = collapsed.chars().take(DESCRIPTION_LIMIT).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Derive the export file name for `query_label` captured at `timestamp`.
///
/// Only ASCII letters, digits and `_` survive from the label; runs of
/// whitespace and `-` become a single `_`. Everything else is dropped.
pub fn export_file_name(query_label: &str, timestamp: NaiveDateTime) -> String {
    format!("{}.{FILE_EXTENSION}", file_stem(query_label, timestamp))
}

fn file_stem(query_label: &str, timestamp: NaiveDateTime) -> String {
    let label = sanitize_label(query_label);
    let label = if label.is_empty() { FALLBACK_STEM } else { label.as_str() };
    format!("{label}_{}", timestamp.format(TIMESTAMP_FORMAT))
}

fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;

    for c in label.chars() {
        if c.is_whitespace() || c == '-' {
            pending_sep = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    fn column(name: &str) -> usize {
        EXPORT_COLUMNS.iter().position(|f| f.name() == name).unwrap()
    }

    #[test]
    fn file_name_strips_punctuation() {
        let name = export_file_name("python developer, madrid!", ts());
        assert_eq!(name, "python_developer_madrid_20261014_090507.csv");
    }

    #[test]
    fn file_name_neutralizes_hostile_labels() {
        assert_eq!(
            export_file_name("../../etc/passwd", ts()),
            "etcpasswd_20261014_090507.csv"
        );
        assert_eq!(
            export_file_name("  back-end -- dev\t\nzürich ", ts()),
            "back_end_dev_zrich_20261014_090507.csv"
        );
        assert_eq!(export_file_name("C:\\jobs\\*?", ts()), "Cjobs_20261014_090507.csv");
    }

    #[test]
    fn file_name_falls_back_when_label_is_empty() {
        assert_eq!(export_file_name("!!! ???", ts()), "jobs_20261014_090507.csv");
        assert_eq!(export_file_name("日本語", ts()), "jobs_20261014_090507.csv");
    }

    #[test]
    fn description_collapsed_and_marked() {
        let record = JobRecord::from_fields([(JobField::Description, json!("a  \n\n b"))]);
        let row = export_row(&record);
        assert_eq!(row[column("job_description")], "a b...");
        for (i, cell) in row.iter().enumerate() {
            if i != column("job_description") {
                assert_eq!(cell, "", "column {} should be empty", EXPORT_COLUMNS[i]);
            }
        }
    }

    #[test]
    fn description_truncated_to_limit() {
        let long = "é".repeat(DESCRIPTION_LIMIT + 20);
        let out = truncate_description(&long);
        assert_eq!(out.chars().count(), DESCRIPTION_LIMIT + ELLIPSIS.len());
        assert!(out.ends_with("é..."));
    }

    #[test]
    fn empty_description_stays_empty() {
        assert_eq!(export_cell(JobField::Description, Some(&json!(""))), "");
    }

    #[test]
    fn list_fields_joined() {
        assert_eq!(
            export_cell(JobField::Benefits, Some(&json!(["dental", "vision"]))),
            "dental, vision"
        );
        assert_eq!(
            export_cell(JobField::RequiredSkills, Some(&json!(["rust", 3]))),
            "rust, 3"
        );
        assert_eq!(export_cell(JobField::Benefits, Some(&json!([]))), "");
        assert_eq!(
            export_cell(JobField::Benefits, Some(&json!("health_insurance"))),
            "health_insurance"
        );
    }

    #[test]
    fn other_values_render_plainly() {
        assert_eq!(export_cell(JobField::IsRemote, Some(&json!(true))), "true");
        assert_eq!(export_cell(JobField::MinSalary, Some(&json!(85000))), "85000");
        assert_eq!(
            export_cell(
                JobField::RequiredExperience,
                Some(&json!({"no_experience_required": true}))
            ),
            r#"{"no_experience_required":true}"#
        );
        assert_eq!(export_cell(JobField::City, None), "");
        assert_eq!(export_cell(JobField::City, Some(&Value::Null)), "");
    }

    #[test]
    fn export_leaves_record_untouched() {
        let record = JobRecord::from_fields([
            (JobField::Description, json!("line one\nline two")),
            (JobField::Benefits, json!(["dental"])),
        ]);
        let before = record.clone();
        let dir = tempfile::tempdir().unwrap();
        export_csv_at(std::slice::from_ref(&record), "x", dir.path(), ts()).unwrap();
        assert_eq!(record, before);
    }

    #[test]
    fn round_trip_preserves_count_and_order() {
        let records: Vec<JobRecord> = (0..5)
            .map(|i| {
                JobRecord::from_fields([
                    (JobField::JobId, json!(format!("id-{i}"))),
                    (JobField::Title, json!(format!("Engineer, level {i}"))),
                    (JobField::Description, json!("Quoted \"text\", with commas")),
                    (JobField::Latitude, json!(40.4)),
                ])
            })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = export_csv_at(&records, "rust jobs", dir.path(), ts()).unwrap();
        assert_eq!(path, dir.path().join("rust_jobs_20261014_090507.csv"));

        let (headers, rows) = read_rows(&path);
        assert_eq!(headers.len(), 22);
        assert_eq!(
            headers,
            EXPORT_COLUMNS.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
        assert!(!headers.iter().any(|h| h == "job_latitude"));
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row[column("job_id")], format!("id-{i}"));
            assert_eq!(row[column("job_title")], format!("Engineer, level {i}"));
            assert_eq!(row[column("job_description")], "Quoted \"text\", with commas...");
        }
    }

    #[test]
    fn export_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = export_csv_at(&[], "empty", &nested, ts()).unwrap();
        assert!(path.starts_with(&nested));

        let (headers, rows) = read_rows(&path);
        assert_eq!(headers.len(), 22);
        assert!(rows.is_empty());

        // Existing directory is fine.
        export_csv_at(&[], "empty again", &nested, ts()).unwrap();
    }

    #[test]
    fn same_label_same_second_keeps_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = JobRecord::from_fields([(JobField::JobId, json!("first"))]);
        let second = JobRecord::from_fields([(JobField::JobId, json!("second"))]);

        let a = export_csv_at(&[first], "rust dev", dir.path(), ts()).unwrap();
        let b = export_csv_at(&[second], "rust dev", dir.path(), ts()).unwrap();
        let c = export_csv_at(&[], "rust dev", dir.path(), ts()).unwrap();

        assert_eq!(a.file_name().unwrap(), "rust_dev_20261014_090507.csv");
        assert_eq!(b.file_name().unwrap(), "rust_dev_20261014_090507_1.csv");
        assert_eq!(c.file_name().unwrap(), "rust_dev_20261014_090507_2.csv");

        let (_, rows) = read_rows(&a);
        assert_eq!(rows[0][column("job_id")], "first");
        let (_, rows) = read_rows(&b);
        assert_eq!(rows[0][column("job_id")], "second");
    }

    #[test]
    fn export_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = export_csv_at(&[], "jobs", &blocker, ts()).unwrap_err();
        assert!(matches!(err, AppError::ExportError(_)));
    }
}
