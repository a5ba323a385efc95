use std::fmt::Write;

use crate::record::{JobField, JobRecord, display_value};

const BANNER_WIDTH: usize = 80;
const SEPARATOR_WIDTH: usize = 40;
const NOT_AVAILABLE: &str = "N/A";

/// Render a console summary of `records`.
pub fn render(records: &[JobRecord]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n{banner}");
    let _ = writeln!(out, "SEARCH SUMMARY - {} jobs found", records.len());
    let _ = writeln!(out, "{banner}\n");

    for (i, record) in records.iter().enumerate() {
        render_record(&mut out, i + 1, record);
    }

    let _ = writeln!(out, "\n{banner}");
    out
}

fn render_record(out: &mut String, ordinal: usize, record: &JobRecord) {
    let remote = if record.flag(JobField::IsRemote) == Some(true) {
        "Yes"
    } else {
        "No"
    };

    let _ = writeln!(out, "Job #{ordinal}");
    let _ = writeln!(out, "   Title: {}", field_or_na(record, JobField::Title));
    let _ = writeln!(out, "   Company: {}", field_or_na(record, JobField::EmployerName));
    let _ = writeln!(out, "   Location: {}", location(record));
    let _ = writeln!(out, "   Remote: {remote}");
    let _ = writeln!(out, "   Type: {}", field_or_na(record, JobField::EmploymentType));

    if let Some(salary) = salary(record) {
        let _ = writeln!(out, "   Salary: {salary}");
    }

    let _ = writeln!(out, "   Link: {}", field_or_na(record, JobField::ApplyLink));
    let _ = writeln!(out, "   Posted: {}", field_or_na(record, JobField::PostedAtDatetime));
    let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
}

/// `city, state, country`, with each missing part shown as `N/A`.
pub fn location(record: &JobRecord) -> String {
    [JobField::City, JobField::State, JobField::Country]
        .map(|field| field_or_na(record, field))
        .join(", ")
}

/// `min - max currency/period`, or `None` when neither bound is present.
pub fn salary(record: &JobRecord) -> Option<String> {
    if !record.is_present(JobField::MinSalary) && !record.is_present(JobField::MaxSalary) {
        return None;
    }

    Some(format!(
        "{} - {} {}/{}",
        field_or_na(record, JobField::MinSalary),
        field_or_na(record, JobField::MaxSalary),
        field_or_na(record, JobField::SalaryCurrency),
        field_or_na(record, JobField::SalaryPeriod),
    ))
}

fn field_or_na(record: &JobRecord, field: JobField) -> String {
    record
        .get(field)
        .map(display_value)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
