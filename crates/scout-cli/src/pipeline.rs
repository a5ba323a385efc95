use std::io::{self, Write};
use std::path::PathBuf;

use scout_core::export::export_csv;
use scout_core::{JobSearchClient, SearchCriteria, SearchService, render};

/// How search results are shown and persisted.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub export: bool,
    pub json: bool,
}

/// What happened to one search.
#[derive(Debug)]
pub enum Outcome {
    /// Transport or upstream failure, with the message shown to the user.
    Failed(String),
    Empty,
    Found {
        count: usize,
        /// `None` when export was disabled.
        exported: Option<Result<PathBuf, String>>,
    },
}

/// Run one search and write its summary or failure to `out`.
///
/// A failed export is reported after the summary has been written, so the
/// summary is never lost. In JSON mode `out` only ever receives a JSON array;
/// failures are logged instead.
pub async fn run_search<C, W>(
    service: &SearchService<C>,
    criteria: &SearchCriteria,
    opts: &RunOptions,
    out: &mut W,
) -> io::Result<Outcome>
where
    C: JobSearchClient,
    W: Write,
{
    let records = match service.run(criteria).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "Search failed");
            let message = e.message();
            if !opts.json {
                writeln!(out, "\nSearch failed: {message}")?;
            }
            return Ok(Outcome::Failed(message));
        }
    };

    if records.is_empty() {
        if opts.json {
            writeln!(out, "[]")?;
        } else {
            writeln!(out, "\nNo jobs found matching these criteria")?;
        }
        return Ok(Outcome::Empty);
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&records).map_err(io::Error::other)?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", render(&records))?;
    }

    let exported = if opts.export {
        let result = export_csv(&records, criteria.query(), &opts.output_dir);
        // JSON output owns stdout; export status goes to the log instead.
        match (&result, opts.json) {
            (Ok(path), false) => writeln!(out, "\nJobs saved to CSV: {}", path.display())?,
            (Err(e), false) => writeln!(out, "\nFailed to save CSV file: {}", e.message())?,
            (Ok(_), true) => {}
            (Err(e), true) => tracing::warn!(error = %e, "Failed to save CSV file"),
        }
        Some(result.map_err(|e| e.message()))
    } else {
        None
    };

    if !opts.json {
        writeln!(out, "\nFound {} jobs", records.len())?;
    }

    Ok(Outcome::Found {
        count: records.len(),
        exported,
    })
}
