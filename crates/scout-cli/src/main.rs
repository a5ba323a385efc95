mod menu;
mod pipeline;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scout_client::{ApiConfig, JSearchClient};
use scout_core::{DatePosted, EmploymentType, Preset, SearchCriteria, SearchService};

use crate::menu::Menu;
use crate::pipeline::{Outcome, RunOptions};

#[derive(Parser)]
#[command(
    name = "scout",
    version,
    about = "Search job offers through the JSearch API and export them to CSV"
)]
struct Cli {
    /// RapidAPI key (reads from RAPIDAPI_KEY env var if not provided)
    #[arg(long, env = "RAPIDAPI_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// RapidAPI host for the JSearch API
    #[arg(long, env = "RAPIDAPI_HOST", global = true)]
    api_host: Option<String>,

    /// Override the API base URL (defaults to https://<api-host>)
    #[arg(long, env = "SCOUT_BASE_URL", global = true, hide = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "SCOUT_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<String>,

    /// Directory CSV exports are written to
    #[arg(
        short,
        long,
        env = "SCOUT_OUTPUT_DIR",
        default_value = "output",
        global = true
    )]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default when no command is given)
    Interactive,

    /// Run a single search
    Search {
        #[command(flatten)]
        criteria: SearchArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run one of the predefined searches
    Preset {
        /// Preset identifier (see `scout presets`)
        id: Preset,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the predefined searches
    Presets,
}

#[derive(Args)]
struct SearchArgs {
    /// Search text, e.g. "python developer madrid"
    #[arg(short, long)]
    query: String,

    /// First page to fetch
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Number of pages to fetch (1-10)
    #[arg(short, long, default_value_t = 1)]
    num_pages: u32,

    /// ISO country code
    #[arg(short, long, default_value = "us")]
    country: String,

    /// Language code
    #[arg(short, long)]
    language: Option<String>,

    /// Posting age: all, today, 3days, week or month
    #[arg(short, long, default_value = "all")]
    date_posted: DatePosted,

    /// Remote jobs only
    #[arg(short, long, default_value_t = false)]
    remote: bool,

    /// Comma-separated employment types (FULLTIME, CONTRACTOR, PARTTIME, INTERN)
    #[arg(short, long, value_delimiter = ',')]
    employment_types: Vec<EmploymentType>,

    /// Comma-separated requirement codes, e.g. under_3_years_experience
    #[arg(long)]
    job_requirements: Option<String>,

    /// Search radius around the query location
    #[arg(long)]
    radius: Option<u32>,

    /// Comma-separated publishers to exclude
    #[arg(long, value_delimiter = ',')]
    exclude_publishers: Vec<String>,

    /// Comma-separated response fields to request
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,
}

impl SearchArgs {
    fn into_criteria(self) -> Result<SearchCriteria> {
        let mut criteria = SearchCriteria::new(self.query)?
            .with_page(self.page)
            .with_num_pages(self.num_pages)
            .with_country(self.country.to_lowercase())
            .with_date_posted(self.date_posted)
            .with_remote_only(self.remote)
            .with_employment_types(self.employment_types)
            .with_excluded_publishers(self.exclude_publishers)
            .with_fields(self.fields);

        if let Some(language) = self.language {
            criteria = criteria.with_language(language);
        }
        if let Some(requirements) = self.job_requirements {
            criteria = criteria.with_job_requirements(requirements);
        }
        if let Some(radius) = self.radius {
            criteria = criteria.with_radius(radius);
        }

        Ok(criteria)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Print the records as JSON instead of the summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Skip the CSV export
    #[arg(long, default_value_t = false)]
    no_export: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scout=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    let command = cli.command.take();

    match command {
        None | Some(Commands::Interactive) => {
            let service = connect(&cli)?;
            let opts = RunOptions {
                output_dir: cli.output_dir.clone(),
                export: true,
                json: false,
            };
            let mut prompts = Menu::new(io::stdin().lock(), io::stdout());
            menu::run(&mut prompts, &service, &opts)
                .await
                .context("Terminal I/O failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Search { criteria, output }) => {
            let criteria = criteria.into_criteria()?;
            let service = connect(&cli)?;
            cmd_search(&service, &criteria, run_options(&cli.output_dir, &output)).await
        }
        Some(Commands::Preset { id, output }) => {
            let service = connect(&cli)?;
            tracing::info!(preset = %id, "Running predefined search");
            cmd_search(&service, &id.criteria(), run_options(&cli.output_dir, &output)).await
        }
        Some(Commands::Presets) => {
            cmd_presets();
            Ok(ExitCode::SUCCESS)
        }
    }
}

impl Cli {
    /// Setting named by its environment variable. Clap already merged the
    /// flag with its env fallback.
    fn setting(&self, name: &str) -> Option<String> {
        match name {
            "RAPIDAPI_KEY" => self.api_key.clone(),
            "RAPIDAPI_HOST" => self.api_host.clone(),
            "SCOUT_BASE_URL" => self.base_url.clone(),
            "SCOUT_TIMEOUT_SECS" => self.timeout_secs.clone(),
            _ => None,
        }
    }
}

fn api_config(cli: &Cli) -> Result<ApiConfig> {
    let config = ApiConfig::from_lookup(|name| cli.setting(name))
        .context("Cannot search without a valid API configuration")?;
    tracing::debug!(?config, "API configuration");
    Ok(config)
}

/// Build the search service from the global flags.
fn connect(cli: &Cli) -> Result<SearchService<JSearchClient>> {
    let client = JSearchClient::new(api_config(cli)?).context("Failed to create HTTP client")?;
    Ok(SearchService::new(client))
}

fn run_options(output_dir: &std::path::Path, output: &OutputArgs) -> RunOptions {
    RunOptions {
        output_dir: output_dir.to_path_buf(),
        export: !output.no_export,
        json: output.json,
    }
}

async fn cmd_search(
    service: &SearchService<JSearchClient>,
    criteria: &SearchCriteria,
    opts: RunOptions,
) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let outcome = pipeline::run_search(service, criteria, &opts, &mut stdout)
        .await
        .context("Failed to write output")?;

    Ok(match outcome {
        Outcome::Failed(_) => ExitCode::FAILURE,
        Outcome::Empty => ExitCode::SUCCESS,
        Outcome::Found { count, exported } => {
            tracing::debug!(count, "Search finished");
            match exported {
                Some(Err(_)) => ExitCode::FAILURE,
                Some(Ok(_)) | None => ExitCode::SUCCESS,
            }
        }
    })
}

fn cmd_presets() {
    println!("Predefined searches:\n");
    for preset in Preset::ALL {
        let criteria = preset.criteria();
        println!(
            "  {:<34} {} (country: {}, posted: {})",
            preset.as_str(),
            preset.label(),
            criteria.country(),
            criteria.date_posted(),
        );
    }
}
