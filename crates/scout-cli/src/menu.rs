use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use scout_core::criteria::{DEFAULT_COUNTRY, MAX_NUM_PAGES};
use scout_core::{DatePosted, EmploymentType, JobSearchClient, Preset, SearchCriteria, SearchService};

use crate::pipeline::{self, RunOptions};

/// A parsed main-menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Custom,
    Preset(Preset),
    Invalid(String),
}

/// Map a menu entry to a choice: `0` exits, `1` is a custom search and
/// `2..` select presets in menu order.
pub fn parse_choice(input: &str) -> MenuChoice {
    let input = input.trim();
    match input.parse::<usize>() {
        Ok(0) => MenuChoice::Exit,
        Ok(1) => MenuChoice::Custom,
        Ok(n) if n >= 2 && n - 2 < Preset::ALL.len() => MenuChoice::Preset(Preset::ALL[n - 2]),
        _ => MenuChoice::Invalid(input.to_string()),
    }
}

/// Line-oriented prompts over any reader and writer.
///
/// Every read returns `None` once the input is exhausted.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn show_menu(&mut self) -> io::Result<()> {
        let rule = "=".repeat(60);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "JOB SEARCH - JSearch API")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "\n1. Custom search")?;
        writeln!(self.output, "\nPredefined searches:")?;
        for (i, preset) in Preset::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 2, preset.label())?;
        }
        writeln!(self.output, "\n0. Exit")?;
        writeln!(self.output, "{rule}")
    }

    pub fn read_choice(&mut self) -> io::Result<Option<MenuChoice>> {
        Ok(self
            .prompt("\nSelect an option: ")?
            .map(|line| parse_choice(&line)))
    }

    /// Ask for the custom-search fields.
    ///
    /// Returns `None` when the query is left empty or input ends.
    pub fn read_custom_criteria(&mut self) -> io::Result<Option<SearchCriteria>> {
        writeln!(self.output, "\n--- CUSTOM SEARCH ---")?;

        let Some(query) = self.prompt("\nWhat are you looking for? (e.g. 'python developer madrid'): ")?
        else {
            return Ok(None);
        };
        let Ok(criteria) = SearchCriteria::new(query) else {
            writeln!(self.output, "Search query cannot be empty")?;
            return Ok(None);
        };

        let Some(country) = self.prompt(&format!(
            "Country code (e.g. es, us, gb, default={DEFAULT_COUNTRY}): "
        ))?
        else {
            return Ok(None);
        };

        writeln!(self.output, "\nDate posted:")?;
        writeln!(self.output, "1. All")?;
        writeln!(self.output, "2. Today")?;
        writeln!(self.output, "3. Last 3 days")?;
        writeln!(self.output, "4. Last week")?;
        writeln!(self.output, "5. Last month")?;
        let Some(period) = self.prompt("Select (1-5): ")? else {
            return Ok(None);
        };

        let Some(remote) = self.prompt("\nRemote jobs only? (y/n): ")? else {
            return Ok(None);
        };

        writeln!(
            self.output,
            "\nEmployment type (comma-separated, empty for all):"
        )?;
        writeln!(self.output, "Options: FULLTIME, CONTRACTOR, PARTTIME, INTERN")?;
        let Some(types) = self.prompt("Type: ")? else {
            return Ok(None);
        };
        let (types, rejected) = parse_employment_types(&types);
        for token in rejected {
            writeln!(self.output, "Ignoring unknown employment type: {token}")?;
        }

        let Some(pages) = self.prompt(&format!(
            "\nNumber of pages (1-{MAX_NUM_PAGES}, default=1): "
        ))?
        else {
            return Ok(None);
        };

        Ok(Some(
            criteria
                .with_country(country.to_lowercase())
                .with_date_posted(parse_period(&period))
                .with_remote_only(parse_yes(&remote))
                .with_employment_types(types)
                .with_num_pages(parse_pages(&pages)),
        ))
    }

    /// Wait for ENTER. Returns `false` once input ends.
    pub fn pause(&mut self) -> io::Result<bool> {
        Ok(self.prompt("\nPress ENTER to continue...")?.is_some())
    }
}

/// Run the menu loop until the user exits or input ends.
pub async fn run<C, R, W>(
    menu: &mut Menu<R, W>,
    service: &SearchService<C>,
    opts: &RunOptions,
) -> io::Result<()>
where
    C: JobSearchClient,
    R: BufRead,
    W: Write,
{
    loop {
        menu.show_menu()?;
        let Some(choice) = menu.read_choice()? else {
            break;
        };

        let criteria = match choice {
            MenuChoice::Exit => break,
            MenuChoice::Custom => menu.read_custom_criteria()?,
            MenuChoice::Preset(preset) => {
                writeln!(menu.output(), "\nRunning: {}", preset.label())?;
                Some(preset.criteria())
            }
            MenuChoice::Invalid(input) => {
                writeln!(
                    menu.output(),
                    "Invalid option: '{input}'. Choose between 0 and {}",
                    Preset::ALL.len() + 1
                )?;
                None
            }
        };

        if let Some(criteria) = criteria {
            writeln!(menu.output(), "\nSearching jobs: '{}'...", criteria.query())?;
            pipeline::run_search(service, &criteria, opts, menu.output()).await?;
        }

        if !menu.pause()? {
            break;
        }
    }

    writeln!(menu.output(), "\nGoodbye!")
}

fn parse_period(input: &str) -> DatePosted {
    match input.trim() {
        "2" => DatePosted::Today,
        "3" => DatePosted::ThreeDays,
        "4" => DatePosted::Week,
        "5" => DatePosted::Month,
        _ => DatePosted::All,
    }
}

fn parse_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Non-numeric input means one page; numbers are clamped later.
fn parse_pages(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 1,
    }
}

/// Split employment types into recognized values and rejected tokens.
fn parse_employment_types(input: &str) -> (Vec<EmploymentType>, Vec<String>) {
    let mut types = Vec::new();
    let mut rejected = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<EmploymentType>() {
            Ok(ty) => types.push(ty),
            Err(_) => rejected.push(token.to_string()),
        }
    }
    (types, rejected)
}
