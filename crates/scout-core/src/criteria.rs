use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Upper bound on the number of pages a single search may request.
pub const MAX_NUM_PAGES: u32 = 10;

/// Country used when none is given.
pub const DEFAULT_COUNTRY: &str = "us";

/// Posting-age filter accepted by the search API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePosted {
    #[default]
    All,
    Today,
    ThreeDays,
    Week,
    Month,
}

impl DatePosted {
    pub const ALL: [DatePosted; 5] = [
        DatePosted::All,
        DatePosted::Today,
        DatePosted::ThreeDays,
        DatePosted::Week,
        DatePosted::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePosted::All => "all",
            DatePosted::Today => "today",
            DatePosted::ThreeDays => "3days",
            DatePosted::Week => "week",
            DatePosted::Month => "month",
        }
    }
}

impl fmt::Display for DatePosted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatePosted {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DatePosted::All),
            "today" => Ok(DatePosted::Today),
            "3days" | "three_days" | "three-days" => Ok(DatePosted::ThreeDays),
            "week" => Ok(DatePosted::Week),
            "month" => Ok(DatePosted::Month),
            _ => Err(format!("Unknown date-posted filter: {}", s)),
        }
    }
}

/// Employment type filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentType {
    FullTime,
    Contractor,
    PartTime,
    Intern,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "FULLTIME",
            EmploymentType::Contractor => "CONTRACTOR",
            EmploymentType::PartTime => "PARTTIME",
            EmploymentType::Intern => "INTERN",
        }
    }

    /// Parse a comma-separated list such as `"FULLTIME,INTERN"`.
    ///
    /// Blank entries are ignored; the first unknown entry is an error.
    pub fn parse_list(s: &str) -> Result<Vec<EmploymentType>, String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "FULLTIME" => Ok(EmploymentType::FullTime),
            "CONTRACTOR" => Ok(EmploymentType::Contractor),
            "PARTTIME" => Ok(EmploymentType::PartTime),
            "INTERN" => Ok(EmploymentType::Intern),
            _ => Err(format!("Unknown employment type: {}", s)),
        }
    }
}

/// Criteria for one search request.
///
/// Constructed per search and consumed when the request parameters are built.
/// The query is guaranteed non-empty, the page is at least 1, and the page
/// count always lies in `1..=MAX_NUM_PAGES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    query: String,
    page: u32,
    num_pages: u32,
    country: String,
    language: Option<String>,
    date_posted: DatePosted,
    remote_only: bool,
    employment_types: Vec<EmploymentType>,
    job_requirements: Option<String>,
    radius: Option<u32>,
    exclude_publishers: Vec<String>,
    fields: Vec<String>,
}

impl SearchCriteria {
    /// Create criteria for `query` with every other setting at its default.
    pub fn new(query: impl Into<String>) -> Result<Self, AppError> {
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(AppError::InvalidCriteria(
                "search query must not be empty".into(),
            ));
        }

        Ok(Self::with_defaults(query))
    }

    /// Criteria for a query known to be non-empty.
    pub(crate) fn from_static(query: &'static str) -> Self {
        debug_assert!(!query.trim().is_empty());
        Self::with_defaults(query.to_string())
    }

    fn with_defaults(query: String) -> Self {
        Self {
            query,
            page: 1,
            num_pages: 1,
            country: DEFAULT_COUNTRY.to_string(),
            language: None,
            date_posted: DatePosted::All,
            remote_only: false,
            employment_types: Vec::new(),
            job_requirements: None,
            radius: None,
            exclude_publishers: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page count, clamped into `1..=MAX_NUM_PAGES`.
    pub fn with_num_pages(mut self, num_pages: u32) -> Self {
        self.num_pages = num_pages.clamp(1, MAX_NUM_PAGES);
        self
    }

    /// Set the country code. A blank code keeps the current one.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        if let Some(country) = non_blank(country.into()) {
            self.country = country;
        }
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = non_blank(language.into());
        self
    }

    pub fn with_date_posted(mut self, date_posted: DatePosted) -> Self {
        self.date_posted = date_posted;
        self
    }

    pub fn with_remote_only(mut self, remote_only: bool) -> Self {
        self.remote_only = remote_only;
        self
    }

    pub fn with_employment_types(mut self, types: impl IntoIterator<Item = EmploymentType>) -> Self {
        self.employment_types.clear();
        for ty in types {
            if !self.employment_types.contains(&ty) {
                self.employment_types.push(ty);
            }
        }
        self
    }

    pub fn with_job_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.job_requirements = non_blank(requirements.into());
        self
    }

    /// Set the search radius. Zero means "not specified".
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = (radius > 0).then_some(radius);
        self
    }

    pub fn with_excluded_publishers<I, S>(mut self, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_publishers = collect_non_blank(publishers);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = collect_non_blank(fields);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn date_posted(&self) -> DatePosted {
        self.date_posted
    }

    pub fn remote_only(&self) -> bool {
        self.remote_only
    }

    pub fn employment_types(&self) -> &[EmploymentType] {
        &self.employment_types
    }

    pub fn job_requirements(&self) -> Option<&str> {
        self.job_requirements.as_deref()
    }

    pub fn radius(&self) -> Option<u32> {
        self.radius
    }

    pub fn exclude_publishers(&self) -> &[String] {
        &self.exclude_publishers
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn collect_non_blank<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .filter_map(|v| non_blank(v.into()))
        .collect()
}
