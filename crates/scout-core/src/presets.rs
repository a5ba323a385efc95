use std::fmt;
use std::str::FromStr;

use crate::criteria::{DatePosted, EmploymentType, SearchCriteria};

/// Predefined searches, identified independently of their display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    SoftwareEngineerSpain,
    DataScientistSpain,
    FrontendDeveloperSpain,
    BackendDeveloperUs,
    MachineLearningEngineerUs,
    FullStackDeveloperUs,
    DevopsEngineerUk,
    CloudArchitectUk,
    SeniorSoftwareEngineerRemote,
}

impl Preset {
    /// All presets in menu order.
    pub const ALL: [Preset; 9] = [
        Preset::SoftwareEngineerSpain,
        Preset::DataScientistSpain,
        Preset::FrontendDeveloperSpain,
        Preset::BackendDeveloperUs,
        Preset::MachineLearningEngineerUs,
        Preset::FullStackDeveloperUs,
        Preset::DevopsEngineerUk,
        Preset::CloudArchitectUk,
        Preset::SeniorSoftwareEngineerRemote,
    ];

    /// Stable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::SoftwareEngineerSpain => "software-engineer-es",
            Preset::DataScientistSpain => "data-scientist-es",
            Preset::FrontendDeveloperSpain => "frontend-developer-es",
            Preset::BackendDeveloperUs => "backend-developer-us",
            Preset::MachineLearningEngineerUs => "ml-engineer-us",
            Preset::FullStackDeveloperUs => "full-stack-developer-us",
            Preset::DevopsEngineerUk => "devops-engineer-gb",
            Preset::CloudArchitectUk => "cloud-architect-gb",
            Preset::SeniorSoftwareEngineerRemote => "senior-software-engineer-remote",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::SoftwareEngineerSpain => "Software Engineer - Spain",
            Preset::DataScientistSpain => "Data Scientist - Spain",
            Preset::FrontendDeveloperSpain => "Frontend Developer - Spain",
            Preset::BackendDeveloperUs => "Backend Developer - USA",
            Preset::MachineLearningEngineerUs => "Machine Learning Engineer - USA",
            Preset::FullStackDeveloperUs => "Full Stack Developer - USA",
            Preset::DevopsEngineerUk => "DevOps Engineer - United Kingdom",
            Preset::CloudArchitectUk => "Cloud Architect - United Kingdom",
            Preset::SeniorSoftwareEngineerRemote => "Senior Software Engineer - Remote (Global)",
        }
    }

    fn query(&self) -> &'static str {
        match self {
            Preset::SoftwareEngineerSpain => "software engineer",
            Preset::DataScientistSpain => "data scientist python machine learning",
            Preset::FrontendDeveloperSpain => "frontend developer react javascript",
            Preset::BackendDeveloperUs => "backend developer python java",
            Preset::MachineLearningEngineerUs => "machine learning engineer tensorflow pytorch",
            Preset::FullStackDeveloperUs => "full stack developer node react python",
            Preset::DevopsEngineerUk => "devops engineer kubernetes docker aws",
            Preset::CloudArchitectUk => "cloud architect aws azure gcp",
            Preset::SeniorSoftwareEngineerRemote => "senior software engineer remote",
        }
    }

    /// Search criteria for this preset; always a single page.
    pub fn criteria(&self) -> SearchCriteria {
        let base = SearchCriteria::from_static(self.query())
            .with_num_pages(1)
            .with_employment_types([EmploymentType::FullTime]);

        match self {
            Preset::SoftwareEngineerSpain
            | Preset::DataScientistSpain
            | Preset::FrontendDeveloperSpain => {
                base.with_country("es").with_date_posted(DatePosted::Week)
            }
            Preset::BackendDeveloperUs | Preset::FullStackDeveloperUs => {
                base.with_country("us").with_date_posted(DatePosted::Week)
            }
            Preset::MachineLearningEngineerUs => base
                .with_country("us")
                .with_date_posted(DatePosted::ThreeDays),
            Preset::DevopsEngineerUk | Preset::CloudArchitectUk => {
                base.with_country("gb").with_date_posted(DatePosted::Week)
            }
            Preset::SeniorSoftwareEngineerRemote => base
                .with_remote_only(true)
                .with_date_posted(DatePosted::Week),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == id)
            .ok_or_else(|| format!("Unknown preset: {}", s))
    }
}
