use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// The canonical job fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobField {
    JobId,
    EmployerName,
    EmployerLogo,
    Publisher,
    EmploymentType,
    Title,
    ApplyLink,
    Description,
    IsRemote,
    PostedAtTimestamp,
    PostedAtDatetime,
    City,
    State,
    Country,
    Latitude,
    Longitude,
    Benefits,
    GoogleLink,
    OfferExpirationDatetime,
    OfferExpirationTimestamp,
    RequiredExperience,
    RequiredSkills,
    RequiredEducation,
    ExperienceInPlaceOfEducation,
    MinSalary,
    MaxSalary,
    SalaryCurrency,
    SalaryPeriod,
    Highlights,
    JobTitle,
}

impl JobField {
    pub const ALL: [JobField; 30] = [
        JobField::JobId,
        JobField::EmployerName,
        JobField::EmployerLogo,
        JobField::Publisher,
        JobField::EmploymentType,
        JobField::Title,
        JobField::ApplyLink,
        JobField::Description,
        JobField::IsRemote,
        JobField::PostedAtTimestamp,
        JobField::PostedAtDatetime,
        JobField::City,
        JobField::State,
        JobField::Country,
        JobField::Latitude,
        JobField::Longitude,
        JobField::Benefits,
        JobField::GoogleLink,
        JobField::OfferExpirationDatetime,
        JobField::OfferExpirationTimestamp,
        JobField::RequiredExperience,
        JobField::RequiredSkills,
        JobField::RequiredEducation,
        JobField::ExperienceInPlaceOfEducation,
        JobField::MinSalary,
        JobField::MaxSalary,
        JobField::SalaryCurrency,
        JobField::SalaryPeriod,
        JobField::Highlights,
        JobField::JobTitle,
    ];

    /// Canonical key, used for export headers and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            JobField::JobId => "job_id",
            JobField::EmployerName => "employer_name",
            JobField::EmployerLogo => "employer_logo",
            JobField::Publisher => "job_publisher",
            JobField::EmploymentType => "job_employment_type",
            JobField::Title => "job_title",
            JobField::ApplyLink => "job_apply_link",
            JobField::Description => "job_description",
            JobField::IsRemote => "job_is_remote",
            JobField::PostedAtTimestamp => "job_posted_at_timestamp",
            JobField::PostedAtDatetime => "job_posted_at_datetime",
            JobField::City => "job_city",
            JobField::State => "job_state",
            JobField::Country => "job_country",
            JobField::Latitude => "job_latitude",
            JobField::Longitude => "job_longitude",
            JobField::Benefits => "job_benefits",
            JobField::GoogleLink => "job_google_link",
            JobField::OfferExpirationDatetime => "job_offer_expiration_datetime",
            JobField::OfferExpirationTimestamp => "job_offer_expiration_timestamp",
            JobField::RequiredExperience => "job_required_experience",
            JobField::RequiredSkills => "job_required_skills",
            JobField::RequiredEducation => "job_required_education",
            JobField::ExperienceInPlaceOfEducation => "job_experience_in_place_of_education",
            JobField::MinSalary => "job_min_salary",
            JobField::MaxSalary => "job_max_salary",
            JobField::SalaryCurrency => "job_salary_currency",
            JobField::SalaryPeriod => "job_salary_period",
            JobField::Highlights => "job_highlights",
            JobField::JobTitle => "job_job_title",
        }
    }

    /// Key the value is read from in the upstream payload.
    pub fn source_key(&self) -> &'static str {
        match self {
            JobField::PostedAtDatetime => "job_posted_at_datetime_utc",
            JobField::OfferExpirationDatetime => "job_offer_expiration_datetime_utc",
            other => other.name(),
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One job posting in canonical shape.
///
/// Values are passed through from the upstream payload without coercion.
/// A field that was absent or `null` upstream is missing: [`get`](Self::get)
/// returns `None` for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRecord {
    values: BTreeMap<JobField, Value>,
}

impl JobRecord {
    /// Build a record from one upstream job object.
    ///
    /// Keys outside the canonical set are ignored.
    pub fn from_source(source: &Map<String, Value>) -> Self {
        let values = JobField::ALL
            .iter()
            .filter_map(|field| match source.get(field.source_key()) {
                None | Some(Value::Null) => None,
                Some(value) => Some((*field, value.clone())),
            })
            .collect();
        Self { values }
    }

    /// Build a record from `(field, value)` pairs. `null` values stay missing.
    pub fn from_fields(fields: impl IntoIterator<Item = (JobField, Value)>) -> Self {
        let values = fields
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect();
        Self { values }
    }

    pub fn get(&self, field: JobField) -> Option<&Value> {
        self.values.get(&field)
    }

    pub fn is_present(&self, field: JobField) -> bool {
        self.values.contains_key(&field)
    }

    /// The value as a string, if present and a JSON string.
    pub fn text(&self, field: JobField) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// The value as a number, if present and a JSON number.
    pub fn number(&self, field: JobField) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// The value as a boolean, if present and a JSON boolean.
    pub fn flag(&self, field: JobField) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// The value as a list, if present and a JSON array.
    pub fn list(&self, field: JobField) -> Option<&[Value]> {
        self.get(field).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Number of fields present.
    pub fn present_count(&self) -> usize {
        self.values.len()
    }
}

impl Serialize for JobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(JobField::ALL.len()))?;
        for field in JobField::ALL {
            map.serialize_entry(field.name(), &self.get(field))?;
        }
        map.end()
    }
}

/// Render a present value for display: strings raw, everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
