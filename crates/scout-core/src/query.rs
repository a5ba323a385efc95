use url::form_urlencoded;

use crate::criteria::SearchCriteria;

/// Ordered, string-keyed request parameters ready for URL encoding.
///
/// A key that is absent means "not specified"; optional settings are never
/// sent with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<(&'static str, String)>,
}

impl ParameterSet {
    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.params.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Form-URL-encode the parameters in insertion order.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Build the request parameters for one search.
///
/// `query`, `page`, `num_pages`, `country` and `date_posted` are always
/// present. Everything else is included only when set.
pub fn build_params(criteria: &SearchCriteria) -> ParameterSet {
    let mut params = ParameterSet::default();

    params.push("query", criteria.query());
    params.push("page", criteria.page().to_string());
    params.push("num_pages", criteria.num_pages().to_string());
    params.push("country", criteria.country());
    params.push("date_posted", criteria.date_posted().as_str());

    if let Some(language) = criteria.language() {
        params.push("language", language);
    }
    // The API reads an absent key as "unset", so `false` is never sent.
    if criteria.remote_only() {
        params.push("work_from_home", "true");
    }
    if !criteria.employment_types().is_empty() {
        let joined = criteria
            .employment_types()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        params.push("employment_types", joined);
    }
    if let Some(requirements) = criteria.job_requirements() {
        params.push("job_requirements", requirements);
    }
    if let Some(radius) = criteria.radius() {
        params.push("radius", radius.to_string());
    }
    if !criteria.exclude_publishers().is_empty() {
        params.push("exclude_job_publishers", criteria.exclude_publishers().join(","));
    }
    if !criteria.fields().is_empty() {
        params.push("fields", criteria.fields().join(","));
    }

    params
}

impl SearchCriteria {
    pub fn to_params(&self) -> ParameterSet {
        build_params(self)
    }
}
