use std::time::Duration;

use scout_core::AppError;

/// Host used when `RAPIDAPI_HOST` is not set.
pub const DEFAULT_API_HOST: &str = "jsearch.p.rapidapi.com";

/// Values shipped in sample `.env` files that are never real keys.
const PLACEHOLDER_KEYS: &[&str] = &["TU_API_KEY_AQUI", "your_api_key_here"];

/// Connection settings for the JSearch API.
#[derive(Clone)]
pub struct ApiConfig {
    api_key: String,
    api_host: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ApiConfig {
    /// Create a config for `api_key`, validating that it looks like a real key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(AppError::ConfigError(
                "RAPIDAPI_KEY not set. Required to query the JSearch API.".into(),
            ));
        }
        if PLACEHOLDER_KEYS.contains(&api_key.as_str()) {
            return Err(AppError::ConfigError(
                "RAPIDAPI_KEY still holds the sample placeholder. Replace it with your RapidAPI key."
                    .into(),
            ));
        }

        Ok(Self {
            api_key,
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: None,
            timeout: None,
        })
    }

    /// Override the API host. A blank host keeps the default.
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into().trim().to_string();
        if !host.is_empty() {
            self.api_host = host;
        }
        self
    }

    /// Send requests to `base_url` instead of `https://{api_host}`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read configuration through `lookup`, keyed by environment variable
    /// name:
    ///
    /// - `RAPIDAPI_KEY` (required)
    /// - `RAPIDAPI_HOST` (optional, defaults to `jsearch.p.rapidapi.com`)
    /// - `SCOUT_BASE_URL` (optional)
    /// - `SCOUT_TIMEOUT_SECS` (optional, no timeout when unset)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::new(lookup("RAPIDAPI_KEY").unwrap_or_default())?;

        if let Some(host) = lookup("RAPIDAPI_HOST") {
            config = config.with_api_host(host);
        }
        if let Some(base_url) = lookup("SCOUT_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(raw) = lookup("SCOUT_TIMEOUT_SECS") {
            config = config.with_timeout(parse_timeout(&raw)?);
        }

        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}", self.api_host),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        AppError::ConfigError(format!(
            "Invalid SCOUT_TIMEOUT_SECS '{raw}': must be a positive integer"
        ))
    })?;
    if secs == 0 {
        return Err(AppError::ConfigError(
            "SCOUT_TIMEOUT_SECS must be at least 1".into(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_key_required() {
        let err = ApiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(ApiConfig::new("   ").is_err());
    }

    #[test]
    fn test_placeholder_key_rejected() {
        assert!(ApiConfig::new("TU_API_KEY_AQUI").is_err());
        assert!(ApiConfig::new("your_api_key_here").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[("RAPIDAPI_KEY", "k-123")])).unwrap();
        assert_eq!(config.api_key(), "k-123");
        assert_eq!(config.api_host(), DEFAULT_API_HOST);
        assert_eq!(config.base_url(), "https://jsearch.p.rapidapi.com");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("RAPIDAPI_KEY", "k"),
            ("RAPIDAPI_HOST", "jsearch.example.net"),
            ("SCOUT_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_host(), "jsearch.example.net");
        assert_eq!(config.base_url(), "https://jsearch.example.net");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));

        let config = ApiConfig::new("k")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.api_host(), DEFAULT_API_HOST);
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["abc", "0", "-5"] {
            let err = ApiConfig::from_lookup(lookup(&[
                ("RAPIDAPI_KEY", "k"),
                ("SCOUT_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "{raw}");
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ApiConfig::new("super-secret").unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
