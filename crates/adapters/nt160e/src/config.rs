//! NT160e driver configuration.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::Nt160eError;

/// Configuration for one NT160e thermostat.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Nt160eConfig {
    /// Base URL of the thermostat's web interface, e.g. `http://10.0.0.8/`.
    pub url: String,
    pub login: String,
    pub password: String,
    /// Identifier used in log lines (`/<key>/<field>`).
    pub key: String,
    /// Seconds between two scrapes.
    pub poll_interval_secs: u64,
    /// Per-request timeout for page fetches. No timeout when unset.
    pub request_timeout_secs: Option<u64>,
    /// IANA timezone attached to every stream.
    pub timezone: String,
    /// `Metadata/Location/Area` on the driver root.
    pub area: String,
    /// `Metadata/Location/Country` on the driver root.
    pub country: String,
    /// WebDriver server used to submit settings.
    pub webdriver_url: String,
    pub browser: String,
}

impl Default for Nt160eConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            login: String::new(),
            password: String::new(),
            key: "nt160e".to_string(),
            poll_interval_secs: 60,
            request_timeout_secs: None,
            timezone: "America/Los_Angeles".to_string(),
            area: "California".to_string(),
            country: "USA".to_string(),
            webdriver_url: "http://localhost:4444".to_string(),
            browser: "firefox".to_string(),
        }
    }
}

impl Nt160eConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// The configured URL, with a trailing `/` so page names join under it.
    ///
    /// # Errors
    ///
    /// Returns [`Nt160eError::InvalidUrl`] if `url` does not parse.
    pub fn base_url(&self) -> Result<Url, Nt160eError> {
        directory_url(&self.url)
    }

    /// `https://<login>:<password>@<host>/…`, the address the browser opens.
    ///
    /// # Errors
    ///
    /// Returns [`Nt160eError::InvalidUrl`] if `url` does not parse, or
    /// [`Nt160eError::NoCredentials`] if it has no host.
    pub fn auth_url(&self) -> Result<Url, Nt160eError> {
        let mut url = self.base_url()?;
        let no_credentials = || Nt160eError::NoCredentials(self.url.clone());
        url.set_scheme("https").map_err(|()| no_credentials())?;
        url.set_username(&self.login)
            .map_err(|()| no_credentials())?;
        url.set_password(Some(&self.password))
            .map_err(|()| no_credentials())?;
        Ok(url)
    }

    /// # Errors
    ///
    /// Returns [`Nt160eError::InvalidUrl`] if `webdriver_url` does not parse.
    pub fn webdriver_endpoint(&self) -> Result<Url, Nt160eError> {
        directory_url(&self.webdriver_url)
    }
}

fn directory_url(raw: &str) -> Result<Url, Nt160eError> {
    let mut url = Url::parse(raw).map_err(|source| Nt160eError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
