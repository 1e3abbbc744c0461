//! NT160e adapter error types.

use sensorkit_domain::error::DriverError;

/// Errors specific to the NT160e adapter.
#[derive(Debug, thiserror::Error)]
pub enum Nt160eError {
    /// A configured URL could not be parsed.
    #[error("invalid URL {url:?}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL has no host to attach credentials to.
    #[error("URL {0} cannot carry credentials")]
    NoCredentials(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// A field pattern failed to compile.
    #[error("invalid field pattern")]
    Pattern(#[from] regex::Error),

    /// One of the status pages could not be retrieved.
    #[error("failed to fetch thermostat page")]
    Fetch(#[from] FetchError),

    /// A status page was retrieved but a field could not be read.
    #[error("failed to parse thermostat page")]
    Parse(#[from] ParseError),

    /// The settings form could not be driven.
    #[error("failed to apply thermostat setting")]
    Apply(#[from] ApplyError),
}

impl Nt160eError {
    /// Convert into a [`DriverError::Device`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> DriverError {
        DriverError::Device(Box::new(self))
    }
}

impl From<Nt160eError> for DriverError {
    fn from(err: Nt160eError) -> Self {
        err.into_domain()
    }
}

/// Why a page could not be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid page URL")]
    Url(#[from] url::ParseError),

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),
}

/// Why a field could not be read from a page.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The marker matched but the line has too few quoted tokens.
    #[error("{field}: no token at position {index}")]
    MissingToken {
        /// Field (or `temperature_scale`) being read.
        field: &'static str,
        /// Zero-based position after splitting on `"`.
        index: usize,
    },

    /// The token is not a number once its unit suffix is removed.
    #[error("{field}: {raw:?} is not a number")]
    InvalidNumber {
        field: &'static str,
        /// The token as found on the page.
        raw: String,
    },
}

/// Why a setting could not be applied through the browser.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("invalid WebDriver URL")]
    Url(#[from] url::ParseError),

    #[error("WebDriver request failed")]
    Http(#[from] reqwest::Error),

    #[error("malformed WebDriver response")]
    Decode(#[from] serde_json::Error),

    /// The WebDriver server answered with an error payload.
    #[error("WebDriver {command} failed with status {status}: {error}")]
    Command {
        command: &'static str,
        status: u16,
        /// W3C error code, such as `javascript error`.
        error: String,
        message: String,
    },
}
