//! Page retrieval over HTTP basic auth.

use std::future::Future;

use url::Url;

use crate::config::Nt160eConfig;
use crate::error::{FetchError, Nt160eError};

/// Status page carrying the scraped fields.
pub const MAIN_PAGE: &str = "index.shtml";
/// Settings page carrying the temperature scale.
pub const SETTINGS_PAGE: &str = "settings.shtml";

/// Source of the thermostat's pages.
pub trait PageSource: Send + Sync {
    /// Body of `page`, relative to the thermostat's base URL.
    fn fetch(&self, page: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches pages from the thermostat with HTTP basic auth.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    base: Url,
    login: String,
    password: String,
}

impl HttpPageSource {
    /// # Errors
    ///
    /// Returns [`Nt160eError`] if the base URL does not parse or the client
    /// cannot be built.
    pub fn new(config: &Nt160eConfig) -> Result<Self, Nt160eError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().map_err(Nt160eError::Client)?,
            base: config.base_url()?,
            login: config.login.clone(),
            password: config.password.clone(),
        })
    }
}

impl PageSource for HttpPageSource {
    #[tracing::instrument(skip(self), fields(base = %self.base))]
    async fn fetch(&self, page: &str) -> Result<String, FetchError> {
        let url = self.base.join(page)?;
        let response = self
            .client
            .get(url)
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        tracing::trace!(bytes = body.len(), "page fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> HttpPageSource {
        HttpPageSource::new(&Nt160eConfig {
            url: server.uri(),
            login: "admin".to_string(),
            password: "secret".to_string(),
            request_timeout_secs: Some(5),
            ..Nt160eConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_fetch_page_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.shtml"))
            .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("var avgtemp = \"70\";"))
            .expect(1)
            .mount(&server)
            .await;

        let body = source(&server).fetch(MAIN_PAGE).await.unwrap();
        assert_eq!(body, "var avgtemp = \"70\";");
    }

    #[tokio::test]
    async fn should_fail_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/settings.shtml"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = source(&server).fetch(SETTINGS_PAGE).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }

    #[tokio::test]
    async fn should_fail_when_unreachable() {
        let source = HttpPageSource::new(&Nt160eConfig {
            url: "http://127.0.0.1:1/".to_string(),
            request_timeout_secs: Some(1),
            ..Nt160eConfig::default()
        })
        .unwrap();
        assert!(source.fetch(MAIN_PAGE).await.is_err());
    }
}
