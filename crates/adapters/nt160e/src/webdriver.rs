//! Settings form automation over the W3C WebDriver protocol.
//!
//! The thermostat only accepts changes through its JavaScript-driven form,
//! so a setting is applied by opening the page in a real browser, filling
//! the field by script and clicking submit. Each application uses a fresh
//! session that is always deleted afterwards.

use std::future::Future;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use crate::config::Nt160eConfig;
use crate::error::{ApplyError, Nt160eError};

/// Script clicking the form's submit button.
pub const SUBMIT_SCRIPT: &str = "document.getElementsByName('submit')[0].click();";

/// A value to write into a named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSetting {
    pub field: &'static str,
    pub value: String,
}

impl FormSetting {
    #[must_use]
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Script assigning the value to the first element named `field`.
    #[must_use]
    pub fn script(&self) -> String {
        format!(
            "document.getElementsByName('{}')[0].value = {};",
            self.field, self.value
        )
    }
}

/// Pushes a setting into the thermostat's form.
pub trait SettingApplier: Send + Sync {
    /// Open `device_url`, fill in `setting` and submit.
    fn apply(
        &self,
        device_url: &Url,
        setting: &FormSetting,
    ) -> impl Future<Output = Result<(), ApplyError>> + Send;
}

/// [`SettingApplier`] talking to a WebDriver server such as geckodriver.
#[derive(Debug, Clone)]
pub struct WebDriverApplier {
    client: reqwest::Client,
    endpoint: Url,
    browser: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

impl WebDriverApplier {
    /// # Errors
    ///
    /// Returns [`Nt160eError`] if the endpoint does not parse or the client
    /// cannot be built.
    pub fn new(config: &Nt160eConfig) -> Result<Self, Nt160eError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(Nt160eError::Client)?;
        Ok(Self {
            client,
            endpoint: config.webdriver_endpoint()?,
            browser: config.browser.clone(),
        })
    }

    async fn command<T: DeserializeOwned>(
        &self,
        name: &'static str,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApplyError> {
        let url = self.endpoint.join(path)?;
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let (error, message) = match serde_json::from_str::<Envelope<WireError>>(&text) {
                Ok(Envelope { value }) => (value.error, value.message),
                Err(_) => ("unknown error".to_string(), text),
            };
            return Err(ApplyError::Command {
                command: name,
                status: status.as_u16(),
                error,
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        Ok(envelope.value)
    }

    async fn new_session(&self) -> Result<String, ApplyError> {
        let body = json!({
            "capabilities": { "alwaysMatch": { "browserName": self.browser } }
        });
        let session: NewSession = self
            .command("new session", Method::POST, "session", Some(body))
            .await?;
        Ok(session.session_id)
    }

    async fn fill_and_submit(
        &self,
        session: &str,
        device_url: &Url,
        setting: &FormSetting,
    ) -> Result<(), ApplyError> {
        let _: Value = self
            .command(
                "navigate",
                Method::POST,
                &format!("session/{session}/url"),
                Some(json!({ "url": device_url.as_str() })),
            )
            .await?;
        for script in [setting.script(), SUBMIT_SCRIPT.to_string()] {
            let _: Value = self
                .command(
                    "execute script",
                    Method::POST,
                    &format!("session/{session}/execute/sync"),
                    Some(json!({ "script": script, "args": [] })),
                )
                .await?;
        }
        Ok(())
    }

    async fn delete_session(&self, session: &str) -> Result<(), ApplyError> {
        let _: Value = self
            .command(
                "delete session",
                Method::DELETE,
                &format!("session/{session}"),
                None,
            )
            .await?;
        Ok(())
    }
}

impl SettingApplier for WebDriverApplier {
    #[tracing::instrument(skip(self, device_url), fields(field = setting.field))]
    async fn apply(&self, device_url: &Url, setting: &FormSetting) -> Result<(), ApplyError> {
        let session = self.new_session().await?;
        let result = self.fill_and_submit(&session, device_url, setting).await;
        if let Err(err) = self.delete_session(&session).await {
            tracing::warn!(%session, error = %err, "failed to close browser session");
        }
        if result.is_ok() {
            tracing::info!(value = %setting.value, "setting submitted");
        }
        result
    }
}
