//! Blocking HTTP client for the platform API.
//!
//! Requests authenticate with HTTP basic auth: an empty user name and the
//! API key as password.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    Addon, AddonInstall, App, AppChanges, Collaborator, ConfigVars, CreateAppRequest, Domain,
    UpdateAppRequest,
};
use crate::PlatformApi;

/// HTTP client for the platform API.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    base_url: Url,
    api_key: String,
    client: Client,
}

impl PlatformClient {
    /// Creates a client for `base_url` authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .user_agent(concat!("appctl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(base_url, api_key, client))
    }

    /// Creates a client that sends requests through an existing
    /// [`reqwest::blocking::Client`].
    pub fn with_http_client(base_url: Url, api_key: impl Into<String>, client: Client) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            client,
        }
    }

    /// Joins `segments` onto the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        let _ = url
            .path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds an authenticated request.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.url(segments)?;
        tracing::debug!(%method, %url, "api request");
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
            .basic_auth("", Some(&self.api_key)))
    }

    /// Converts a response into `T`, mapping non-success statuses to errors.
    fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json()?)
        } else {
            Err(Self::status_error(status, response))
        }
    }

    /// Checks the status of a response whose body is not needed.
    fn handle_empty_response(response: Response) -> Result<StatusCode, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(Self::status_error(status, response))
        }
    }

    fn status_error(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().unwrap_or_default();
        tracing::debug!(%status, "api request failed");
        ApiError::from_status(status, &body)
    }
}

impl PlatformApi for PlatformClient {
    fn list_apps(&self) -> Result<Vec<App>, ApiError> {
        let response = self.request(Method::GET, &["apps"])?.send()?;
        Self::handle_response(response)
    }

    fn get_app(&self, app: &str) -> Result<App, ApiError> {
        let response = self.request(Method::GET, &["apps", app])?.send()?;
        let payload: serde_json::Map<String, serde_json::Value> = Self::handle_response(response)?;
        Ok(App::from_payload(payload)?)
    }

    fn create_app(&self, request: &CreateAppRequest) -> Result<App, ApiError> {
        tracing::info!(name = ?request.app.name, stack = %request.app.stack, "creating app");
        let response = self.request(Method::POST, &["apps"])?.json(request).send()?;
        Self::handle_response(response)
    }

    fn create_complete(&self, app: &str) -> Result<bool, ApiError> {
        let response = self
            .request(Method::PUT, &["apps", app, "status"])?
            .json(&serde_json::json!({}))
            .send()?;
        let status = Self::handle_empty_response(response)?;
        Ok(status == StatusCode::CREATED)
    }

    fn rename_app(&self, app: &str, new_name: &str) -> Result<App, ApiError> {
        tracing::info!(app, new_name, "renaming app");
        let body = UpdateAppRequest {
            app: AppChanges {
                name: new_name.to_string(),
            },
        };
        let response = self.request(Method::PUT, &["apps", app])?.json(&body).send()?;
        Self::handle_response(response)
    }

    fn delete_app(&self, app: &str) -> Result<(), ApiError> {
        tracing::info!(app, "deleting app");
        let response = self.request(Method::DELETE, &["apps", app])?.send()?;
        Self::handle_empty_response(response).map(|_| ())
    }

    fn list_addons(&self, app: &str) -> Result<Vec<Addon>, ApiError> {
        let response = self.request(Method::GET, &["apps", app, "addons"])?.send()?;
        Self::handle_response(response)
    }

    fn attach_addon(&self, app: &str, addon: &str) -> Result<AddonInstall, ApiError> {
        tracing::info!(app, addon, "attaching addon");
        let response = self
            .request(Method::POST, &["apps", app, "addons", addon])?
            .json(&serde_json::json!({}))
            .send()?;
        Self::handle_response(response)
    }

    fn list_collaborators(&self, app: &str) -> Result<Vec<Collaborator>, ApiError> {
        let response = self
            .request(Method::GET, &["apps", app, "collaborators"])?
            .send()?;
        Self::handle_response(response)
    }

    fn list_domains(&self, app: &str) -> Result<Vec<Domain>, ApiError> {
        let response = self.request(Method::GET, &["apps", app, "domains"])?.send()?;
        Self::handle_response(response)
    }

    fn set_config_vars(&self, app: &str, vars: &ConfigVars) -> Result<ConfigVars, ApiError> {
        tracing::info!(app, keys = ?vars.keys().collect::<Vec<_>>(), "updating config vars");
        let response = self
            .request(Method::PUT, &["apps", app, "config_vars"])?
            .json(vars)
            .send()?;
        Self::handle_response(response)
    }
}
