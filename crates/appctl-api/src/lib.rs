//! # appctl-api
//!
//! Typed access to the platform API.
//!
//! - [`PlatformApi`]: the operations the CLI needs, one method per endpoint.
//! - [`PlatformClient`](client::PlatformClient): the blocking HTTP
//!   implementation used by the binary.
//!
//! Every method issues exactly one request. Non-success responses become an
//! [`ApiError`](error::ApiError); nothing is retried.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod error;
pub mod models;

pub use client::PlatformClient;
pub use error::ApiError;

use models::{Addon, AddonInstall, App, Collaborator, ConfigVars, CreateAppRequest, Domain};

/// Operations offered by the platform API.
pub trait PlatformApi {
    /// Lists every app the current account can access.
    fn list_apps(&self) -> Result<Vec<App>, ApiError>;

    /// Fetches a single app.
    fn get_app(&self, app: &str) -> Result<App, ApiError>;

    /// Creates an app.
    fn create_app(&self, request: &CreateAppRequest) -> Result<App, ApiError>;

    /// Returns `true` once the platform has finished provisioning `app`.
    fn create_complete(&self, app: &str) -> Result<bool, ApiError>;

    /// Renames `app` to `new_name`.
    fn rename_app(&self, app: &str, new_name: &str) -> Result<App, ApiError>;

    /// Permanently deletes `app` and its add-ons.
    fn delete_app(&self, app: &str) -> Result<(), ApiError>;

    /// Lists add-ons attached to `app`.
    fn list_addons(&self, app: &str) -> Result<Vec<Addon>, ApiError>;

    /// Attaches `addon` to `app`.
    fn attach_addon(&self, app: &str, addon: &str) -> Result<AddonInstall, ApiError>;

    /// Lists accounts with access to `app`, the owner included.
    fn list_collaborators(&self, app: &str) -> Result<Vec<Collaborator>, ApiError>;

    /// Lists custom domains of `app`.
    fn list_domains(&self, app: &str) -> Result<Vec<Domain>, ApiError>;

    /// Sets config vars on `app`, returning the resulting set.
    fn set_config_vars(&self, app: &str, vars: &ConfigVars) -> Result<ConfigVars, ApiError>;
}
