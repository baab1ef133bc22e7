//! Request and response payloads of the platform API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Provisioning state reported for an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CreateStatus {
    /// The platform is still provisioning the app.
    Creating,
    /// Provisioning finished.
    Complete,
    /// Any state this client does not know about.
    Other(String),
}

impl CreateStatus {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Creating => "creating",
            Self::Complete => "complete",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for CreateStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "creating" => Self::Creating,
            "complete" => Self::Complete,
            _ => Self::Other(s),
        }
    }
}

impl From<CreateStatus> for String {
    fn from(status: CreateStatus) -> Self {
        match status {
            CreateStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CreateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An app as returned by `GET /apps` and `GET /apps/<app>`.
///
/// Keys the client does not model are kept in [`App::extra`] so that raw
/// output can reproduce the full payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Unique app name.
    pub name: String,
    /// Email of the owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    /// Runtime stack identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Public URL of the app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    /// URL of the app's git repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    /// Provisioning state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_status: Option<CreateStatus>,
    /// Database size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_size: Option<u64>,
    /// Repository size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_size: Option<u64>,
    /// Compiled slug size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_size: Option<u64>,
    /// Number of database tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_tables: Option<u64>,
    /// Hours consumed per dyno type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dyno_hours: Option<BTreeMap<String, f64>>,
    /// Web dyno count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynos: Option<u32>,
    /// Worker count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u32>,
    /// Time the last cron run finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_finished_at: Option<String>,
    /// Time of the next scheduled cron run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_next_run: Option<String>,
    /// Every other key of the payload.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
    /// The response object as received, null values and number formats
    /// intact. Empty for apps not decoded with [`App::from_payload`].
    #[serde(skip)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl App {
    /// Creates an app payload holding only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Decodes an app from a response object and keeps the object in
    /// [`App::payload`].
    ///
    /// # Errors
    ///
    /// Returns an error if a modelled field has the wrong type.
    pub fn from_payload(
        payload: serde_json::Map<String, serde_json::Value>,
    ) -> serde_json::Result<Self> {
        let mut app: Self = serde_json::from_value(serde_json::Value::Object(payload.clone()))?;
        app.payload = payload;
        Ok(app)
    }

    /// Returns `true` while the platform is still provisioning the app.
    pub fn is_creating(&self) -> bool {
        matches!(self.create_status, Some(CreateStatus::Creating))
    }
}

/// An add-on attached to an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Human-readable add-on description.
    pub description: String,
    /// Add-on plan identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Result of attaching an add-on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonInstall {
    /// Installation status.
    #[serde(default)]
    pub status: Option<String>,
    /// Message from the add-on provider.
    #[serde(default)]
    pub message: Option<String>,
    /// Price description.
    #[serde(default)]
    pub price: Option<String>,
}

/// An account with access to an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Account email.
    pub email: String,
    /// Access level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

/// A custom domain routed to an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Fully-qualified domain name.
    pub domain: String,
    /// Registrable base domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_domain: Option<String>,
}

/// Body of `POST /apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAppRequest {
    /// App attributes.
    pub app: NewApp,
}

/// Attributes of an app to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewApp {
    /// Requested name; the platform picks one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Requested stack.
    pub stack: String,
}

impl CreateAppRequest {
    /// Builds a request, treating an empty name as "let the platform choose".
    pub fn new(name: Option<&str>, stack: impl Into<String>) -> Self {
        Self {
            app: NewApp {
                name: name.filter(|n| !n.is_empty()).map(ToString::to_string),
                stack: stack.into(),
            },
        }
    }
}

/// Body of `PUT /apps/<app>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateAppRequest {
    /// Attributes to change.
    pub app: AppChanges,
}

/// Attributes changed by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppChanges {
    /// New app name.
    pub name: String,
}

/// Config vars keyed by name. `None` unsets a variable.
pub type ConfigVars = BTreeMap<String, Option<String>>;
