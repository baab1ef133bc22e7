//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used in CLI output and state directories.
pub const APP_NAME: &str = "appctl";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "appctl";

/// Base URL of the platform API.
pub const DEFAULT_API_URL: &str = "https://api.heroku.com";

/// Host serving app git repositories.
pub const DEFAULT_GIT_HOST: &str = "heroku.com";

/// Name of the git remote created for new apps.
pub const DEFAULT_REMOTE: &str = "heroku";

/// Stack requested when `apps:create` is not given one.
pub const DEFAULT_STACK: &str = "aspen-mri-1.8.6";

/// Stack on which dyno and worker counts are not meaningful.
pub const CEDAR_STACK: &str = "cedar";

/// Seconds `apps:create` waits for the platform to finish provisioning.
pub const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 30;

/// Config var holding a custom buildpack.
pub const BUILDPACK_CONFIG_VAR: &str = "BUILDPACK_URL";

/// File name of the user configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "APPCTL_API_URL";
/// Environment variable overriding the git host.
pub const ENV_GIT_HOST: &str = "APPCTL_GIT_HOST";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "APPCTL_API_KEY";
/// Environment variable holding the account email.
pub const ENV_USER: &str = "APPCTL_USER";

/// Returns `$HOME/.appctl`, falling back to a relative `.appctl` when no
/// home directory is set.
fn resolve_data_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(
            |_| PathBuf::from(format!(".{APP_NAME}")),
            |home| PathBuf::from(home).join(format!(".{APP_NAME}")),
        )
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Returns the default configuration file path.
pub fn default_config_file() -> PathBuf {
    data_dir().join(CONFIG_FILE_NAME)
}
