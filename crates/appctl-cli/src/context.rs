//! Everything a command handler needs, passed in explicitly.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use appctl_api::PlatformApi;
use appctl_common::constants::DEFAULT_REMOTE;
use appctl_common::types::AppName;
use appctl_git::RemoteStore;

/// Opens URLs for the user.
pub trait Launcher {
    /// Opens `url` in the default browser.
    ///
    /// # Errors
    ///
    /// Returns an error if no browser could be launched.
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Launches the system's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Launcher for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        ::open::that(url)
    }
}

/// Per-invocation state shared by all commands.
pub struct Context<'a> {
    /// Platform API client.
    pub api: &'a dyn PlatformApi,
    /// Remotes of the checkout in the working directory.
    pub remotes: &'a dyn RemoteStore,
    /// Browser launcher.
    pub browser: &'a dyn Launcher,
    /// Email of the logged-in account.
    pub user: String,
    /// App named with `--app`, if any.
    pub app_flag: Option<AppName>,
    /// Destination for command output.
    pub out: &'a mut dyn Write,
    /// Source of interactive answers.
    pub input: &'a mut dyn BufRead,
}

impl Context<'_> {
    /// Resolves the app a command acts on.
    ///
    /// An explicit `--app` wins. Otherwise the app is inferred from the
    /// checkout's platform remotes: the `heroku` remote if present, else
    /// the single app all platform remotes point at.
    ///
    /// # Errors
    ///
    /// Returns an error if no single app can be determined or the remotes
    /// cannot be read.
    pub fn app(&self) -> anyhow::Result<AppName> {
        if let Some(app) = &self.app_flag {
            return Ok(app.clone());
        }
        let remotes = self.remotes.app_remotes()?.unwrap_or_default();
        if let Some(app) = remotes.get(DEFAULT_REMOTE) {
            tracing::debug!(%app, remote = DEFAULT_REMOTE, "inferred app from git remote");
            return Ok(app.clone());
        }
        let distinct: BTreeSet<&AppName> = remotes.values().collect();
        match distinct.into_iter().collect::<Vec<_>>().as_slice() {
            [app] => {
                tracing::debug!(%app, "inferred app from git remotes");
                Ok((*app).clone())
            }
            [] => anyhow::bail!(
                "No app specified.\nRun this command from an app folder or specify which app to use with --app APP."
            ),
            _ => anyhow::bail!(
                "Multiple apps in folder and no app specified.\nSpecify which app to use with --app APP."
            ),
        }
    }
}
