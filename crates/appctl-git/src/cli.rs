//! [`RemoteStore`] backed by the `git` executable.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use appctl_common::error::{AppctlError, Result};
use appctl_common::types::AppName;

use crate::url::app_from_url;
use crate::RemoteStore;

/// Reads and edits the remotes of the checkout at `dir` by running `git`.
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
    host: String,
}

impl GitCli {
    /// Creates a store for the checkout rooted at `dir`, recognising remotes
    /// served by `host`.
    pub fn new(dir: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            host: host.into(),
        }
    }

    /// Runs `git` with `args` in the checkout and returns its stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let git = which::which("git").map_err(|_| AppctlError::NotFound {
            kind: "executable",
            id: "git (install git to manage remotes)".into(),
        })?;
        tracing::debug!(dir = %self.dir.display(), ?args, "running git");

        let output = Command::new(&git)
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|source| AppctlError::Io { path: git, source })?;

        if !output.status.success() {
            return Err(AppctlError::Git {
                args: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RemoteStore for GitCli {
    fn is_checkout(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out.trim() == "true")
    }

    fn app_remotes(&self) -> Result<Option<BTreeMap<String, AppName>>> {
        if !self.is_checkout() {
            return Ok(None);
        }
        let listing = self.run(&["remote", "-v"])?;
        Ok(Some(parse_remote_listing(&listing, &self.host)))
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        if !self.is_checkout() {
            return Ok(Vec::new());
        }
        let listing = self.run(&["remote"])?;
        Ok(listing.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        tracing::info!(name, url, "adding git remote");
        self.run(&["remote", "add", name, url]).map(|_| ())
    }

    fn remove_remote(&self, name: &str) -> Result<()> {
        tracing::info!(name, "removing git remote");
        self.run(&["remote", "rm", name]).map(|_| ())
    }
}

/// Maps each remote in `git remote -v` output to the app its URL names,
/// skipping remotes that do not point at `host`.
pub fn parse_remote_listing(listing: &str, host: &str) -> BTreeMap<String, AppName> {
    listing
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            let url = fields.next()?;
            app_from_url(url, host).map(|app| (name.to_string(), app))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_remote_listing_keeps_platform_remotes() {
        let listing = "\
heroku\tgit@heroku.com:myapp.git (fetch)
heroku\tgit@heroku.com:myapp.git (push)
origin\tgit@github.com:me/myapp.git (fetch)
origin\tgit@github.com:me/myapp.git (push)
staging\thttps://git.heroku.com/myapp-staging.git (fetch)
";
        let remotes = parse_remote_listing(listing, "heroku.com");
        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes["heroku"], AppName::new("myapp"));
        assert_eq!(remotes["staging"], AppName::new("myapp-staging"));
    }

    #[test]
    fn parse_remote_listing_tolerates_blank_output() {
        assert!(parse_remote_listing("", "heroku.com").is_empty());
        assert!(parse_remote_listing("\n\n", "heroku.com").is_empty());
    }

    #[test]
    fn outside_checkout_has_no_remotes() {
        let dir = tempfile::tempdir().unwrap();
        let store = GitCli::new(dir.path(), "heroku.com");
        assert!(!store.is_checkout());
        assert_eq!(store.app_remotes().unwrap(), None);
        assert!(store.remote_names().unwrap().is_empty());
    }
}
