//! # appctl-git
//!
//! Keeps local git checkouts pointed at the right platform app.
//!
//! The CLI only needs a handful of remote operations, expressed by
//! [`RemoteStore`]. [`GitCli`](cli::GitCli) implements them by running the
//! `git` executable; nothing here reimplements git.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cli;
pub mod url;

use std::collections::BTreeMap;

use appctl_common::error::Result;
use appctl_common::types::AppName;

pub use cli::GitCli;

/// Remote configuration of a local checkout.
pub trait RemoteStore {
    /// Returns `true` when the working directory is inside a git checkout.
    fn is_checkout(&self) -> bool;

    /// Maps remote names to the platform app their URL points at.
    ///
    /// Returns `None` outside a git checkout. Remotes pointing elsewhere are
    /// left out.
    fn app_remotes(&self) -> Result<Option<BTreeMap<String, AppName>>>;

    /// Lists the names of every configured remote.
    fn remote_names(&self) -> Result<Vec<String>>;

    /// Adds remote `name` pointing at `url`.
    fn add_remote(&self, name: &str, url: &str) -> Result<()>;

    /// Removes remote `name`.
    fn remove_remote(&self, name: &str) -> Result<()>;
}
