//! `appctl apps:rename`: Rename an app.

use appctl_common::error::AppctlError;
use clap::Args;

use crate::context::Context;
use crate::output;

/// Arguments for the `apps:rename` command.
#[derive(Args, Debug, Default)]
pub struct RenameArgs {
    /// The new name for the app.
    pub newname: Option<String>,
}

const USAGE: &str = "appctl apps:rename NEWNAME";

const REMOTES_ADVISORY: &str = "Don't forget to update your Git remotes on any local checkouts.";

/// Executes the `apps:rename` command.
///
/// Local git remotes that point at the old app are re-pointed at the new
/// git URL. Remotes for other apps are left alone.
///
/// # Errors
///
/// Returns a usage error before any API call when no new name is given,
/// or the first failing API or git operation.
pub fn execute(args: RenameArgs, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    let Some(newname) = args.newname.filter(|n| !n.trim().is_empty()) else {
        return Err(AppctlError::usage(USAGE, "Must specify a new name.").into());
    };
    let app = ctx.app()?;

    let api = ctx.api;
    output::action(ctx.out, &format!("Renaming {app} to {newname}"), || {
        let _ = api.rename_app(app.as_str(), &newname)?;
        Ok(())
    })?;
    tracing::info!(from = %app, to = %newname, "app renamed");

    let renamed = ctx.api.get_app(&newname)?;
    writeln!(
        ctx.out,
        "{} | {}",
        renamed.web_url.as_deref().unwrap_or_default(),
        renamed.git_url.as_deref().unwrap_or_default()
    )?;

    let remotes = ctx.remotes.app_remotes()?.unwrap_or_default();
    if remotes.is_empty() {
        writeln!(ctx.out, "{REMOTES_ADVISORY}")?;
        return Ok(());
    }
    let Some(git_url) = renamed.git_url.as_deref() else {
        tracing::warn!(app = %newname, "no git URL reported, leaving remotes unchanged");
        writeln!(ctx.out, "{REMOTES_ADVISORY}")?;
        return Ok(());
    };
    for (remote, remote_app) in &remotes {
        if *remote_app != app {
            continue;
        }
        ctx.remotes.remove_remote(remote)?;
        ctx.remotes.add_remote(remote, git_url)?;
        writeln!(ctx.out, "Git remote {remote} updated")?;
    }
    Ok(())
}
