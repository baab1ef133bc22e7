//! `appctl apps:destroy`: Permanently destroy an app.

use appctl_common::error::AppctlError;
use appctl_common::types::AppName;
use clap::Args;

use crate::context::Context;
use crate::output;

/// Arguments for the `apps:destroy` command.
#[derive(Args, Debug, Default)]
pub struct DestroyArgs {
    /// The app to destroy.
    #[arg(value_name = "APP")]
    pub target: Option<String>,

    /// Skip the prompt by repeating the app name.
    #[arg(long)]
    pub confirm: Option<String>,
}

const USAGE: &str = "appctl apps:destroy --app APP";

/// Executes the `apps:destroy` command.
///
/// The app is taken from the positional argument, then `--app`, then
/// `--confirm`. It is never inferred from git remotes.
///
/// # Errors
///
/// Returns a usage error before any API call when no app is named, an
/// error when confirmation fails, or the first failing API or git call.
pub fn execute(args: DestroyArgs, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    let Some(app) = args
        .target
        .as_deref()
        .map(AppName::from)
        .or_else(|| ctx.app_flag.clone())
        .or_else(|| args.confirm.as_deref().map(AppName::from))
    else {
        return Err(AppctlError::usage(USAGE, "Must specify APP to destroy.").into());
    };

    let _ = ctx.api.get_app(app.as_str())?;

    let warning = format!(
        "WARNING: Potentially Destructive Action\nThis command will destroy {app} (including all add-ons)."
    );
    confirm(ctx, &app, args.confirm.as_deref(), &warning)?;

    let api = ctx.api;
    let remotes = ctx.remotes;
    let label = format!("Destroying {app} (including all add-ons)");
    output::action(ctx.out, &label, || {
        api.delete_app(app.as_str())?;
        tracing::info!(%app, "app destroyed");
        for (remote, remote_app) in remotes.app_remotes()?.unwrap_or_default() {
            if remote_app == app {
                remotes.remove_remote(&remote)?;
            }
        }
        Ok(())
    })
}

/// Confirms a destructive action on `app`.
///
/// A `--confirm` value must name `app` exactly. Without one, `warning` is
/// shown and the user must type the app name.
///
/// # Errors
///
/// Returns an error if the confirmation does not match or stdin cannot be
/// read.
pub fn confirm(
    ctx: &mut Context<'_>,
    app: &AppName,
    confirmed: Option<&str>,
    warning: &str,
) -> anyhow::Result<()> {
    if let Some(confirmed) = confirmed {
        if confirmed != app.as_str() {
            anyhow::bail!("Confirmed app {confirmed} did not match the selected app {app}.");
        }
        return Ok(());
    }

    writeln!(ctx.out)?;
    for line in warning.lines() {
        writeln!(ctx.out, " !    {line}")?;
    }
    writeln!(
        ctx.out,
        " !    To proceed, type \"{app}\" or re-run this command with --confirm {app}"
    )?;
    writeln!(ctx.out)?;
    write!(ctx.out, "> ")?;
    ctx.out.flush()?;

    let mut answer = String::new();
    let _ = ctx.input.read_line(&mut answer)?;
    if !answer.trim().eq_ignore_ascii_case(app.as_str()) {
        anyhow::bail!("Confirmation did not match {app}. Aborted.");
    }
    Ok(())
}
