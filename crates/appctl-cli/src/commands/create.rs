//! `appctl apps:create`: Create a new app.

use std::time::{Duration, Instant};

use appctl_api::models::{ConfigVars, CreateAppRequest};
use appctl_common::constants::{
    BUILDPACK_CONFIG_VAR, DEFAULT_CREATE_TIMEOUT_SECS, DEFAULT_REMOTE, DEFAULT_STACK,
};
use clap::Args;

use crate::context::Context;
use crate::output;

/// Arguments for the `apps:create` command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the app. The platform picks one when omitted.
    pub name: Option<String>,

    /// A comma-delimited list of addons to install.
    #[arg(long)]
    pub addons: Option<String>,

    /// A buildpack url to use for this app.
    #[arg(short, long)]
    pub buildpack: Option<String>,

    /// The git remote to create.
    #[arg(short, long, default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// The stack on which to create the app.
    #[arg(short, long, default_value = DEFAULT_STACK)]
    pub stack: String,

    /// Seconds to wait for the app to finish provisioning.
    #[arg(short, long, default_value_t = DEFAULT_CREATE_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            name: None,
            addons: None,
            buildpack: None,
            remote: DEFAULT_REMOTE.to_string(),
            stack: DEFAULT_STACK.to_string(),
            timeout: DEFAULT_CREATE_TIMEOUT_SECS,
        }
    }
}

const POLL_INTERVAL: Duration = Duration::from_secs(1);

const TIMEOUT_MESSAGE: &str = "Timed Out! Check heroku status for known issues.";

/// How waiting for provisioning ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    /// The platform reported the app complete.
    Complete,
    /// The timeout elapsed first.
    TimedOut,
}

/// Executes the `apps:create` command.
///
/// # Errors
///
/// Returns an error if creation, an addon, or the buildpack fails. Steps
/// that already succeeded are not undone.
pub fn execute(args: CreateArgs, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    run(args, ctx, &mut std::thread::sleep)
}

/// Runs `apps:create`, pausing between completion checks with `sleep`.
///
/// # Errors
///
/// See [`execute`].
pub fn run(
    args: CreateArgs,
    ctx: &mut Context<'_>,
    sleep: &mut dyn FnMut(Duration),
) -> anyhow::Result<()> {
    let request = CreateAppRequest::new(args.name.as_deref(), args.stack.as_str());
    let info = ctx.api.create_app(&request)?;
    let name = info.name.as_str();

    write!(ctx.out, "Creating {name}...")?;
    ctx.out.flush()?;

    let outcome = if info.is_creating() {
        wait_for_provisioning(ctx, name, args.timeout, sleep)?
    } else {
        Provisioning::Complete
    };

    match outcome {
        Provisioning::Complete => {
            let stack = info.stack.as_deref().unwrap_or(&args.stack);
            writeln!(ctx.out, " done, stack is {stack}")?;
        }
        Provisioning::TimedOut => {
            tracing::warn!(app = name, timeout = args.timeout, "app still provisioning");
            writeln!(ctx.out)?;
            writeln!(ctx.out, "{TIMEOUT_MESSAGE}")?;
        }
    }

    for addon in split_addons(args.addons.as_deref()) {
        let api = ctx.api;
        output::action(ctx.out, &format!("Adding {addon} to {name}"), || {
            let _ = api.attach_addon(name, addon)?;
            Ok(())
        })?;
    }

    if let Some(buildpack) = &args.buildpack {
        let vars = ConfigVars::from([(BUILDPACK_CONFIG_VAR.to_string(), Some(buildpack.clone()))]);
        let _ = ctx.api.set_config_vars(name, &vars)?;
        writeln!(ctx.out, "{BUILDPACK_CONFIG_VAR}={buildpack}")?;
    }

    writeln!(
        ctx.out,
        "{} | {}",
        info.web_url.as_deref().unwrap_or_default(),
        info.git_url.as_deref().unwrap_or_default()
    )?;

    if let Some(git_url) = &info.git_url {
        create_git_remote(ctx, &args.remote, git_url)?;
    }
    Ok(())
}

/// Polls the platform once per interval until `app` is provisioned.
///
/// Prints a dot for every incomplete check. Gives up after `timeout_secs`
/// checks or once `timeout_secs` of wall-clock time has passed.
fn wait_for_provisioning(
    ctx: &mut Context<'_>,
    app: &str,
    timeout_secs: u64,
    sleep: &mut dyn FnMut(Duration),
) -> anyhow::Result<Provisioning> {
    let deadline = Instant::now() + Duration::from_secs(timeout_secs);
    for _ in 0..timeout_secs {
        if ctx.api.create_complete(app)? {
            return Ok(Provisioning::Complete);
        }
        write!(ctx.out, ".")?;
        ctx.out.flush()?;
        sleep(POLL_INTERVAL);
        if Instant::now() >= deadline {
            break;
        }
    }
    Ok(Provisioning::TimedOut)
}

/// Splits a comma-delimited addon list, trimming whitespace and dropping
/// empty entries.
pub fn split_addons(addons: Option<&str>) -> Vec<&str> {
    addons
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

/// Adds remote `remote` pointing at `git_url` when working inside a git
/// checkout that does not already have a remote by that name.
///
/// # Errors
///
/// Returns an error if git cannot list or add remotes.
pub fn create_git_remote(ctx: &mut Context<'_>, remote: &str, git_url: &str) -> anyhow::Result<()> {
    if !ctx.remotes.is_checkout() {
        return Ok(());
    }
    if ctx.remotes.remote_names()?.iter().any(|r| r == remote) {
        tracing::debug!(remote, "git remote already exists");
        return Ok(());
    }
    ctx.remotes.add_remote(remote, git_url)?;
    writeln!(ctx.out, "Git remote {remote} added")?;
    Ok(())
}
