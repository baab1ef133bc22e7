//! CLI command definitions and dispatch.

pub mod create;
pub mod destroy;
pub mod info;
pub mod list;
pub mod open;
pub mod rename;

use std::io::{self, Write};

use appctl_api::PlatformClient;
use appctl_common::config::AppctlConfig;
use appctl_common::constants;
use appctl_common::types::AppName;
use appctl_git::GitCli;
use clap::{Parser, Subcommand};

use crate::context::{Context, SystemBrowser};

/// appctl: Manage apps on a hosted application platform.
#[derive(Parser, Debug)]
#[command(name = constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// The app to act on. Inferred from git remotes when omitted.
    #[arg(short, long, global = true)]
    pub app: Option<String>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List your apps.
    #[command(name = "apps", visible_alias = "list")]
    List(list::ListArgs),
    /// Show detailed app information.
    #[command(name = "apps:info", visible_alias = "info")]
    Info(info::InfoArgs),
    /// Create a new app.
    #[command(name = "apps:create", visible_alias = "create")]
    Create(create::CreateArgs),
    /// Rename an app.
    #[command(name = "apps:rename", visible_alias = "rename")]
    Rename(rename::RenameArgs),
    /// Open the app in a web browser.
    #[command(name = "apps:open", visible_alias = "open")]
    Open(open::OpenArgs),
    /// Permanently destroy an app.
    #[command(name = "apps:destroy", visible_aliases = ["destroy", "apps:delete"])]
    Destroy(destroy::DestroyArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// Loads configuration and credentials, then wires the HTTP client, the
/// git checkout in the working directory, and the terminal into a
/// [`Context`].
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = AppctlConfig::load()?;
    let credentials = config.credentials()?;
    let api = PlatformClient::new(&config.api_url, credentials.api_key)?;
    let remotes = GitCli::new(std::env::current_dir()?, config.git_host);
    tracing::debug!(api_url = %config.api_url, user = %credentials.user, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut ctx = Context {
        api: &api,
        remotes: &remotes,
        browser: &SystemBrowser,
        user: credentials.user,
        app_flag: cli.app.map(AppName::new),
        out: &mut out,
        input: &mut input,
    };
    let result = dispatch(cli.command, &mut ctx);
    out.flush()?;
    result
}

/// Runs one command against an already-built [`Context`].
///
/// # Errors
///
/// Returns the command's error.
pub fn dispatch(command: Command, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    match command {
        Command::List(args) => list::execute(args, ctx),
        Command::Info(args) => info::execute(args, ctx),
        Command::Create(args) => create::execute(args, ctx),
        Command::Rename(args) => rename::execute(args, ctx),
        Command::Open(args) => open::execute(args, ctx),
        Command::Destroy(args) => destroy::execute(args, ctx),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::testing::{FakeApi, Harness};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("appctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_resolve_to_same_command() {
        assert!(matches!(parse(&["apps"]).command, Command::List(_)));
        assert!(matches!(parse(&["list"]).command, Command::List(_)));
        assert!(matches!(parse(&["info", "--raw"]).command, Command::Info(a) if a.raw));
        assert!(matches!(parse(&["create"]).command, Command::Create(_)));
        assert!(matches!(parse(&["rename", "new"]).command, Command::Rename(_)));
        assert!(matches!(parse(&["open"]).command, Command::Open(_)));
        assert!(matches!(parse(&["destroy"]).command, Command::Destroy(_)));
        assert!(matches!(parse(&["apps:delete"]).command, Command::Destroy(_)));
    }

    #[test]
    fn global_app_flag_after_subcommand() {
        let cli = parse(&["apps:info", "-a", "myapp"]);
        assert_eq!(cli.app.as_deref(), Some("myapp"));
    }

    #[test]
    fn create_defaults() {
        let Command::Create(args) = parse(&["apps:create", "myapp"]).command else {
            panic!("expected create");
        };
        assert_eq!(args.name.as_deref(), Some("myapp"));
        assert_eq!(args.remote, "heroku");
        assert_eq!(args.stack, "aspen-mri-1.8.6");
        assert_eq!(args.timeout, 30);
    }

    #[test]
    fn destroy_takes_positional_and_confirm() {
        let Command::Destroy(args) = parse(&["destroy", "x", "--confirm", "x"]).command else {
            panic!("expected destroy");
        };
        assert_eq!(args.target.as_deref(), Some("x"));
        assert_eq!(args.confirm.as_deref(), Some("x"));
    }

    #[test]
    fn dispatch_routes_to_handler() {
        let mut h = Harness::new(FakeApi::default());
        dispatch(parse(&["apps"]).command, &mut h.ctx()).unwrap();
        assert_eq!(h.stdout(), "You have no apps.\n");
    }
}
