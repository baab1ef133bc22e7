//! `appctl apps`: List your apps.

use appctl_api::models::App;
use clap::Args;

use crate::context::Context;
use crate::output;

/// Arguments for the `apps` command.
#[derive(Args, Debug, Default)]
pub struct ListArgs {}

/// Executes the `apps` command.
///
/// Owned apps are listed by name; apps shared with the user are listed with
/// their owner. Both lists keep the order the API returned.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub fn execute(_args: ListArgs, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    let apps = ctx.api.list_apps()?;
    if apps.is_empty() {
        writeln!(ctx.out, "You have no apps.")?;
        return Ok(());
    }

    let (mine, collaborated) = partition_apps(apps, &ctx.user);
    tracing::debug!(owned = mine.len(), collaborated = collaborated.len(), "listing apps");

    if !mine.is_empty() {
        output::styled_header(ctx.out, "My Apps")?;
        let names: Vec<&str> = mine.iter().map(|a| a.name.as_str()).collect();
        output::styled_list(ctx.out, &names)?;
    }

    if !collaborated.is_empty() {
        output::styled_header(ctx.out, "Collaborated Apps")?;
        let rows: Vec<(&str, &str)> = collaborated
            .iter()
            .map(|a| (a.name.as_str(), a.owner_email.as_deref().unwrap_or("")))
            .collect();
        output::styled_rows(ctx.out, &rows)?;
    }

    Ok(())
}

/// Splits `apps` into those owned by `user` and all others.
pub fn partition_apps(apps: Vec<App>, user: &str) -> (Vec<App>, Vec<App>) {
    apps.into_iter()
        .partition(|app| app.owner_email.as_deref() == Some(user))
}
