//! `appctl apps:open`: Open the app in a web browser.

use anyhow::Context as _;
use clap::Args;

use crate::context::Context;

/// Arguments for the `apps:open` command.
#[derive(Args, Debug, Default)]
pub struct OpenArgs {}

/// Executes the `apps:open` command.
///
/// # Errors
///
/// Returns an error if the app cannot be fetched or the browser fails to
/// launch.
pub fn execute(_args: OpenArgs, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    let app = ctx.app()?;
    let info = ctx.api.get_app(app.as_str())?;
    let Some(url) = info.web_url.as_deref() else {
        anyhow::bail!("{app} has no web URL");
    };

    writeln!(ctx.out, "Opening {url}")?;
    ctx.out.flush()?;
    ctx.browser
        .open(url)
        .with_context(|| format!("failed to open {url}"))
}
