//! `appctl apps:info`: Show detailed app information.

use std::collections::BTreeMap;

use appctl_api::models::{App, CreateStatus};
use appctl_common::constants::CEDAR_STACK;
use clap::Args;

use crate::context::Context;
use crate::output::{self, Field};

/// Arguments for the `apps:info` command.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    /// Output info as raw key/value pairs.
    #[arg(short, long)]
    pub raw: bool,
}

const DATABASE_SIZE: &str = "Database Size";

/// Executes the `apps:info` command.
///
/// # Errors
///
/// Returns an error if no app can be resolved or an API request fails.
pub fn execute(args: InfoArgs, ctx: &mut Context<'_>) -> anyhow::Result<()> {
    let app = ctx.app()?;
    let app_data = ctx.api.get_app(app.as_str())?;

    let mut addons: Vec<String> = ctx
        .api
        .list_addons(app.as_str())?
        .into_iter()
        .map(|a| a.description)
        .collect();
    addons.sort();

    let emails = ctx
        .api
        .list_collaborators(app.as_str())?
        .into_iter()
        .map(|c| c.email);
    let collaborators = without_owner(emails, app_data.owner_email.as_deref());

    let domain = ctx
        .api
        .list_domains(app.as_str())?
        .into_iter()
        .next()
        .map(|d| d.domain);

    if args.raw {
        for line in raw_lines(&app_data, &addons, &collaborators, domain.as_deref())? {
            writeln!(ctx.out, "{line}")?;
        }
    } else {
        output::styled_header(ctx.out, app.as_str())?;
        output::styled_hash(ctx.out, &human_fields(&app_data, addons, collaborators))?;
    }
    Ok(())
}

/// Sorts collaborator emails and drops the owner.
pub fn without_owner(emails: impl IntoIterator<Item = String>, owner: Option<&str>) -> Vec<String> {
    let mut emails: Vec<String> = emails
        .into_iter()
        .filter(|email| Some(email.as_str()) != owner)
        .collect();
    emails.sort();
    emails
}

/// Renders every key of the app payload as `key=value`, sorted by key.
///
/// Keys come from the response object as received, so null values print
/// as `key=`. Apps without a received payload fall back to their typed
/// fields. The first domain is added as `domain_name`. `addons` and
/// `collaborators` keys, when present, show the comma-joined lists.
///
/// # Errors
///
/// Returns an error if the app cannot be serialized to a JSON object.
pub fn raw_lines(
    app: &App,
    addons: &[String],
    collaborators: &[String],
    domain: Option<&str>,
) -> anyhow::Result<Vec<String>> {
    let payload = if app.payload.is_empty() {
        let serde_json::Value::Object(typed) = serde_json::to_value(app)? else {
            anyhow::bail!("app payload for {} is not an object", app.name);
        };
        typed
    } else {
        app.payload.clone()
    };

    let mut fields: BTreeMap<String, String> = payload
        .into_iter()
        .map(|(key, value)| (key, raw_value(&value)))
        .collect();
    if let Some(domain) = domain {
        let _ = fields.insert("domain_name".into(), domain.to_string());
    }
    if let Some(value) = fields.get_mut("addons") {
        *value = addons.join(",");
    }
    if let Some(value) = fields.get_mut("collaborators") {
        *value = collaborators.join(",");
    }

    Ok(fields
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect())
}

fn raw_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builds the curated key/value table shown without `--raw`.
///
/// Steps run in order: the `Database Size` label is produced by the byte
/// formatting step before the table count is appended to it.
pub fn human_fields(
    app: &App,
    addons: Vec<String>,
    collaborators: Vec<String>,
) -> BTreeMap<&'static str, Field> {
    let mut data = BTreeMap::new();

    text(&mut data, "Owner Email", app.owner_email.clone());
    text(&mut data, "Stack", app.stack.clone());
    let _ = data.insert("Addons", Field::List(addons));
    let _ = data.insert("Collaborators", Field::List(collaborators));

    if let Some(status) = app.create_status.as_ref().filter(|s| **s != CreateStatus::Complete) {
        text(&mut data, "Create Status", Some(status.to_string()));
    }

    text(&mut data, "Cron Finished At", app.cron_finished_at.as_deref().map(output::format_date));
    text(&mut data, "Cron Next Run", app.cron_next_run.as_deref().map(output::format_date));

    text(&mut data, DATABASE_SIZE, app.database_size.map(output::format_bytes));
    text(&mut data, "Repo Size", app.repo_size.map(output::format_bytes));
    text(&mut data, "Slug Size", app.slug_size.map(output::format_bytes));

    text(&mut data, "Git URL", app.git_url.clone());
    text(&mut data, "Web URL", app.web_url.clone());

    if app.stack.as_deref() != Some(CEDAR_STACK) {
        text(&mut data, "Dynos", app.dynos.map(|n| n.to_string()));
        text(&mut data, "Workers", app.workers.map(|n| n.to_string()));
    }

    if let (Some(tables), Some(Field::Text(size))) =
        (app.database_tables, data.get_mut(DATABASE_SIZE))
    {
        *size = format!(
            "{} in {}",
            size.replace("(empty)", "0K"),
            output::quantify("table", tables)
        );
    }

    if let Some(hours) = &app.dyno_hours {
        let _ = data.insert("Dyno Hours", Field::List(dyno_hour_lines(hours)));
    }

    data
}

fn text(data: &mut BTreeMap<&'static str, Field>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        let _ = data.insert(key, Field::Text(value));
    }
}

/// One line per dyno type, e.g. `Web - 1.50 dyno-hours`.
pub fn dyno_hour_lines(hours: &BTreeMap<String, f64>) -> Vec<String> {
    hours
        .iter()
        .map(|(kind, used)| format!("{} - {used:.2} dyno-hours", output::capitalize(kind)))
        .collect()
}
