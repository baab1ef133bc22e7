//! In-memory collaborators for command tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;

use appctl_api::models::{
    Addon, AddonInstall, App, Collaborator, ConfigVars, CreateAppRequest, Domain,
};
use appctl_api::{ApiError, PlatformApi};
use appctl_common::error::Result as CommonResult;
use appctl_common::types::AppName;
use appctl_git::RemoteStore;
use appctl_git::url::app_from_url;

use crate::context::{Context, Launcher};

const HOST: &str = "heroku.com";

/// Scripted platform API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub apps: Vec<App>,
    pub addons: Vec<Addon>,
    pub collaborators: Vec<Collaborator>,
    pub domains: Vec<Domain>,
    pub created: Option<App>,
    /// Number of `create_complete` calls answered with `false` before `true`.
    pub incomplete_polls: usize,
    pub failing_addons: BTreeSet<String>,
    pub polls: Cell<usize>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_app(app: App) -> Self {
        Self {
            apps: vec![app],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn find(&self, name: &str) -> Result<App, ApiError> {
        self.apps
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("App not found.".into()))
    }
}

impl PlatformApi for FakeApi {
    fn list_apps(&self) -> Result<Vec<App>, ApiError> {
        self.record("list_apps".into());
        Ok(self.apps.clone())
    }

    fn get_app(&self, app: &str) -> Result<App, ApiError> {
        self.record(format!("get_app {app}"));
        self.find(app)
    }

    fn create_app(&self, request: &CreateAppRequest) -> Result<App, ApiError> {
        self.record(format!(
            "create_app {} {}",
            request.app.name.as_deref().unwrap_or("-"),
            request.app.stack
        ));
        self.created
            .clone()
            .ok_or_else(|| ApiError::Unprocessable("no create response scripted".into()))
    }

    fn create_complete(&self, app: &str) -> Result<bool, ApiError> {
        self.record(format!("create_complete {app}"));
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        Ok(polls > self.incomplete_polls)
    }

    fn rename_app(&self, app: &str, new_name: &str) -> Result<App, ApiError> {
        self.record(format!("rename_app {app} {new_name}"));
        self.find(app).map(|_| App::named(new_name))
    }

    fn delete_app(&self, app: &str) -> Result<(), ApiError> {
        self.record(format!("delete_app {app}"));
        self.find(app).map(|_| ())
    }

    fn list_addons(&self, app: &str) -> Result<Vec<Addon>, ApiError> {
        self.record(format!("list_addons {app}"));
        Ok(self.addons.clone())
    }

    fn attach_addon(&self, app: &str, addon: &str) -> Result<AddonInstall, ApiError> {
        self.record(format!("attach_addon {app} {addon}"));
        if self.failing_addons.contains(addon) {
            return Err(ApiError::Unprocessable(format!("{addon} is not available")));
        }
        Ok(AddonInstall::default())
    }

    fn list_collaborators(&self, app: &str) -> Result<Vec<Collaborator>, ApiError> {
        self.record(format!("list_collaborators {app}"));
        Ok(self.collaborators.clone())
    }

    fn list_domains(&self, app: &str) -> Result<Vec<Domain>, ApiError> {
        self.record(format!("list_domains {app}"));
        Ok(self.domains.clone())
    }

    fn set_config_vars(&self, app: &str, vars: &ConfigVars) -> Result<ConfigVars, ApiError> {
        let pairs: Vec<String> = vars
            .iter()
            .map(|(k, v)| format!("{k}={}", v.as_deref().unwrap_or("")))
            .collect();
        self.record(format!("set_config_vars {app} {}", pairs.join(",")));
        Ok(vars.clone())
    }
}

/// Remote configuration held in memory, keyed by remote name.
pub struct FakeRemotes {
    pub checkout: bool,
    pub urls: RefCell<BTreeMap<String, String>>,
    pub log: RefCell<Vec<String>>,
}

impl Default for FakeRemotes {
    fn default() -> Self {
        Self {
            checkout: true,
            urls: RefCell::default(),
            log: RefCell::default(),
        }
    }
}

impl FakeRemotes {
    /// Seeds a remote without logging it.
    pub fn add(&self, name: &str, url: &str) {
        let _ = self.urls.borrow_mut().insert(name.into(), url.into());
    }

    pub fn url(&self, name: &str) -> Option<String> {
        self.urls.borrow().get(name).cloned()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl RemoteStore for FakeRemotes {
    fn is_checkout(&self) -> bool {
        self.checkout
    }

    fn app_remotes(&self) -> CommonResult<Option<BTreeMap<String, AppName>>> {
        if !self.checkout {
            return Ok(None);
        }
        Ok(Some(
            self.urls
                .borrow()
                .iter()
                .filter_map(|(name, url)| app_from_url(url, HOST).map(|app| (name.clone(), app)))
                .collect(),
        ))
    }

    fn remote_names(&self) -> CommonResult<Vec<String>> {
        Ok(self.urls.borrow().keys().cloned().collect())
    }

    fn add_remote(&self, name: &str, url: &str) -> CommonResult<()> {
        self.log.borrow_mut().push(format!("add {name} {url}"));
        self.add(name, url);
        Ok(())
    }

    fn remove_remote(&self, name: &str) -> CommonResult<()> {
        self.log.borrow_mut().push(format!("rm {name}"));
        let _ = self.urls.borrow_mut().remove(name);
        Ok(())
    }
}

/// Records opened URLs instead of launching a browser.
#[derive(Default)]
pub struct FakeBrowser {
    pub opened: RefCell<Vec<String>>,
}

impl Launcher for FakeBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// Owns fakes and buffers and lends them out as a [`Context`].
pub struct Harness {
    pub api: FakeApi,
    pub remotes: FakeRemotes,
    pub browser: FakeBrowser,
    pub user: String,
    pub app_flag: Option<AppName>,
    pub out: Vec<u8>,
    pub input: Cursor<Vec<u8>>,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        Self {
            api,
            remotes: FakeRemotes::default(),
            browser: FakeBrowser::default(),
            user: "me@example.com".into(),
            app_flag: None,
            out: Vec::new(),
            input: Cursor::new(Vec::new()),
        }
    }

    /// Harness whose `--app` flag names `app`.
    pub fn for_app(api: FakeApi, app: &str) -> Self {
        let mut h = Self::new(api);
        h.app_flag = Some(app.into());
        h
    }

    /// Queues `answer` as the next line read from stdin.
    pub fn answer(&mut self, answer: &str) {
        self.input = Cursor::new(format!("{answer}\n").into_bytes());
    }

    pub fn ctx(&mut self) -> Context<'_> {
        Context {
            api: &self.api,
            remotes: &self.remotes,
            browser: &self.browser,
            user: self.user.clone(),
            app_flag: self.app_flag.clone(),
            out: &mut self.out,
            input: &mut self.input,
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}
