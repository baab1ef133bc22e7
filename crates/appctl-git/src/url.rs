//! Recognising platform git URLs.

use appctl_common::types::AppName;

/// Extracts the app name from a platform git URL.
///
/// Accepted forms, for git host `heroku.com`:
/// - `git@heroku.com:myapp.git`
/// - `git@heroku.com.work:myapp.git` (ssh host aliases)
/// - `https://git.heroku.com/myapp.git`
pub fn app_from_url(url: &str, host: &str) -> Option<AppName> {
    if let Some(rest) = url.strip_prefix("git@").and_then(|r| r.strip_prefix(host)) {
        let (alias, path) = rest.split_once(':')?;
        if !alias.chars().all(|c| c == '.' || c == '_' || c.is_ascii_alphanumeric()) {
            return None;
        }
        return app_segment(path);
    }
    url.strip_prefix("https://git.")
        .and_then(|r| r.strip_prefix(host))
        .and_then(|r| r.strip_prefix('/'))
        .and_then(app_segment)
}

fn app_segment(path: &str) -> Option<AppName> {
    let name = path.strip_suffix(".git")?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric());
    valid.then(|| AppName::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "heroku.com";

    #[test]
    fn parses_ssh_url() {
        assert_eq!(
            app_from_url("git@heroku.com:myapp.git", HOST),
            Some(AppName::new("myapp"))
        );
    }

    #[test]
    fn parses_ssh_host_alias() {
        assert_eq!(
            app_from_url("git@heroku.com.work:my-app.git", HOST),
            Some(AppName::new("my-app"))
        );
    }

    #[test]
    fn parses_https_url() {
        assert_eq!(
            app_from_url("https://git.heroku.com/myapp.git", HOST),
            Some(AppName::new("myapp"))
        );
    }

    #[test]
    fn ignores_other_hosts() {
        assert_eq!(app_from_url("git@github.com:me/myapp.git", HOST), None);
        assert_eq!(app_from_url("https://github.com/me/myapp.git", HOST), None);
    }

    #[test]
    fn ignores_nested_paths_and_missing_suffix() {
        assert_eq!(app_from_url("git@heroku.com:team/myapp.git", HOST), None);
        assert_eq!(app_from_url("git@heroku.com:myapp", HOST), None);
        assert_eq!(app_from_url("git@heroku.com:.git", HOST), None);
    }

    #[test]
    fn ignores_host_prefix_collisions() {
        assert_eq!(app_from_url("git@heroku.com-evil.io:myapp.git", HOST), None);
    }
}
