//! Run options resolved from the process environment and command-line flags
//!
//! Precedence, lowest to highest:
//! 1. `GITHUB_ACCESS_TOKEN` for the access token
//! 2. Travis CI defaults for owner, name and dry-run
//! 3. Explicit flags

use std::env;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const ACCESS_TOKEN_VAR: &str = "GITHUB_ACCESS_TOKEN";
pub const TRAVIS_VAR: &str = "TRAVIS";
pub const TRAVIS_REPO_SLUG_VAR: &str = "TRAVIS_REPO_SLUG";
pub const TRAVIS_PULL_REQUEST_VAR: &str = "TRAVIS_PULL_REQUEST";

/// Snapshot of the environment variables repometa reads, taken once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub access_token: Option<String>,
    pub travis: Option<String>,
    pub repo_slug: Option<String>,
    pub pull_request: Option<String>,
}

impl Environment {
    /// Capture the relevant variables from the current process
    pub fn from_process() -> Self {
        Self {
            access_token: env::var(ACCESS_TOKEN_VAR).ok(),
            travis: env::var(TRAVIS_VAR).ok(),
            repo_slug: env::var(TRAVIS_REPO_SLUG_VAR).ok(),
            pull_request: env::var(TRAVIS_PULL_REQUEST_VAR).ok(),
        }
    }

    /// Whether we are running inside a Travis CI build
    pub fn is_travis(&self) -> bool {
        self.travis.as_deref() == Some("true")
    }
}

/// Explicit command-line overrides; `None` means the flag was not given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub access_token: Option<String>,
    pub dry_run: Option<bool>,
}

/// Fully resolved options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub repo_owner: String,
    pub repo_name: String,
    pub access_token: String,
    pub dry_run: bool,
}

impl Options {
    /// `owner/name` form for logs and messages
    pub fn slug(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}

/// Split an `owner/name` slug into its two parts
pub fn parse_slug(slug: &str) -> Result<(String, String)> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(Error::usage(format!(
            "{} must look like owner/name, got {:?}",
            TRAVIS_REPO_SLUG_VAR, slug
        ))),
    }
}

/// Merge environment defaults with explicit flags
pub fn resolve(environment: &Environment, flags: Flags) -> Result<Options> {
    let mut repo_owner = String::new();
    let mut repo_name = String::new();
    let mut access_token = environment.access_token.clone().unwrap_or_default();
    let mut dry_run = false;

    if environment.is_travis() {
        debug!("Travis CI detected, deriving defaults from the build environment");

        // The slug is only needed when a flag does not supply the value
        if flags.owner.is_none() || flags.name.is_none() {
            let slug = environment.repo_slug.as_deref().unwrap_or_default();
            let (owner, name) = parse_slug(slug)?;
            repo_owner = owner;
            repo_name = name;
        }

        // Kept literally: a dry run exactly when this is not a pull request build
        dry_run = environment.pull_request.as_deref() == Some("false");
    }

    if let Some(owner) = flags.owner {
        repo_owner = owner;
    }
    if let Some(name) = flags.name {
        repo_name = name;
    }
    if let Some(token) = flags.access_token {
        access_token = token;
    }
    if let Some(flag) = flags.dry_run {
        dry_run = flag;
    }

    if repo_owner.is_empty() {
        return Err(Error::usage(
            "repository owner is not set; pass --owner or run inside Travis CI",
        ));
    }
    if repo_name.is_empty() {
        return Err(Error::usage(
            "repository name is not set; pass --name or run inside Travis CI",
        ));
    }
    if access_token.is_empty() {
        warn!(
            "No access token given ({} or --access-token); requests will be unauthenticated",
            ACCESS_TOKEN_VAR
        );
    }

    Ok(Options {
        repo_owner,
        repo_name,
        access_token,
        dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn travis(slug: &str, pull_request: &str) -> Environment {
        Environment {
            access_token: Some("env-token".to_string()),
            travis: Some("true".to_string()),
            repo_slug: Some(slug.to_string()),
            pull_request: Some(pull_request.to_string()),
        }
    }

    fn all_flags() -> Flags {
        Flags {
            owner: Some("flag-owner".to_string()),
            name: Some("flag-name".to_string()),
            access_token: Some("flag-token".to_string()),
            dry_run: Some(false),
        }
    }

    #[test]
    fn test_travis_push_build_is_dry_run() {
        let opts = resolve(&travis("acme/widgets", "false"), Flags::default()).unwrap();

        assert_eq!(opts.repo_owner, "acme");
        assert_eq!(opts.repo_name, "widgets");
        assert_eq!(opts.access_token, "env-token");
        assert!(opts.dry_run);
    }

    #[test]
    fn test_travis_pull_request_build_applies() {
        let opts = resolve(&travis("acme/widgets", "true"), Flags::default()).unwrap();
        assert!(!opts.dry_run);

        let opts = resolve(&travis("acme/widgets", "42"), Flags::default()).unwrap();
        assert!(!opts.dry_run);
    }

    #[test]
    fn test_travis_must_be_literally_true() {
        let mut env = travis("acme/widgets", "false");
        env.travis = Some("1".to_string());

        let result = resolve(&env, Flags::default());
        assert_matches!(result, Err(Error::Usage { .. }));
    }

    #[test]
    fn test_flag_owner_wins() {
        let flags = Flags {
            owner: Some("flag-owner".to_string()),
            ..Flags::default()
        };
        let opts = resolve(&travis("acme/widgets", "false"), flags).unwrap();

        assert_eq!(opts.repo_owner, "flag-owner");
        assert_eq!(opts.repo_name, "widgets");
    }

    #[test]
    fn test_flag_name_wins() {
        let flags = Flags {
            name: Some("flag-name".to_string()),
            ..Flags::default()
        };
        let opts = resolve(&travis("acme/widgets", "false"), flags).unwrap();

        assert_eq!(opts.repo_owner, "acme");
        assert_eq!(opts.repo_name, "flag-name");
    }

    #[test]
    fn test_flag_access_token_wins() {
        let flags = Flags {
            access_token: Some("flag-token".to_string()),
            ..Flags::default()
        };
        let opts = resolve(&travis("acme/widgets", "false"), flags).unwrap();

        assert_eq!(opts.access_token, "flag-token");
    }

    #[test]
    fn test_flag_dry_run_wins_both_ways() {
        let flags = Flags {
            dry_run: Some(false),
            ..Flags::default()
        };
        let opts = resolve(&travis("acme/widgets", "false"), flags).unwrap();
        assert!(!opts.dry_run);

        let flags = Flags {
            dry_run: Some(true),
            ..Flags::default()
        };
        let opts = resolve(&travis("acme/widgets", "true"), flags).unwrap();
        assert!(opts.dry_run);
    }

    #[test]
    fn test_all_flags_override_ci() {
        let opts = resolve(&travis("acme/widgets", "false"), all_flags()).unwrap();

        assert_eq!(
            opts,
            Options {
                repo_owner: "flag-owner".to_string(),
                repo_name: "flag-name".to_string(),
                access_token: "flag-token".to_string(),
                dry_run: false,
            }
        );
    }

    #[test]
    fn test_empty_slug_is_usage_error() {
        let result = resolve(&travis("", "false"), Flags::default());
        assert_matches!(result, Err(Error::Usage { .. }));
    }

    #[test]
    fn test_missing_slug_is_usage_error() {
        let mut env = travis("", "false");
        env.repo_slug = None;

        assert_matches!(resolve(&env, Flags::default()), Err(Error::Usage { .. }));
    }

    #[test]
    fn test_malformed_slug_ignored_when_flags_cover_it() {
        let opts = resolve(&travis("", "false"), all_flags()).unwrap();
        assert_eq!(opts.slug(), "flag-owner/flag-name");
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!(
            parse_slug("acme/widgets").unwrap(),
            ("acme".to_string(), "widgets".to_string())
        );
        assert_matches!(parse_slug("acme"), Err(Error::Usage { .. }));
        assert_matches!(parse_slug("/widgets"), Err(Error::Usage { .. }));
        assert_matches!(parse_slug("acme/"), Err(Error::Usage { .. }));
        assert_matches!(parse_slug("acme/widgets/extra"), Err(Error::Usage { .. }));
    }

    #[test]
    fn test_outside_ci_needs_owner_and_name() {
        let env = Environment {
            access_token: Some("env-token".to_string()),
            ..Environment::default()
        };

        assert_matches!(resolve(&env, Flags::default()), Err(Error::Usage { .. }));

        let flags = Flags {
            owner: Some("acme".to_string()),
            name: Some("widgets".to_string()),
            ..Flags::default()
        };
        let opts = resolve(&env, flags).unwrap();
        assert_eq!(opts.slug(), "acme/widgets");
        assert_eq!(opts.access_token, "env-token");
        assert!(!opts.dry_run);
    }

    #[test]
    fn test_missing_token_is_allowed() {
        let flags = Flags {
            owner: Some("acme".to_string()),
            name: Some("widgets".to_string()),
            ..Flags::default()
        };
        let opts = resolve(&Environment::default(), flags).unwrap();
        assert_eq!(opts.access_token, "");
    }
}
