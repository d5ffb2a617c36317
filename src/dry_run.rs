//! Read-only report of what an apply would change

use std::io::Write;
use tracing::info;

use crate::config::Configuration;
use crate::diff::{compare, ConfigDiff};
use crate::error::Result;
use crate::github::RemoteRepository;
use crate::options::Options;
use crate::render::DiffRenderer;

/// Fetch the remote state as a [`Configuration`]
pub async fn fetch_current(remote: &dyn RemoteRepository, options: &Options) -> Result<Configuration> {
    let repo = remote
        .get_repository(&options.repo_owner, &options.repo_name)
        .await?;
    let topics = remote
        .list_topics(&options.repo_owner, &options.repo_name)
        .await?;

    Ok(Configuration {
        description: repo.description,
        homepage: repo.homepage,
        topics,
    })
}

/// Print the diff between remote and desired state to `out`
pub async fn report(
    remote: &dyn RemoteRepository,
    options: &Options,
    desired: &Configuration,
    renderer: &dyn DiffRenderer,
    out: &mut dyn Write,
) -> Result<ConfigDiff> {
    info!("Dry run against {}", options.slug());

    let current = fetch_current(remote, options).await?;
    let diff = compare(&current, desired);

    renderer.render(&diff.lines(), out)?;

    if diff.has_changes() {
        info!(
            "{} would change: {}",
            options.slug(),
            diff.changed_fields().join(", ")
        );
    } else {
        info!("{} is already up to date", options.slug());
    }

    Ok(diff)
}
