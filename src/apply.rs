//! Push the desired configuration to the remote repository
//!
//! Two calls, strictly in order: edit the repository (name, description,
//! homepage), then replace the topic set. A failed edit stops before the
//! topics call. A failed topics call leaves the edit in place; nothing is
//! rolled back.

use tracing::info;

use crate::config::Configuration;
use crate::error::Result;
use crate::github::{RemoteRepository, RepositoryEdit};
use crate::options::Options;

/// Build the edit request for `desired`
///
/// The name is sent unchanged so the call can never rename the repository.
pub fn repository_edit(options: &Options, desired: &Configuration) -> RepositoryEdit {
    RepositoryEdit {
        name: options.repo_name.clone(),
        description: desired.description.clone(),
        homepage: desired.homepage.clone(),
    }
}

pub async fn apply(
    remote: &dyn RemoteRepository,
    options: &Options,
    desired: &Configuration,
) -> Result<()> {
    info!("Applying metadata to {}", options.slug());

    let edit = repository_edit(options, desired);
    remote
        .edit_repository(&options.repo_owner, &options.repo_name, &edit)
        .await?;

    remote
        .replace_topics(&options.repo_owner, &options.repo_name, &desired.topics)
        .await?;

    info!("{} is up to date", options.slug());
    Ok(())
}
