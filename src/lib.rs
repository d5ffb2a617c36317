//! repometa - declarative GitHub repository metadata
//!
//! Keeps a repository's description, homepage and topics in line with a
//! `.repo-metadata.yaml` file checked into the repository itself.
//!
//! ## Modules
//!
//! - [`config`]: the metadata file
//! - [`options`]: run options from environment and flags
//! - [`github`]: GitHub API access
//! - [`diff`] and [`render`]: structural comparison and its terminal view
//! - [`dry_run`]: read-only report
//! - [`apply`]: pushing the metadata

pub mod apply;
pub mod config;
pub mod diff;
pub mod dry_run;
pub mod error;
pub mod github;
pub mod options;
pub mod render;

pub use config::Configuration;
pub use error::{Error, Result};
pub use github::{GitHubClient, RemoteRepository};
pub use options::{Environment, Flags, Options};
