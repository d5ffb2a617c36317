use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Page size used when listing topics
const TOPICS_PER_PAGE: u32 = 100;

/// Metadata fields of a repository as returned by `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Body of `PATCH /repos/{owner}/{repo}`
///
/// Unset fields are left out of the request so the remote keeps its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryEdit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// Request and response shape of the topics endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNames {
    pub names: Vec<String>,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u32,
    page: u32,
}

/// Calls repometa makes against the code-forge
///
/// The dry-run and apply flows only talk to this trait, so they can be driven
/// by a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Fetch name, description and homepage
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepositoryMetadata>;

    /// Fetch every topic, following pagination to the end
    async fn list_topics(&self, owner: &str, name: &str) -> Result<Vec<String>>;

    /// Update name, description and homepage in one call
    async fn edit_repository(&self, owner: &str, name: &str, edit: &RepositoryEdit) -> Result<()>;

    /// Overwrite the full topic set
    async fn replace_topics(&self, owner: &str, name: &str, topics: &[String]) -> Result<()>;
}

/// GitHub REST client authenticated with a static bearer token
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Public GitHub API endpoint
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Build a client for `api_url`
    ///
    /// The token is not checked here; a bad token surfaces on the first call.
    /// An empty token produces an unauthenticated client. Failed requests are
    /// never re-sent.
    pub fn new(access_token: &str, api_url: &str) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(api_url)
            .map_err(|e| Error::remote(format!("configuring API URL {}", api_url), e))?;

        if !access_token.is_empty() {
            builder = builder.personal_token(access_token.to_string());
        }

        let client = builder
            .build()
            .map_err(|e| Error::remote("creating GitHub client", e))?;

        debug!("GitHub client ready for {}", api_url);
        Ok(Self { client })
    }
}

fn repo_route(owner: &str, name: &str) -> String {
    format!("/repos/{}/{}", owner, name)
}

#[async_trait]
impl RemoteRepository for GitHubClient {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepositoryMetadata> {
        debug!("Fetching repository {}/{}", owner, name);

        self.client
            .get(repo_route(owner, name), None::<&()>)
            .await
            .map_err(|e| Error::remote(format!("fetching repository {}/{}", owner, name), e))
    }

    async fn list_topics(&self, owner: &str, name: &str) -> Result<Vec<String>> {
        let route = format!("{}/topics", repo_route(owner, name));
        let mut topics = Vec::new();
        let mut page = 1u32;

        loop {
            debug!("Fetching topics of {}/{} page {}", owner, name, page);

            let params = PageParams {
                per_page: TOPICS_PER_PAGE,
                page,
            };
            let batch: TopicNames = self
                .client
                .get(&route, Some(&params))
                .await
                .map_err(|e| {
                    Error::remote(
                        format!("listing topics of {}/{} page {}", owner, name, page),
                        e,
                    )
                })?;

            let count = batch.names.len();
            topics.extend(batch.names);

            if count < TOPICS_PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        debug!("Found {} topics on {}/{}", topics.len(), owner, name);
        Ok(topics)
    }

    async fn edit_repository(&self, owner: &str, name: &str, edit: &RepositoryEdit) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .patch(repo_route(owner, name), Some(edit))
            .await
            .map_err(|e| Error::remote(format!("editing repository {}/{}", owner, name), e))?;

        info!("Updated description and homepage of {}/{}", owner, name);
        Ok(())
    }

    async fn replace_topics(&self, owner: &str, name: &str, topics: &[String]) -> Result<()> {
        let route = format!("{}/topics", repo_route(owner, name));
        let body = TopicNames {
            names: topics.to_vec(),
        };

        let _: TopicNames = self
            .client
            .put(route, Some(&body))
            .await
            .map_err(|e| Error::remote(format!("replacing topics of {}/{}", owner, name), e))?;

        info!("Replaced topics of {}/{} ({} topics)", owner, name, topics.len());
        Ok(())
    }
}
