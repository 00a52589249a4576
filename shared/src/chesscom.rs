use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{instrument, trace};

use crate::chess::{ArchiveList, MonthlyArchive, PlayerStats};

pub const DEFAULT_API_URL: &str = "https://api.chess.com/pub";

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Read access to the chess platform's public player endpoints.
#[async_trait::async_trait]
pub trait ChessApi: Send + Sync {
    /// Monthly archives of the user. Unknown users have none.
    async fn archives(&self, username: &str) -> anyhow::Result<ArchiveList>;

    async fn archive(&self, url: &str) -> anyhow::Result<MonthlyArchive>;

    async fn stats(&self, username: &str) -> anyhow::Result<PlayerStats>;
}

#[derive(Clone, Debug)]
pub struct ChessComClient {
    client: Client,
    base_url: String,
}

impl ChessComClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn player_url(&self, username: &str, path: &str) -> String {
        format!(
            "{}/player/{}/{path}",
            self.base_url,
            username.to_lowercase()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<Option<T>> {
        trace!("GET request to url {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to request {url}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .with_context(|| format!("Request to {url} was rejected"))?;
        let body = response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {url}"))?;
        Ok(Some(body))
    }
}

#[async_trait::async_trait]
impl ChessApi for ChessComClient {
    #[instrument(skip(self))]
    async fn archives(&self, username: &str) -> anyhow::Result<ArchiveList> {
        let url = self.player_url(username, "games/archives");
        Ok(self.get_json(&url).await?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn archive(&self, url: &str) -> anyhow::Result<MonthlyArchive> {
        self.get_json(url)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Archive {url} does not exist"))
    }

    #[instrument(skip(self))]
    async fn stats(&self, username: &str) -> anyhow::Result<PlayerStats> {
        let url = self.player_url(username, "stats");
        self.get_json(&url)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Stats for {username} do not exist"))
    }
}
