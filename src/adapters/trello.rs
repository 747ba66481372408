//! Trello REST client implementing [`BoardClient`].

use crate::config::toml_config::BoardConfig;
use crate::core::{BoardClient, BoardList, Card, CardUpdate, Result};
use crate::utils::error::UpkeepError;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const LIST_FIELDS: &str = "id,name";
const CARD_FIELDS: &str = "id,name,due,pos,idMembers";

#[derive(Debug, Clone)]
pub struct TrelloCredentials {
    pub app_key: String,
    pub token: String,
}

pub struct TrelloClient {
    base_url: String,
    credentials: TrelloCredentials,
    client: Client,
}

impl TrelloClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: TrelloCredentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            credentials,
            client,
        })
    }

    /// Builds a client from a loaded configuration. The token must already be present.
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| UpkeepError::MissingConfigError {
                field: "token".to_string(),
            })?;

        Self::new(
            config.api_base_url(),
            TrelloCredentials {
                app_key: config.app_key.clone(),
                token,
            },
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[
            ("key", self.credentials.app_key.as_str()),
            ("token", self.credentials.token.as_str()),
        ])
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fields: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("fields", fields)])
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        let body = check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".into());

    if status == StatusCode::UNAUTHORIZED {
        return Err(UpkeepError::AuthError { message });
    }
    Err(UpkeepError::RemoteError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait::async_trait]
impl BoardClient for TrelloClient {
    async fn list_lists(&self, board_id: &str) -> Result<Vec<BoardList>> {
        self.get_json(&format!("/boards/{}/lists", board_id), LIST_FIELDS)
            .await
    }

    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        self.get_json(&format!("/lists/{}/cards", list_id), CARD_FIELDS)
            .await
    }

    async fn update_card(&self, card_id: &str, update: &CardUpdate) -> Result<()> {
        let params = update.to_params();
        if params.is_empty() {
            return Ok(());
        }

        let url = format!("{}/cards/{}", self.base_url, card_id);
        tracing::debug!("Updating card {} ({} fields)", card_id, params.len());

        let response = self
            .authorized(self.client.put(&url))
            .query(&params)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
