//! Posting to Twitter through the v2 API with an OAuth 2.0 user token.

use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use reqwest::Response;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::{config::TwitterConfig, utils::truncate};

use super::PlatformError;

const PLATFORM: &str = "Twitter";

/// Longest tweet accepted.
pub const TWEET_LENGTH: usize = 280;

/// The outward calls the twitter handler makes.
#[async_trait]
pub trait TwitterApi: Send + Sync + 'static {
    async fn post_text(&self, text: &str) -> Result<(), PlatformError>;

    async fn post_photo(&self, caption: &str, content: &[u8]) -> Result<(), PlatformError>;
}

#[derive(Debug, Deserialize)]
struct Media {
    media_id_string: String,
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    config: TwitterConfig,
}

impl TwitterClient {
    pub fn new(config: TwitterConfig) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    async fn tweet(&self, body: Value) -> Result<(), PlatformError> {
        let response = self
            .http
            .post(format!("{}/2/tweets", self.config.api_url))
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn upload(&self, content: &[u8]) -> Result<String, PlatformError> {
        let response = self
            .http
            .post(format!("{}/1.1/media/upload.json", self.config.upload_url))
            .bearer_auth(&self.config.access_token)
            .form(&[("media_data", BASE64_STANDARD.encode(content))])
            .send()
            .await?;

        let media: Media = check(response)
            .await?
            .json()
            .await
            .map_err(|_| PlatformError::InvalidResponse(PLATFORM))?;
        debug!("Uploaded media {}", media.media_id_string);
        Ok(media.media_id_string)
    }
}

async fn check(response: Response) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = response.text().await.unwrap_or_default();
    Err(PlatformError::Rejected {
        platform: PLATFORM,
        status: status.as_u16(),
        reason,
    })
}

#[async_trait]
impl TwitterApi for TwitterClient {
    async fn post_text(&self, text: &str) -> Result<(), PlatformError> {
        self.tweet(json!({ "text": truncate(text, TWEET_LENGTH) }))
            .await
    }

    async fn post_photo(&self, caption: &str, content: &[u8]) -> Result<(), PlatformError> {
        let media_id = self.upload(content).await?;
        self.tweet(json!({
            "text": truncate(caption, TWEET_LENGTH),
            "media": { "media_ids": [media_id] },
        }))
        .await
    }
}
