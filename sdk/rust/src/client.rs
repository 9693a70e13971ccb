//! Async client for the signalling relay's HTTP surface.

use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid relay URL: {0}")]
    Url(String),

    #[error("relay returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },
}

/// Body of the health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub room: Option<String>,
}

/// Detail the relay sends when no offer has been published for a room.
const OFFER_NOT_FOUND: &str = "Offer not found";

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct SignalClient {
    client: Client,
    base_url: String,
    prefix: String,
}

impl SignalClient {
    /// `base_url` like `http://127.0.0.1:8000`; `prefix` is the relay's path prefix.
    pub fn new(base_url: &str, prefix: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.to_string(),
        }
    }

    /// `base_url` joined with `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn resource_url(&self, room_id: &str, resource: &str) -> Result<Url, ClientError> {
        self.url(&[self.prefix.as_str(), room_id, resource])
    }

    /// Publish the offer for `room_id`.
    pub async fn put_offer(&self, room_id: &str, sdp: &str) -> Result<(), ClientError> {
        self.put(room_id, "offer", sdp).await
    }

    /// Fetch the offer for `room_id`; `None` until one is published.
    ///
    /// Any other 404 (wrong prefix, bad path) is an error.
    pub async fn get_offer(&self, room_id: &str) -> Result<Option<String>, ClientError> {
        let resp = self
            .client
            .get(self.resource_url(room_id, "offer")?)
            .send()
            .await?;
        if resp.status() == StatusCode::OK {
            return Ok(Some(resp.text().await?));
        }
        match status_error(resp).await {
            ClientError::Status { status, detail }
                if status == StatusCode::NOT_FOUND && detail == OFFER_NOT_FOUND =>
            {
                Ok(None)
            }
            err => Err(err),
        }
    }

    /// Publish the answer for `room_id`.
    pub async fn put_answer(&self, room_id: &str, sdp: &str) -> Result<(), ClientError> {
        self.put(room_id, "answer", sdp).await
    }

    /// Consume the answer for `room_id`; `None` if nothing is waiting.
    pub async fn take_answer(&self, room_id: &str) -> Result<Option<String>, ClientError> {
        let resp = self
            .client
            .delete(self.resource_url(room_id, "answer")?)
            .send()
            .await?;
        match resp.status() {
            StatusCode::OK => Ok(Some(resp.text().await?)),
            StatusCode::NO_CONTENT => Ok(None),
            _ => Err(status_error(resp).await),
        }
    }

    /// Check liveness, optionally scoped to a room.
    pub async fn health(&self, room_id: Option<&str>) -> Result<HealthStatus, ClientError> {
        let url = match room_id {
            Some(room) => self.url(&[self.prefix.as_str(), room, "health"])?,
            None => self.url(&["health"])?,
        };
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn put(&self, room_id: &str, resource: &str, sdp: &str) -> Result<(), ClientError> {
        let resp = self
            .client
            .put(self.resource_url(room_id, resource)?)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(sdp.to_string())
            .send()
            .await?;
        if resp.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(status_error(resp).await)
        }
    }
}

async fn status_error(resp: Response) -> ClientError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.detail)
        .unwrap_or(text);
    ClientError::Status { status, detail }
}
