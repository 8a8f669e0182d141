//! REST client for the platform's v1.1 API, plus the polling status
//! source the bot consumes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::platform::model::Status;
use crate::platform::oauth::OauthKeys;
use crate::platform::{Platform, StatusStream};

const API_BASE: &str = "https://api.twitter.com/1.1";

/// How many statuses one timeline poll requests.
const POLL_PAGE_SIZE: usize = 50;

/// Signed REST client. Cheap to clone; the credentials are shared.
#[derive(Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
    keys: Arc<OauthKeys>,
}

impl TwitterClient {
    pub fn new(keys: OauthKeys) -> Self {
        Self {
            client: reqwest::Client::new(),
            keys: Arc::new(keys),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{API_BASE}/{path}")
    }

    /// Confirm the credentials work. Returns the authenticated
    /// account's screen name.
    pub async fn verify(&self) -> Result<String, PlatformError> {
        let me: serde_json::Value = self
            .get_json("account/verify_credentials.json", &[])
            .await?;
        Ok(me
            .get("screen_name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown")
            .to_string())
    }

    /// Poll an account's timeline and expose new statuses as a stream,
    /// oldest first. The cursor seeds from the newest existing status,
    /// so only posts made after startup flow out. Poll failures are
    /// logged and retried on the next tick.
    pub fn watch(&self, user_id: &str, interval: Duration) -> StatusStream {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let client = self.clone();
        let user_id = user_id.to_string();

        tokio::spawn(async move {
            let mut since_id = match client.timeline(&user_id, 1, None).await {
                Ok(seed) => seed.first().map(|s| s.id.clone()),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not seed the timeline cursor");
                    None
                }
            };

            tracing::info!(user_id = %user_id, "Watching timeline for new statuses");

            loop {
                tokio::time::sleep(interval).await;

                let page = match client
                    .timeline(&user_id, POLL_PAGE_SIZE, since_id.as_deref())
                    .await
                {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!(error = %e, "Timeline poll failed");
                        continue;
                    }
                };

                // Until a cursor exists, a page only seeds it — the bot
                // reposts statuses made after startup, not history
                if since_id.is_none() {
                    since_id = page.first().map(|s| s.id.clone());
                    continue;
                }

                if let Some(newest) = page.first() {
                    since_id = Some(newest.id.clone());
                }

                // Pages arrive most recent first; forward oldest first
                for status in page.into_iter().rev() {
                    if tx.send(status).is_err() {
                        tracing::info!("Status stream closed");
                        return;
                    }
                }
            }
        });

        let stream =
            futures::stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|s| (s, rx)) });

        Box::pin(stream)
    }

    async fn timeline(
        &self,
        user_id: &str,
        count: usize,
        since_id: Option<&str>,
    ) -> Result<Vec<Status>, PlatformError> {
        let count = count.to_string();
        let mut params = vec![
            ("user_id", user_id),
            ("count", count.as_str()),
            ("tweet_mode", "extended"),
        ];
        if let Some(since) = since_id {
            params.push(("since_id", since));
        }
        self.get_json("statuses/user_timeline.json", &params).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlatformError> {
        let url = self.api_url(path);
        let auth = self.keys.authorization("GET", &url, params);
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .query(params)
            .send()
            .await?;
        Self::decode(path, resp).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlatformError> {
        let url = self.api_url(path);
        let auth = self.keys.authorization("POST", &url, params);
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .form(params)
            .send()
            .await?;
        Self::decode(path, resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, PlatformError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ── Platform trait implementation ───────────────────────────────────

#[async_trait]
impl Platform for TwitterClient {
    async fn status(&self, id: &str) -> Result<Status, PlatformError> {
        self.get_json(
            "statuses/show.json",
            &[("id", id), ("tweet_mode", "extended")],
        )
        .await
    }

    async fn user_timeline(
        &self,
        user_id: &str,
        count: usize,
    ) -> Result<Vec<Status>, PlatformError> {
        self.timeline(user_id, count, None).await
    }

    async fn publish(&self, text: &str, in_reply_to: Option<&str>) -> Result<(), PlatformError> {
        let mut params = vec![("status", text)];
        if let Some(id) = in_reply_to {
            params.push(("in_reply_to_status_id", id));
            params.push(("auto_populate_reply_metadata", "true"));
        }
        let _: serde_json::Value = self.post_json("statuses/update.json", &params).await?;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
