//! Outbound delivery sink for lifecycle notifications.
//!
//! One message in, at most one HTTP POST out. Delivery is best-effort and
//! fire-and-forget: the caller never sees a result, failures are logged and
//! discarded, nothing is retried or queued, and deliveries may arrive out of
//! order or not at all. Do not reuse this for anything load-bearing.
//!
//! The sink is enabled only when a complete token/channel credential pair
//! was supplied at construction; otherwise every call is a silent no-op.

use anyhow::{anyhow, Result};
use log::{debug, warn};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::ChannelCredentials;
use crate::logutil::escape_log;

/// Upper bound on one outbound delivery attempt.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the notification channel. Cheap to clone; the underlying HTTP
/// client pools connections.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    creds: Option<ChannelCredentials>,
}

impl Notifier {
    /// Build a sink from credentials. An incomplete pair yields a
    /// permanently disabled sink; there is no runtime re-check.
    pub fn new(creds: ChannelCredentials) -> Self {
        let creds = if creds.is_complete() { Some(creds) } else { None };
        Self {
            client: reqwest::Client::new(),
            creds,
        }
    }

    /// A sink that drops everything.
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            creds: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.creds.is_some()
    }

    fn endpoint(channel_id: &str) -> String {
        format!("https://discord.com/api/v9/channels/{}/messages", channel_id)
    }

    fn build_request(&self, creds: &ChannelCredentials, content: &str) -> reqwest::RequestBuilder {
        self.client
            .post(Self::endpoint(&creds.channel_id))
            .header("Authorization", format!("Bot {}", creds.token))
            .json(&serde_json::json!({ "content": content }))
    }

    /// Fire-and-forget delivery on the current async runtime. Returns
    /// immediately; the spawned send is never awaited by the caller.
    pub fn post(&self, content: &str) {
        let Some(creds) = &self.creds else {
            return;
        };
        let request = self.build_request(creds, content);
        let preview = escape_log(content);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = Self::deliver(request).await {
                        warn!("notification delivery failed: {}", e);
                    }
                });
                debug!("queued notification: {}", preview);
            }
            Err(_) => {
                warn!("no async runtime; dropped notification: {}", preview);
            }
        }
    }

    /// Awaited delivery, for the CLI and tests. Disabled sinks succeed
    /// without sending.
    pub async fn post_and_wait(&self, content: &str) -> Result<()> {
        let Some(creds) = &self.creds else {
            debug!("notification channel disabled; skipping send");
            return Ok(());
        };
        Self::deliver(self.build_request(creds, content)).await
    }

    async fn deliver(request: reqwest::RequestBuilder) -> Result<()> {
        let response = timeout(DELIVERY_TIMEOUT, request.send())
            .await
            .map_err(|_| anyhow!("request timeout after {}s", DELIVERY_TIMEOUT.as_secs()))?
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "channel endpoint returned status: {}",
                response.status()
            ));
        }
        Ok(())
    }
}
