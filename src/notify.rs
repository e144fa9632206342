use crate::error::FinderError;
use crate::model::RecipeRecord;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Accent color of the embed (a warm red).
pub const EMBED_COLOR: u32 = 15548997;
/// Text shown under every forwarded recipe.
pub const EMBED_DESCRIPTION: &str = "今日の献立案です！";

/// Somewhere a chosen recipe can be forwarded to.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipe: &RecipeRecord) -> Result<(), FinderError>;
}

/// Posts recipes as rich embeds to a Discord-compatible webhook.
pub struct DiscordWebhook {
    client: Client,
    webhook_url: String,
}

impl DiscordWebhook {
    pub fn new(webhook_url: String, timeout: Option<Duration>) -> Result<Self, FinderError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .build()?;

        Ok(DiscordWebhook {
            client,
            webhook_url,
        })
    }
}

/// The fixed-shape message body for one recipe.
pub fn embed_payload(recipe: &RecipeRecord) -> Value {
    json!({
        "embeds": [{
            "title": recipe.title,
            "url": recipe.url,
            "image": {"url": recipe.image_url},
            "description": EMBED_DESCRIPTION,
            "color": EMBED_COLOR
        }]
    })
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify(&self, recipe: &RecipeRecord) -> Result<(), FinderError> {
        debug!("Posting recipe {} to webhook", recipe.id);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&embed_payload(recipe))
            .send()
            .await
            .map_err(|e| FinderError::Notification(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FinderError::Notification(format!(
                "webhook returned {}: {}",
                status, error_text
            )));
        }

        info!("Sent \"{}\" to webhook", recipe.title);
        Ok(())
    }
}
