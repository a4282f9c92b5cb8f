use crate::client::Client;
use crate::error::Result;
use crate::request::RequestDescriptor;
use crate::types::Webhook;
use serde_json::Value;

impl Client {
    /// List the webhooks of a campaign.
    pub async fn list_campaign_webhooks(&self, campaign_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "campaigns/{}/webhooks",
            campaign_id
        )))
        .await
    }

    /// Create a campaign webhook, or update it when `webhook.id` is set.
    pub async fn upsert_campaign_webhook(
        &self,
        campaign_id: u64,
        webhook: &Webhook,
    ) -> Result<Value> {
        let request = RequestDescriptor::post(format!("campaigns/{}/webhooks", campaign_id))
            .json_body(webhook)?;
        self.execute(&request).await
    }

    /// Delete a campaign webhook.
    pub async fn delete_campaign_webhook(
        &self,
        campaign_id: u64,
        webhook_id: u64,
    ) -> Result<Value> {
        let request = RequestDescriptor::delete(format!("campaigns/{}/webhooks", campaign_id))
            .body_field("id", webhook_id);
        self.execute(&request).await
    }
}
