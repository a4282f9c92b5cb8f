use crate::client::Client;
use crate::error::{ensure_range, Error, Result};
use crate::paginate::{paginate, Page, MAX_PAGE_SIZE};
use crate::request::{Payload, RequestDescriptor};
use crate::types::LeadPage;
use serde_json::Value;
use std::collections::HashMap;

impl Client {
    /// Get one page of the leads of a campaign.
    pub async fn get_campaign_leads(
        &self,
        campaign_id: u64,
        offset: u32,
        limit: u32,
    ) -> Result<LeadPage> {
        ensure_range("limit", limit, 1, MAX_PAGE_SIZE)?;
        let request = RequestDescriptor::get(format!("campaigns/{}/leads", campaign_id))
            .query("offset", offset)
            .query("limit", limit);
        self.execute_as(&request).await
    }

    /// Get every lead of a campaign, following pagination.
    pub async fn list_all_campaign_leads(&self, campaign_id: u64) -> Result<Vec<Value>> {
        paginate(MAX_PAGE_SIZE, |offset, limit| async move {
            self.get_campaign_leads(campaign_id, offset, limit)
                .await
                .map(Page::<Value>::from)
        })
        .await
    }

    /// Export the leads of a campaign as the raw CSV the API returns.
    ///
    /// A JSON answer is not an export and is reported as [`Error::UnexpectedJson`].
    pub async fn export_campaign_leads(&self, campaign_id: u64) -> Result<String> {
        let request = RequestDescriptor::get(format!("campaigns/{}/leads-export", campaign_id));
        match self.dispatch(&request, true).await? {
            Payload::Text(text) => Ok(text),
            Payload::Json(value) => Err(Error::UnexpectedJson(value)),
        }
    }

    /// Export the leads of a campaign, one header-to-value map per row.
    ///
    /// Values are kept as the strings found in the export.
    pub async fn export_campaign_lead_rows(
        &self,
        campaign_id: u64,
    ) -> Result<Vec<HashMap<String, String>>> {
        let text = self.export_campaign_leads(campaign_id).await?;
        parse_lead_export(&text)
    }

    /// Find a lead by email address.
    pub async fn get_lead_by_email(&self, email: &str) -> Result<Value> {
        let request = RequestDescriptor::get("leads/").query("email", email);
        self.execute(&request).await
    }

    /// List the campaigns a lead belongs to.
    pub async fn list_lead_campaigns(&self, lead_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!("leads/{}/campaigns", lead_id)))
            .await
    }

    /// List all lead categories.
    pub async fn list_lead_categories(&self) -> Result<Value> {
        self.execute(&RequestDescriptor::get("leads/fetch-categories"))
            .await
    }

    /// Get the message history of a lead within a campaign.
    pub async fn get_lead_message_history(&self, campaign_id: u64, lead_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "campaigns/{}/leads/{}/message-history",
            campaign_id, lead_id
        )))
        .await
    }

    /// Pause a lead in a campaign.
    pub async fn pause_lead(&self, campaign_id: u64, lead_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::post(format!(
            "campaigns/{}/leads/{}/pause",
            campaign_id, lead_id
        )))
        .await
    }

    /// Resume a paused lead in a campaign.
    pub async fn resume_lead(&self, campaign_id: u64, lead_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::post(format!(
            "campaigns/{}/leads/{}/resume",
            campaign_id, lead_id
        )))
        .await
    }

    /// Remove a lead from a campaign.
    pub async fn delete_lead(&self, campaign_id: u64, lead_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::delete(format!(
            "campaigns/{}/leads/{}",
            campaign_id, lead_id
        )))
        .await
    }

    /// Unsubscribe a lead from a campaign.
    pub async fn unsubscribe_lead(&self, campaign_id: u64, lead_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::post(format!(
            "campaigns/{}/leads/{}/unsubscribe",
            campaign_id, lead_id
        )))
        .await
    }

    /// Move a lead to another category, optionally pausing it.
    pub async fn update_lead_category(
        &self,
        campaign_id: u64,
        lead_id: u64,
        category_id: u64,
        pause_lead: bool,
    ) -> Result<Value> {
        let request = RequestDescriptor::post(format!(
            "campaigns/{}/leads/{}/category",
            campaign_id, lead_id
        ))
        .body_field("category_id", category_id)
        .body_field("pause_lead", pause_lead);
        self.execute(&request).await
    }

    /// Block email addresses or whole domains, globally or for one client.
    pub async fn add_to_global_block_list(
        &self,
        entries: &[String],
        client_id: Option<u64>,
    ) -> Result<Value> {
        let request = RequestDescriptor::post("leads/add-domain-block-list")
            .body_field("domain_block_list", entries.to_vec())
            .body_field("client_id", client_id);
        self.execute(&request).await
    }
}

fn parse_lead_export(text: &str) -> Result<Vec<HashMap<String, String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
