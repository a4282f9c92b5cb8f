use crate::client::Client;
use crate::error::{ensure_range, Error, Result};
use crate::paginate::MAX_PAGE_SIZE;
use crate::request::RequestDescriptor;
use crate::types::{CampaignSchedule, CampaignSettings, CampaignStatus, StatisticsQuery};
use chrono::NaiveDate;
use serde_json::Value;

/// Highest sequence step the statistics filter accepts.
const MAX_EMAIL_SEQUENCE_NUMBER: u8 = 4;

impl Client {
    /// Create a new campaign.
    pub async fn create_campaign(&self, name: &str, client_id: Option<u64>) -> Result<Value> {
        let request = RequestDescriptor::post("campaigns/create")
            .body_field("name", name)
            .body_field("client_id", client_id);
        self.execute(&request).await
    }

    /// Get a campaign by ID.
    pub async fn get_campaign(&self, campaign_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!("campaigns/{}", campaign_id)))
            .await
    }

    /// List all campaigns.
    pub async fn list_campaigns(&self) -> Result<Value> {
        self.execute(&RequestDescriptor::get("campaigns")).await
    }

    /// Get the email sequence of a campaign.
    pub async fn get_campaign_sequence(&self, campaign_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "campaigns/{}/sequences",
            campaign_id
        )))
        .await
    }

    /// Replace the sending schedule of a campaign.
    pub async fn update_campaign_schedule(
        &self,
        campaign_id: u64,
        schedule: &CampaignSchedule,
    ) -> Result<Value> {
        for day in &schedule.days_of_the_week {
            ensure_range("days_of_the_week", *day, 0, 6)?;
        }
        let request = RequestDescriptor::post(format!("campaigns/{}/schedule", campaign_id))
            .json_body(schedule)?;
        self.execute(&request).await
    }

    /// Update the general settings of a campaign.
    pub async fn update_campaign_settings(
        &self,
        campaign_id: u64,
        settings: &CampaignSettings,
    ) -> Result<Value> {
        ensure_range("follow_up_percentage", settings.follow_up_percentage, 0, 100)?;
        let request = RequestDescriptor::post(format!("campaigns/{}/settings", campaign_id))
            .json_body(settings)?;
        self.execute(&request).await
    }

    /// Start, pause or stop a campaign.
    pub async fn update_campaign_status(
        &self,
        campaign_id: u64,
        status: CampaignStatus,
    ) -> Result<Value> {
        let request = RequestDescriptor::post(format!("campaigns/{}/status", campaign_id))
            .body_field("status", status);
        self.execute(&request).await
    }

    /// Delete a campaign.
    pub async fn delete_campaign(&self, campaign_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::delete(format!("campaigns/{}", campaign_id)))
            .await
    }

    /// List the email accounts sending for a campaign.
    pub async fn list_campaign_email_accounts(&self, campaign_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "campaigns/{}/email-accounts",
            campaign_id
        )))
        .await
    }

    /// Attach email accounts to a campaign.
    pub async fn add_email_accounts_to_campaign(
        &self,
        campaign_id: u64,
        email_account_ids: &[u64],
    ) -> Result<Value> {
        let request = RequestDescriptor::post(format!("campaigns/{}/email-accounts", campaign_id))
            .body_field("email_account_ids", email_account_ids.to_vec());
        self.execute(&request).await
    }

    /// Detach email accounts from a campaign.
    pub async fn remove_email_accounts_from_campaign(
        &self,
        campaign_id: u64,
        email_account_ids: &[u64],
    ) -> Result<Value> {
        let request =
            RequestDescriptor::delete(format!("campaigns/{}/email-accounts", campaign_id))
                .body_field("email_account_ids", email_account_ids.to_vec());
        self.execute(&request).await
    }

    /// Get per-email statistics of a campaign.
    pub async fn get_campaign_statistics(
        &self,
        campaign_id: u64,
        query: &StatisticsQuery,
    ) -> Result<Value> {
        let limit = query.limit.unwrap_or(MAX_PAGE_SIZE);
        ensure_range("limit", limit, 1, MAX_PAGE_SIZE)?;
        if let Some(step) = query.email_sequence_number {
            ensure_range("email_sequence_number", step, 0, MAX_EMAIL_SEQUENCE_NUMBER)?;
        }

        let request = RequestDescriptor::get(format!("campaigns/{}/statistics", campaign_id))
            .query("offset", query.offset)
            .query("limit", limit)
            .query("email_sequence_number", query.email_sequence_number)
            .query("email_status", query.email_status);
        self.execute(&request).await
    }

    /// Get the top-level analytics summary of a campaign.
    pub async fn get_campaign_analytics(&self, campaign_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "campaigns/{}/analytics",
            campaign_id
        )))
        .await
    }

    /// Get campaign analytics between two dates, inclusive.
    pub async fn get_campaign_analytics_by_date(
        &self,
        campaign_id: u64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Value> {
        if start_date > end_date {
            return Err(Error::Validation(format!(
                "start_date {} is after end_date {}",
                start_date, end_date
            )));
        }

        let request =
            RequestDescriptor::get(format!("campaigns/{}/analytics-by-date", campaign_id))
                .query("start_date", start_date.format("%Y-%m-%d").to_string())
                .query("end_date", end_date.format("%Y-%m-%d").to_string());
        self.execute(&request).await
    }
}
