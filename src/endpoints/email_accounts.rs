use crate::client::Client;
use crate::error::{ensure_range, Result};
use crate::paginate::MAX_PAGE_SIZE;
use crate::request::RequestDescriptor;
use crate::types::{EmailAccountUpdate, NewEmailAccount, WarmupSettings};
use serde_json::Value;

impl Client {
    /// List email accounts, one page at a time.
    pub async fn list_email_accounts(&self, offset: u32, limit: u32) -> Result<Value> {
        ensure_range("limit", limit, 1, MAX_PAGE_SIZE)?;
        let request = RequestDescriptor::get("email-accounts")
            .query("offset", offset)
            .query("limit", limit);
        self.execute(&request).await
    }

    /// Get an email account by ID.
    pub async fn get_email_account(&self, email_account_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "email-accounts/{}/",
            email_account_id
        )))
        .await
    }

    /// Get warmup statistics of an email account.
    pub async fn get_email_account_warmup_stats(&self, email_account_id: u64) -> Result<Value> {
        self.execute(&RequestDescriptor::get(format!(
            "email-accounts/{}/warmup-stats",
            email_account_id
        )))
        .await
    }

    /// Create an email account, or overwrite one when `account.id` is set.
    pub async fn create_email_account(&self, account: &NewEmailAccount) -> Result<Value> {
        if let Some(rate) = account.reply_rate_percentage {
            ensure_range("reply_rate_percentage", rate, 0, 100)?;
        }
        let request = RequestDescriptor::post("email-accounts/save").json_body(account)?;
        self.execute(&request).await
    }

    /// Update sending settings of an email account.
    pub async fn update_email_account(
        &self,
        email_account_id: u64,
        update: &EmailAccountUpdate,
    ) -> Result<Value> {
        let request = RequestDescriptor::post(format!("email-accounts/{}", email_account_id))
            .json_body(update)?;
        self.execute(&request).await
    }

    /// Update warmup settings of an email account.
    pub async fn update_email_account_warmup(
        &self,
        email_account_id: u64,
        warmup: &WarmupSettings,
    ) -> Result<Value> {
        ensure_range("reply_rate_percentage", warmup.reply_rate_percentage, 0, 100)?;
        let request =
            RequestDescriptor::post(format!("email-accounts/{}/warmup", email_account_id))
                .json_body(warmup)?;
        self.execute(&request).await
    }

    /// Ask the API to reconnect every email account that failed to connect.
    pub async fn reconnect_failed_email_accounts(&self) -> Result<Value> {
        self.execute(&RequestDescriptor::post(
            "email-accounts/reconnect-failed-email-accounts",
        ))
        .await
    }
}
