//! API types for the Smartlead client.

use crate::paginate::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:tt, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string the API uses for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::String(value.as_str().to_string())
            }
        }
    };
}

wire_enum! {
    /// Tracking that can be switched off for a campaign.
    pub enum TrackSetting {
        DontTrackEmailOpen => "DONT_TRACK_EMAIL_OPEN",
        DontTrackLinkClick => "DONT_TRACK_LINK_CLICK",
        DontTrackReplyToAnEmail => "DONT_TRACK_REPLY_TO_AN_EMAIL",
    }
}

wire_enum! {
    /// Lead action that stops the sequence for that lead.
    pub enum StopLeadSetting {
        ClickOnALink => "CLICK_ON_A_LINK",
        OpenAnEmail => "OPEN_AN_EMAIL",
        ReplyToAnEmail => "REPLY_TO_AN_EMAIL",
    }
}

wire_enum! {
    /// Email status filter for campaign statistics.
    pub enum EmailStatus {
        Opened => "opened",
        Clicked => "clicked",
        Replied => "replied",
        Unsubscribed => "unsubscribed",
        Bounced => "bounced",
    }
}

wire_enum! {
    /// Campaign lifecycle status.
    pub enum CampaignStatus {
        Paused => "PAUSED",
        Stopped => "STOPPED",
        Completed => "COMPLETED",
        Active => "ACTIVE",
        Drafted => "DRAFTED",
        /// Start a drafted or paused campaign.
        Start => "START",
    }
}

wire_enum! {
    /// Events a webhook can subscribe to.
    pub enum WebhookEventType {
        EmailSent => "EMAIL_SENT",
        EmailOpen => "EMAIL_OPEN",
        EmailLinkClick => "EMAIL_LINK_CLICK",
        EmailReply => "EMAIL_REPLY",
        LeadUnsubscribed => "LEAD_UNSUBSCRIBED",
        LeadCategoryUpdated => "LEAD_CATEGORY_UPDATED",
    }
}

wire_enum! {
    /// Permissions granted to a client account.
    pub enum ClientPermission {
        ReplyMasterInbox => "reply_master_inbox",
        FullAccess => "full_access",
    }
}

/// Sending schedule of a campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSchedule {
    /// IANA timezone name, e.g. `America/Los_Angeles`.
    pub timezone: String,
    /// Sending days, Monday = 0 through Sunday = 6.
    pub days_of_the_week: Vec<u8>,
    /// Start of the sending window, e.g. `09:00`.
    pub start_hour: String,
    /// End of the sending window, e.g. `17:30`.
    pub end_hour: String,
    /// Minimum minutes between two emails.
    pub min_time_between_emails: u32,
    /// Maximum number of new leads contacted per day.
    pub max_new_leads_per_day: u32,
    /// When the schedule takes effect.
    pub schedule_start_time: DateTime<Utc>,
}

/// General settings of a campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSettings {
    /// Tracking to disable.
    pub track_settings: Vec<TrackSetting>,
    /// Lead action that stops the sequence.
    pub stop_lead_settings: StopLeadSetting,
    /// Unsubscribe footer text.
    pub unsubscribe_text: String,
    /// Send emails without HTML.
    pub send_as_plain_text: bool,
    /// Share of leads that receive follow-ups, 0 to 100.
    pub follow_up_percentage: u8,
    /// Owning client.
    pub client_id: Option<u64>,
    /// Match sender and recipient email providers.
    pub enable_ai_esp_matching: bool,
}

/// Filters for campaign statistics.
#[derive(Debug, Clone, Default)]
pub struct StatisticsQuery {
    /// Pagination offset.
    pub offset: u32,
    /// Page size, 1 to 100. Defaults to 100 when unset.
    pub limit: Option<u32>,
    /// Sequence step, 0 to 4.
    pub email_sequence_number: Option<u8>,
    /// Only emails with this status.
    pub email_status: Option<EmailStatus>,
}

/// A new email account (or an existing one, when `id` is set).
#[derive(Debug, Clone, Serialize, Default)]
pub struct NewEmailAccount {
    /// Existing account to overwrite.
    pub id: Option<u64>,
    pub from_name: String,
    pub from_email: String,
    pub user_name: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub imap_host: String,
    pub imap_port: u16,
    pub max_emails_per_day: u32,
    pub custom_tracking_url: String,
    pub bcc: String,
    pub signature: String,
    pub warmup_enabled: bool,
    pub total_warmup_per_day: Option<u32>,
    pub daily_rampup: Option<u32>,
    /// Warmup reply rate, 0 to 100.
    pub reply_rate_percentage: Option<u8>,
    pub client_id: Option<u64>,
}

/// Changes to an email account.
#[derive(Debug, Clone, Serialize, Default)]
pub struct EmailAccountUpdate {
    pub max_emails_per_day: u32,
    pub custom_tracking_url: String,
    pub bcc: String,
    pub signature: String,
    pub client_id: Option<u64>,
    pub time_to_wait_in_mins: Option<u32>,
}

/// Warmup configuration of an email account.
#[derive(Debug, Clone, Serialize)]
pub struct WarmupSettings {
    pub warmup_enabled: bool,
    pub total_warmup_per_day: u32,
    pub daily_rampup: u32,
    /// Warmup reply rate, 0 to 100.
    pub reply_rate_percentage: u8,
    pub warmup_key_id: String,
}

/// A campaign webhook. Omitting `id` creates a new one.
#[derive(Debug, Clone, Serialize)]
pub struct Webhook {
    pub id: Option<u64>,
    pub name: String,
    pub webhook_url: String,
    pub event_types: Vec<WebhookEventType>,
    pub categories: Vec<String>,
}

/// A client account to add under the agency.
#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(rename = "permission")]
    pub permissions: Vec<ClientPermission>,
    pub logo: String,
    pub logo_url: Option<String>,
    pub password: String,
}

/// One page of campaign leads.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadPage {
    /// Total leads in the campaign.
    #[serde(deserialize_with = "count_from_number_or_string")]
    pub total_leads: u64,
    /// Leads in this page.
    #[serde(default)]
    pub data: Vec<Value>,
}

impl From<LeadPage> for Page<Value> {
    fn from(page: LeadPage) -> Self {
        Page {
            total_count: page.total_leads,
            records: page.data,
        }
    }
}

/// The API reports some counts as strings.
fn count_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(EmailStatus::Opened.as_str(), "opened");
        assert_eq!(
            serde_json::to_value(TrackSetting::DontTrackLinkClick).unwrap(),
            json!("DONT_TRACK_LINK_CLICK")
        );
        assert_eq!(Value::from(CampaignStatus::Start), json!("START"));
        assert_eq!(ClientPermission::FullAccess.to_string(), "full_access");
        assert_eq!(WebhookEventType::ALL.len(), 6);

        let parsed: StopLeadSetting = serde_json::from_value(json!("OPEN_AN_EMAIL")).unwrap();
        assert_eq!(parsed, StopLeadSetting::OpenAnEmail);
    }

    #[test]
    fn test_lead_page_total_as_string_or_number() {
        let page: LeadPage =
            serde_json::from_value(json!({"total_leads": "250", "data": [{"id": 1}]})).unwrap();
        assert_eq!(page.total_leads, 250);
        assert_eq!(page.data.len(), 1);

        let page: LeadPage = serde_json::from_value(json!({"total_leads": 3})).unwrap();
        assert_eq!(page.total_leads, 3);
        assert!(page.data.is_empty());

        assert!(serde_json::from_value::<LeadPage>(json!({"total_leads": "many"})).is_err());
    }

    #[test]
    fn test_new_client_renames_permissions() {
        let client = NewClient {
            name: "Acme".into(),
            email: "ops@acme.test".into(),
            permissions: vec![ClientPermission::ReplyMasterInbox],
            logo: "Acme".into(),
            logo_url: None,
            password: "hunter2".into(),
        };
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["permission"], json!(["reply_master_inbox"]));
        assert!(value.get("permissions").is_none());
    }
}
