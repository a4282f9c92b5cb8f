//! Main Smartlead client and request dispatch.

use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::rate_limiter::{RateLimiter, DEFAULT_GRACE_INTERVAL, DEFAULT_MIN_INTERVAL};
use crate::request::{Payload, RequestDescriptor};
use crate::version::build_user_agent;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://server.smartlead.ai/api/v1";
const API_KEY_PARAM: &str = "api_key";
const API_KEY_ENV: &str = "SMARTLEAD_API_KEY";
const BASE_URL_ENV: &str = "SMARTLEAD_BASE_URL";

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    min_interval: Duration,
    grace_interval: Duration,
    rate_limiter: Option<Arc<RateLimiter>>,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            min_interval: DEFAULT_MIN_INTERVAL,
            grace_interval: DEFAULT_GRACE_INTERVAL,
            rate_limiter: None,
            user_agent_suffix: None,
        }
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a transport-level request timeout. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the minimum spacing between two requests.
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the pause applied when the minimum spacing has already elapsed.
    pub fn grace_interval(mut self, interval: Duration) -> Self {
        self.grace_interval = interval;
        self
    }

    /// Use an existing rate limiter, e.g. one shared by several clients of
    /// the same account. Overrides `min_interval` and `grace_interval`.
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let credential = Credential::new(self.api_key)?;

        if !self.base_url.starts_with("https://") {
            warn!(
                base_url = %self.base_url,
                "API base URL is not using HTTPS. The API key will be sent in clear text."
            );
        }

        let mut http = reqwest::Client::builder()
            .user_agent(build_user_agent(self.user_agent_suffix.as_deref()));
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http_client = http.build().map_err(Error::Http)?;

        let rate_limiter = self.rate_limiter.unwrap_or_else(|| {
            Arc::new(RateLimiter::new(self.min_interval, self.grace_interval))
        });

        debug!(credential = ?credential, base_url = %self.base_url, "Smartlead client created");

        Ok(Client {
            credential,
            base_url: self.base_url,
            http_client,
            rate_limiter,
        })
    }
}

/// The Smartlead API client.
///
/// Every call goes through [`Client::dispatch`], which waits on the shared
/// [`RateLimiter`] before sending. Clones share the connection pool and the
/// limiter, so they count as the same client for rate limiting.
///
/// # Example
///
/// ```rust,no_run
/// #[tokio::main]
/// async fn main() -> Result<(), smartlead::Error> {
///     let client = smartlead::Client::builder("your-api-key").build()?;
///
///     let campaigns = client.list_campaigns().await?;
///     println!("{:#}", campaigns);
///
///     let leads = client.list_all_campaign_leads(50318).await?;
///     println!("{} leads", leads.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    credential: Credential,
    base_url: String,
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Build a client from `SMARTLEAD_API_KEY` and, if set, `SMARTLEAD_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", API_KEY_ENV)))?;
        let mut builder = ClientBuilder::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The rate limiter shared by this client and its clones.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Perform one API call.
    ///
    /// The API key is appended to the query, then the call waits for rate
    /// limit admission and is sent. Non-2xx responses become [`Error::Api`]
    /// with the raw body. A 2xx body must be JSON, unless `allow_text_return`
    /// is set, in which case a non-JSON body is returned verbatim as
    /// [`Payload::Text`]. Nothing is retried.
    pub async fn dispatch(
        &self,
        request: &RequestDescriptor,
        allow_text_return: bool,
    ) -> Result<Payload> {
        let url = format!(
            "{}/{}",
            self.base_url,
            request.path().trim_start_matches('/')
        );

        let mut query = request.query_pairs();
        query.retain(|(key, _)| key != API_KEY_PARAM);
        query.push((API_KEY_PARAM.to_string(), self.credential.expose().to_string()));

        let mut builder = self
            .http_client
            .request(request.method().as_reqwest(), &url)
            .header(ACCEPT, "application/json")
            .query(&query);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        self.rate_limiter.acquire().await;

        let started = Instant::now();
        let response = builder.send().await.map_err(Error::from_transport)?;
        let status = response.status();
        debug!(
            method = %request.method(),
            path = request.path(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Smartlead request completed"
        );

        if !status.is_success() {
            let err = Error::from_response(response).await;
            warn!(
                method = %request.method(),
                path = request.path(),
                status = status.as_u16(),
                "Smartlead API returned an error"
            );
            return Err(err);
        }

        let body = response.text().await.map_err(Error::from_transport)?;
        decode_payload(body, allow_text_return)
    }

    /// Dispatch a call whose response must be JSON.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Value> {
        self.dispatch(request, false).await?.into_json()
    }

    /// Dispatch a call and deserialize its JSON response.
    pub(crate) async fn execute_as<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T> {
        let value = self.execute(request).await?;
        serde_json::from_value(value).map_err(Error::Json)
    }
}

/// Decode a successful response body.
fn decode_payload(body: String, allow_text_return: bool) -> Result<Payload> {
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => Ok(Payload::Json(value)),
        Err(_) if allow_text_return => Ok(Payload::Text(body)),
        Err(source) => Err(Error::Decode { source, body }),
    }
}
