//! RIPEstat Data API client
//!
//! [`RipeStat`] is the configured entry point: it owns the HTTP connection
//! pool, the attribution and overload settings that ride along on every
//! request, and the retry policy. One data-call method exists per supported
//! call; each returns a typed response (or a request builder for calls with
//! optional parameters).

use std::net::IpAddr;
use std::time::Duration;

use ipnet::IpNet;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, instrument, trace, warn};
use url::Url;

use crate::data_calls::abuse_contact_finder::{self, AbuseContacts};
use crate::data_calls::address_space_hierarchy::{self, AddressSpaceHierarchy};
use crate::data_calls::announced_prefixes::AnnouncedPrefixesRequest;
use crate::data_calls::asn_neighbours::AsnNeighboursRequest;
use crate::data_calls::looking_glass::{self, LookingGlass};
use crate::data_calls::network_info::{self, NetworkInfo};
use crate::data_calls::ris_peers::RisPeersRequest;
use crate::data_calls::routing_history::RoutingHistoryRequest;
use crate::data_calls::rpki_validation_status::{self, RpkiValidationStatus};
use crate::data_calls::whats_my_ip::{self, WhatsMyIp};
use crate::error::{Error, Result};
use crate::response::{ApiResponse, Severity};
use crate::types::Resource;

/// Public endpoint of the RIPEstat Data API
pub const DEFAULT_BASE_URL: &str = "https://stat.ripe.net/data";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum retries (0 = no retries)
const DEFAULT_MAX_RETRIES: u32 = 0;

/// Default initial backoff in milliseconds
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;

/// Default maximum backoff in milliseconds
const DEFAULT_MAX_BACKOFF_MS: u64 = 10_000;

/// Default backoff multiplier
const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Default jitter factor (0.0 to 1.0)
const DEFAULT_JITTER_FACTOR: f64 = 0.1;

/// Server-side data overload protection setting.
///
/// The soft limit exists to protect browser-based widgets from oversized
/// responses. Non-browser clients can suppress it, in which case
/// `data_overload_limit=ignore` is sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataOverloadLimit {
    /// Leave the server-side soft limit active
    #[default]
    Default,
    /// Suppress the soft limit check
    Ignore,
}

/// Client for the RIPEstat Data API
///
/// # Example
///
/// ```no_run
/// use ripestat_client::RipeStat;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ripe = RipeStat::builder()
///     .sourceapp("my-project")
///     .build()?;
///
/// let prefixes = ripe.announced_prefixes(3333).fetch().await?;
/// for announced in &prefixes {
///     println!("{}: {} intervals", announced.prefix, announced.timelines.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RipeStat {
    client: Client,
    base_url: Url,
    sourceapp: Option<String>,
    data_overload_limit: DataOverloadLimit,
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
    backoff_multiplier: f64,
    jitter_factor: f64,
}

impl RipeStat {
    /// Create a client with default configuration against the public API.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> RipeStatBuilder {
        RipeStatBuilder::default()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured `sourceapp` attribution tag, if any.
    pub fn sourceapp(&self) -> Option<&str> {
        self.sourceapp.as_deref()
    }

    /// The configured overload limit setting.
    pub fn data_overload_limit(&self) -> DataOverloadLimit {
        self.data_overload_limit
    }

    // ---- data calls -----------------------------------------------------

    /// Announced prefixes for an ASN, optionally restricted to a time range.
    pub fn announced_prefixes(&self, resource: u32) -> AnnouncedPrefixesRequest<'_> {
        AnnouncedPrefixesRequest::new(self, resource)
    }

    /// Observed ASN neighbours, optionally with per-path details.
    pub fn asn_neighbours(&self, resource: u32) -> AsnNeighboursRequest<'_> {
        AsnNeighboursRequest::new(self, resource)
    }

    /// RIS peers grouped by route collector, optionally at a point in time.
    pub fn ris_peers(&self) -> RisPeersRequest<'_> {
        RisPeersRequest::new(self)
    }

    /// Announcement history for an ASN or prefix.
    pub fn routing_history(&self, resource: impl Into<Resource>) -> RoutingHistoryRequest<'_> {
        RoutingHistoryRequest::new(self, resource.into())
    }

    /// BGP routing table views for a prefix, from the RIS route collectors.
    pub async fn looking_glass(&self, prefix: IpNet) -> Result<LookingGlass> {
        looking_glass::fetch(self, prefix).await
    }

    /// RPKI validity state for an ASN/prefix combination.
    pub async fn rpki_validation_status(
        &self,
        resource: u32,
        prefix: IpNet,
    ) -> Result<RpkiValidationStatus> {
        rpki_validation_status::fetch(self, resource, prefix).await
    }

    /// Containing prefix and announcing ASNs for an IP address.
    pub async fn network_info(&self, resource: IpAddr) -> Result<NetworkInfo> {
        network_info::fetch(self, resource).await
    }

    /// The caller's public IP address, as seen by the API.
    pub async fn whats_my_ip(&self) -> Result<WhatsMyIp> {
        whats_my_ip::fetch(self).await
    }

    /// Abuse contact information for an ASN, IP address or prefix.
    pub async fn abuse_contact_finder(
        &self,
        resource: impl Into<Resource>,
    ) -> Result<AbuseContacts> {
        abuse_contact_finder::fetch(self, resource.into()).await
    }

    /// Address space objects (inetnum/inet6num) around a prefix.
    pub async fn address_space_hierarchy(&self, resource: IpNet) -> Result<AddressSpaceHierarchy> {
        address_space_hierarchy::fetch(self, resource).await
    }

    // ---- request path ---------------------------------------------------

    /// Retrieve `{base}/{call}/data.json` with the given query parameters,
    /// the client-level parameters appended.
    #[instrument(skip(self, params))]
    pub(crate) async fn get(
        &self,
        call: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<ApiResponse> {
        if self.data_overload_limit == DataOverloadLimit::Ignore {
            params.push(("data_overload_limit", "ignore".to_owned()));
        }
        if let Some(sourceapp) = &self.sourceapp {
            params.push(("sourceapp", sourceapp.clone()));
        }

        let mut url = Url::parse(&format!(
            "{}/{call}/data.json",
            self.base_url.as_str().trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self.execute_with_retry(url).await?;
        let http_status = response.status();
        let body = response.text().await?;

        // Error statuses still carry the envelope with server-side messages;
        // fall back to a bare status error when the body is not the envelope.
        let envelope: ApiResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(source) => {
                if http_status.is_success() {
                    return Err(Error::Json(source));
                }
                return Err(Error::HttpStatus {
                    status: http_status.as_u16(),
                });
            }
        };

        for message in &envelope.messages {
            match message.severity {
                Severity::Info => debug!(call, "{message}"),
                _ => warn!(call, "{message}"),
            }
        }

        if !envelope.is_ok() {
            return Err(Error::ApiStatus {
                status: envelope.status,
                status_code: envelope.status_code,
                messages: envelope.messages,
            });
        }

        Ok(envelope)
    }

    /// Execute an HTTP request with retry logic
    async fn execute_with_retry(&self, url: Url) -> Result<reqwest::Response> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = self.calculate_backoff(attempt - 1);
                debug!("Retry attempt {} after {:?} backoff", attempt, backoff);
                sleep(backoff).await;
            }

            trace!("GET {} (attempt {})", url, attempt + 1);

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    trace!("Response status: {status}");

                    if (status.is_server_error()
                        || status == reqwest::StatusCode::TOO_MANY_REQUESTS)
                        && attempt < self.max_retries
                    {
                        warn!(
                            "Request returned {} (attempt {}): will retry",
                            status,
                            attempt + 1
                        );
                        last_error = Some(Error::HttpStatus {
                            status: status.as_u16(),
                        });
                        continue;
                    }

                    return Ok(response);
                }
                Err(source) => {
                    let is_retryable =
                        source.is_connect() || source.is_timeout() || source.is_request();

                    if is_retryable && attempt < self.max_retries {
                        warn!("Request failed (attempt {}): {source}, will retry", attempt + 1);
                        last_error = Some(Error::Http(source));
                    } else {
                        return Err(Error::Http(source));
                    }
                }
            }
        }

        Err(last_error.unwrap_or(Error::HttpStatus { status: 0 }))
    }

    /// Calculate backoff duration with exponential backoff and jitter
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let base_backoff =
            self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let capped_backoff = base_backoff.min(self.max_backoff_ms as f64);

        // Add jitter
        let jitter_range = capped_backoff * self.jitter_factor;
        let jitter = rand::random::<f64>() * 2.0 * jitter_range - jitter_range;
        let final_backoff = (capped_backoff + jitter).max(0.0) as u64;

        Duration::from_millis(final_backoff)
    }
}

/// Builder for [`RipeStat`]
#[derive(Debug, Clone, Default)]
pub struct RipeStatBuilder {
    base_url: Option<String>,
    sourceapp: Option<String>,
    data_overload_limit: DataOverloadLimit,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    client: Option<Client>,
    max_retries: Option<u32>,
    initial_backoff_ms: Option<u64>,
    max_backoff_ms: Option<u64>,
    backoff_multiplier: Option<f64>,
    jitter_factor: Option<f64>,
}

impl RipeStatBuilder {
    /// Override the API base URL (useful for tests and mirrors).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Attribution tag sent as the `sourceapp` parameter on every request.
    ///
    /// RIPE asks regular users of the API to identify their application;
    /// the value is an opaque string such as a project or company name.
    pub fn sourceapp(mut self, sourceapp: impl Into<String>) -> Self {
        self.sourceapp = Some(sourceapp.into());
        self
    }

    /// Suppress the server-side data overload soft limit.
    pub fn ignore_data_overload_limit(mut self) -> Self {
        self.data_overload_limit = DataOverloadLimit::Ignore;
        self
    }

    /// Set the overload limit setting explicitly.
    pub fn data_overload_limit(mut self, limit: DataOverloadLimit) -> Self {
        self.data_overload_limit = limit;
        self
    }

    /// Request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a pre-configured `reqwest::Client` instead of building one.
    ///
    /// Timeout and user agent settings on the builder are ignored in this
    /// case; configure them on the supplied client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Maximum number of retries for failed requests (default 0).
    ///
    /// Only transport errors, HTTP 5xx and 429 are retried.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Initial backoff before the first retry, in milliseconds (default 100).
    pub fn initial_backoff_ms(mut self, initial_backoff_ms: u64) -> Self {
        self.initial_backoff_ms = Some(initial_backoff_ms);
        self
    }

    /// Backoff cap in milliseconds (default 10,000).
    pub fn max_backoff_ms(mut self, max_backoff_ms: u64) -> Self {
        self.max_backoff_ms = Some(max_backoff_ms);
        self
    }

    /// Multiplier applied to the backoff after each retry (default 2.0).
    pub fn backoff_multiplier(mut self, backoff_multiplier: f64) -> Self {
        self.backoff_multiplier = Some(backoff_multiplier);
        self
    }

    /// Jitter factor between 0.0 and 1.0 (default 0.1).
    pub fn jitter_factor(mut self, jitter_factor: f64) -> Self {
        self.jitter_factor = Some(jitter_factor.clamp(0.0, 1.0));
        self
    }

    /// Build the configured client.
    pub fn build(self) -> Result<RipeStat> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder =
                    Client::builder().timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));
                if let Some(user_agent) = &self.user_agent {
                    builder = builder.user_agent(user_agent.clone());
                }
                builder.build()?
            }
        };

        Ok(RipeStat {
            client,
            base_url,
            sourceapp: self.sourceapp,
            data_overload_limit: self.data_overload_limit,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            initial_backoff_ms: self
                .initial_backoff_ms
                .unwrap_or(DEFAULT_INITIAL_BACKOFF_MS),
            max_backoff_ms: self.max_backoff_ms.unwrap_or(DEFAULT_MAX_BACKOFF_MS),
            backoff_multiplier: self
                .backoff_multiplier
                .unwrap_or(DEFAULT_BACKOFF_MULTIPLIER),
            jitter_factor: self.jitter_factor.unwrap_or(DEFAULT_JITTER_FACTOR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration() {
        let client = RipeStat::new().unwrap();
        assert_eq!(client.base_url().as_str(), "https://stat.ripe.net/data");
        assert_eq!(client.sourceapp(), None);
        assert_eq!(client.data_overload_limit(), DataOverloadLimit::Default);
        assert_eq!(client.max_retries, 0);
    }

    #[test]
    fn builder_settings_are_applied() {
        let client = RipeStat::builder()
            .base_url("http://localhost:8080/data")
            .sourceapp("my-project")
            .ignore_data_overload_limit()
            .max_retries(3)
            .build()
            .unwrap();

        assert_eq!(client.sourceapp(), Some("my-project"));
        assert_eq!(client.data_overload_limit(), DataOverloadLimit::Ignore);
        assert_eq!(client.max_retries, 3);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = RipeStat::builder().base_url("not a url").build();
        assert!(result.is_err());
    }

    #[test]
    fn backoff_stays_within_configured_bounds() {
        let client = RipeStat::builder()
            .initial_backoff_ms(100)
            .max_backoff_ms(1_000)
            .backoff_multiplier(2.0)
            .jitter_factor(0.0)
            .build()
            .unwrap();

        assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
        assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
        // Capped at max_backoff_ms from the fourth retry on
        assert_eq!(client.calculate_backoff(10), Duration::from_millis(1_000));
    }

    #[test]
    fn jitter_factor_is_clamped() {
        let client = RipeStat::builder().jitter_factor(7.5).build().unwrap();
        assert!((client.jitter_factor - 1.0).abs() < f64::EPSILON);
    }
}
