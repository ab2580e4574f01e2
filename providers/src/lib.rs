//! Address lookup source adapters with a first-success-wins race.
//!
//! # Architecture
//!
//! The crate is organized around an adapter dispatch pattern:
//!
//! - [`lookup`] - Unified entry point that races every default source
//! - [`brasil_api`] - Brasil API client (`brasilapi.com.br`)
//! - [`via_cep`] - ViaCEP client (`viacep.com.br`)
//! - [`resolve`] - The race coordinator, usable with any adapter set
//!
//! Every adapter implements [`SourceAdapter`]: it builds the request URL
//! for a postal code, performs one bounded HTTP GET, and normalizes the
//! service-specific response body into a [`buscacep_types::Address`]
//! stamped with the adapter's label. Adapters are immutable and share no
//! state with each other; the only shared resource in a race is the result
//! channel inside [`resolve`].
//!
//! # Error Handling
//!
//! Adapter failures are ordinary [`FetchError`] values. The coordinator
//! never inspects which kind occurred - it only distinguishes success from
//! failure - so one misbehaving service can never block or crash the race.

pub mod brasil_api;
pub mod via_cep;

mod race;

pub use race::resolve;

pub use buscacep_types;

use buscacep_types::{Address, PostalCode, RaceOutcome};
use futures_util::future::BoxFuture;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Canonical Brasil API base URL.
pub const BRASIL_API_BASE_URL: &str = "https://brasilapi.com.br";
/// Canonical ViaCEP base URL.
pub const VIA_CEP_BASE_URL: &str = "http://viacep.com.br";

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Reference per-request timeout for a single source call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);
/// Reference overall race deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

pub(crate) fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {e}. Falling back to defaults.");
                reqwest::Client::new()
            })
    })
}

/// Errors a single source fetch can report.
///
/// These never escape an adapter task during a race; [`resolve`] converts
/// them into failure markers and keeps waiting on the remaining sources.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection failure, or the per-request timeout firing.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The service answered outside the success class.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The body did not match the adapter's expected schema.
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The service answered cleanly but does not know the postal code.
    /// ViaCEP reports this as HTTP 200 with `{"erro": true}`.
    #[error("postal code not known to this source")]
    NotFound,
}

/// One backing address-lookup service.
///
/// Adapters are stateless descriptors: a base URL, a per-request timeout
/// and a label, plus the knowledge of how to parse that service's response
/// shape. Additional providers plug into [`resolve`] without touching it.
pub trait SourceAdapter: Send + Sync {
    /// Short identity stamped onto every address this adapter produces.
    fn label(&self) -> &'static str;

    /// Perform exactly one bounded lookup against the backing service.
    fn fetch<'a>(
        &'a self,
        postal_code: &'a PostalCode,
    ) -> BoxFuture<'a, Result<Address, FetchError>>;
}

/// Shared GET-and-decode helper used by every adapter.
pub(crate) async fn get_json<T>(url: &str, timeout: Duration) -> Result<T, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    let response = http_client()
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(FetchError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status));
    }

    let body = response.bytes().await.map_err(FetchError::Network)?;
    serde_json::from_slice(&body).map_err(FetchError::Decode)
}

/// Map a provider field to `None` when the service sent an empty string.
///
/// ViaCEP in particular reports absent fields as `""` rather than omitting
/// them.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Timing knobs for one lookup.
///
/// The per-request timeout bounds each individual source call; the
/// deadline bounds the whole race. They default to the same one-second
/// reference value but are deliberately independent: a generous deadline
/// with a tight request timeout gives slow sources no more rope than fast
/// ones.
#[derive(Debug, Clone, Copy)]
pub struct LookupConfig {
    request_timeout: Duration,
    deadline: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

impl LookupConfig {
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// The two canonical sources, each bounded by `request_timeout`.
#[must_use]
pub fn default_sources(request_timeout: Duration) -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        Arc::new(brasil_api::BrasilApi::new(request_timeout)),
        Arc::new(via_cep::ViaCep::new(request_timeout)),
    ]
}

/// Race the default sources for `postal_code`.
///
/// This is the crate's main entry point; callers with a custom adapter set
/// use [`resolve`] directly.
pub async fn lookup(postal_code: &PostalCode, config: &LookupConfig) -> RaceOutcome {
    let sources = default_sources(config.request_timeout());
    resolve(postal_code, &sources, config.deadline()).await
}
