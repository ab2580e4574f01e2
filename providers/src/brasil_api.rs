//! Brasil API adapter.
//!
//! Queries `GET {base}/api/cep/v1/{cep}`. The response is a flat JSON
//! object with English field names (`street`, `neighborhood`, `city`,
//! `state`); it carries no complement, municipality or tax-area data.

use crate::{FetchError, SourceAdapter, non_empty};
use buscacep_types::{Address, PostalCode};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;

/// Adapter for `brasilapi.com.br`.
#[derive(Debug, Clone)]
pub struct BrasilApi {
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct BrasilApiResponse {
    cep: String,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    neighborhood: Option<String>,
    city: String,
    state: String,
}

impl BrasilApi {
    pub const LABEL: &'static str = "brasilapi";

    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(crate::BRASIL_API_BASE_URL, timeout)
    }

    /// Point the adapter at a different host. Used by tests to target a
    /// local mock server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    async fn lookup(&self, postal_code: &PostalCode) -> Result<Address, FetchError> {
        let url = format!("{}/api/cep/v1/{}", self.base_url, postal_code);
        let response: BrasilApiResponse = crate::get_json(&url, self.timeout).await?;
        Ok(normalize(response))
    }
}

fn normalize(response: BrasilApiResponse) -> Address {
    Address {
        postal_code: response.cep,
        street: response.street.and_then(non_empty),
        complement: None,
        neighborhood: response.neighborhood.and_then(non_empty),
        city: response.city,
        state_code: response.state,
        municipality_code: None,
        tax_area_code: None,
        extra_unit: None,
        source: BrasilApi::LABEL.to_string(),
    }
}

impl SourceAdapter for BrasilApi {
    fn label(&self) -> &'static str {
        Self::LABEL
    }

    fn fetch<'a>(
        &'a self,
        postal_code: &'a PostalCode,
    ) -> BoxFuture<'a, Result<Address, FetchError>> {
        Box::pin(self.lookup(postal_code))
    }
}

#[cfg(test)]
mod tests {
    use super::{BrasilApi, BrasilApiResponse, normalize};

    #[test]
    fn normalizes_a_full_response() {
        let response: BrasilApiResponse = serde_json::from_str(
            r#"{
                "cep": "01001000",
                "state": "SP",
                "city": "São Paulo",
                "neighborhood": "Sé",
                "street": "Praça da Sé",
                "service": "widenet"
            }"#,
        )
        .unwrap();

        let address = normalize(response);
        assert_eq!(address.postal_code, "01001000");
        assert_eq!(address.street.as_deref(), Some("Praça da Sé"));
        assert_eq!(address.neighborhood.as_deref(), Some("Sé"));
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state_code, "SP");
        assert_eq!(address.source, BrasilApi::LABEL);
        assert_eq!(address.complement, None);
        assert_eq!(address.municipality_code, None);
    }

    #[test]
    fn tolerates_missing_street_and_neighborhood() {
        let response: BrasilApiResponse = serde_json::from_str(
            r#"{"cep": "77001000", "state": "TO", "city": "Palmas"}"#,
        )
        .unwrap();

        let address = normalize(response);
        assert_eq!(address.street, None);
        assert_eq!(address.neighborhood, None);
        assert_eq!(address.city, "Palmas");
    }

    #[test]
    fn rejects_a_body_without_required_fields() {
        let result: Result<BrasilApiResponse, _> =
            serde_json::from_str(r#"{"cep": "01001000", "street": "Praça da Sé"}"#);
        assert!(result.is_err());
    }
}
