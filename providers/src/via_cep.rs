//! ViaCEP adapter.
//!
//! Queries `GET {base}/ws/{cep}/json/`. The response is a flat JSON object
//! with Portuguese field names and more detail than Brasil API exposes:
//! `complemento`, `unidade`, the IBGE municipality code and the GIA
//! tax-area code. Absent fields arrive as empty strings, and unknown
//! postal codes arrive as HTTP 200 with `{"erro": true}`.

use crate::{FetchError, SourceAdapter, non_empty};
use buscacep_types::{Address, PostalCode};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;

/// Adapter for `viacep.com.br`.
#[derive(Debug, Clone)]
pub struct ViaCep {
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    unidade: String,
    #[serde(default)]
    ibge: String,
    #[serde(default)]
    gia: String,
}

impl ViaCep {
    pub const LABEL: &'static str = "viacep";

    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(crate::VIA_CEP_BASE_URL, timeout)
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
        let url = format!("{}/ws/{}/json/", self.base_url, postal_code);
        let response: ViaCepResponse = crate::get_json(&url, self.timeout).await?;
        normalize(response)
    }
}

fn normalize(response: ViaCepResponse) -> Result<Address, FetchError> {
    if response.erro {
        return Err(FetchError::NotFound);
    }
    // A body with no city or state carries nothing an address needs.
    if response.localidade.is_empty() || response.uf.is_empty() {
        return Err(FetchError::NotFound);
    }

    Ok(Address {
        postal_code: response.cep,
        street: non_empty(response.logradouro),
        complement: non_empty(response.complemento),
        neighborhood: non_empty(response.bairro),
        city: response.localidade,
        state_code: response.uf,
        municipality_code: non_empty(response.ibge),
        tax_area_code: non_empty(response.gia),
        extra_unit: non_empty(response.unidade),
        source: ViaCep::LABEL.to_string(),
    })
}

impl SourceAdapter for ViaCep {
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
