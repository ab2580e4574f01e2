//! The normalized address record shared by every source adapter.

use serde::{Deserialize, Serialize};

/// A provider-agnostic street address.
///
/// Adapters map their service-specific response schemas into this shape
/// and stamp `source` with their own identity. Not every service supplies
/// every field, so everything beyond the postal code, city, state and
/// source is optional; absent fields are omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code as echoed back by the service (may be hyphenated).
    pub postal_code: String,

    /// Street name (logradouro).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// Address complement (complemento), e.g. a block or side hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,

    /// Neighborhood (bairro).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    /// City (localidade).
    pub city: String,

    /// Two-letter state code (UF).
    pub state_code: String,

    /// IBGE municipality code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality_code: Option<String>,

    /// GIA tax-area code (São Paulo state only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_area_code: Option<String>,

    /// Administrative sub-unit (unidade).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_unit: Option<String>,

    /// Label of the backing service that produced this record.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::Address;

    fn minimal() -> Address {
        Address {
            postal_code: "01001-000".to_string(),
            street: None,
            complement: None,
            neighborhood: None,
            city: "São Paulo".to_string(),
            state_code: "SP".to_string(),
            municipality_code: None,
            tax_area_code: None,
            extra_unit: None,
            source: "brasilapi".to_string(),
        }
    }

    #[test]
    fn absent_optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(minimal()).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("street"));
        assert!(!object.contains_key("municipality_code"));
        assert_eq!(object["city"], "São Paulo");
        assert_eq!(object["source"], "brasilapi");
    }

    #[test]
    fn round_trips_present_fields() {
        let mut address = minimal();
        address.street = Some("Praça da Sé".to_string());
        address.tax_area_code = Some("1004".to_string());

        let json = serde_json::to_string(&address).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
