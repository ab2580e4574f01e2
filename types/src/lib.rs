//! Core domain types for buscacep.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application: the lookup key ([`PostalCode`]), the provider-agnostic
//! address record ([`Address`]), and the race result ([`RaceOutcome`]).

mod address;
mod outcome;

pub use address::Address;
pub use outcome::RaceOutcome;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The CEP (postal code) a lookup is keyed on.
///
/// Input is trimmed and must be non-empty. The assumed format is the
/// 8-digit Brazilian CEP, with or without the separating hyphen
/// (`01001000` or `01001-000`); no further validation happens here - the
/// backing services answer with an error status for keys they do not
/// recognize.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

#[derive(Debug, Error)]
#[error("postal code must not be empty")]
pub struct EmptyPostalCodeError;

impl PostalCode {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyPostalCodeError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(EmptyPostalCodeError)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PostalCode {
    type Error = EmptyPostalCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PostalCode {
    type Error = EmptyPostalCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for PostalCode {
    type Err = EmptyPostalCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
