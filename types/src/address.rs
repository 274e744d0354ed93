//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when parsing a malformed account address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("address must be 40 hex digits after the prefix, got {0}")]
    WrongLength(usize),

    #[error("address contains a non-hex character: {0}")]
    InvalidCharacter(char),
}

/// A 20-byte account address rendered as `0x` + 40 lowercase hex digits.
///
/// Addresses identify askers, advisors, and voters across both ledgers.
/// The address string is normalized to lowercase on parse so that map
/// lookups never depend on the caller's checksum casing.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Parse and normalize an address string.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, AddressParseError> {
        let raw = raw.as_ref();
        let hex = raw
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| AddressParseError::MissingPrefix(raw.to_string()))?;

        if hex.len() != Self::HEX_LEN {
            return Err(AddressParseError::WrongLength(hex.len()));
        }

        if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidCharacter(bad));
        }

        Ok(Self(format!("{}{}", Self::PREFIX, hex.to_ascii_lowercase())))
    }

    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Intended for
    /// constants and test fixtures; use [`AccountAddress::parse`] for
    /// untrusted input.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self::parse(raw).expect("malformed account address literal")
    }

    /// Return the normalized address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncated form keeps log lines readable.
        write!(f, "AccountAddress({}…)", &self.0[..10])
    }
}
