//! Tenant identifier.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TENANT_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Identifier of the establishment (hotel/restaurant) that owns data.
///
/// Surrounding whitespace is dropped, otherwise compared exactly: `HotelA`
/// and `hotela` are different tenants. Deserializing goes through [`TenantId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Build a trimmed tenant id, rejecting blank or overlong values.
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let raw = value.into();
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::invalid("tenant", "is required"));
        }
        if value.chars().count() > MAX_TENANT_LENGTH {
            return Err(DomainError::invalid(
                "tenant",
                format!("must be at most {} characters", MAX_TENANT_LENGTH),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TenantId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TenantId> for String {
    fn from(tenant: TenantId) -> Self {
        tenant.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_value() {
        let tenant = TenantId::parse("HotelA").unwrap();
        assert_eq!(tenant.as_str(), "HotelA");
        assert_eq!(tenant.to_string(), "HotelA");
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(TenantId::parse("  HotelA ").unwrap(), TenantId::parse("HotelA").unwrap());
    }

    #[test]
    fn test_deserialize_validates() {
        let tenant: TenantId = serde_json::from_str("\" HotelA\"").unwrap();
        assert_eq!(tenant.as_str(), "HotelA");
        assert!(serde_json::from_str::<TenantId>("\"  \"").is_err());
        let long = format!("\"{}\"", "x".repeat(MAX_TENANT_LENGTH + 1));
        assert!(serde_json::from_str::<TenantId>(&long).is_err());
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(TenantId::parse("").is_err());
        assert!(TenantId::parse("   ").is_err());
    }

    #[test]
    fn test_comparison_is_exact() {
        assert_ne!(TenantId::parse("HotelA").unwrap(), TenantId::parse("hotela").unwrap());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let tenant = TenantId::parse("HotelA").unwrap();
        assert_eq!(serde_json::to_string(&tenant).unwrap(), "\"HotelA\"");
    }
}
