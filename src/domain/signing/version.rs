//! Signature versions.

use super::errors::SignatureError;

/// Parameter name carrying the signature version on widgets and pingbacks.
pub const SIGN_VERSION_PARAM: &str = "sign_version";

/// Vendor signature algorithm version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignatureVersion {
    /// MD5 over parameters in caller order.
    V1,
    /// MD5 over parameters sorted by key.
    V2,
    /// SHA-256 over parameters sorted by key.
    V3,
}

impl SignatureVersion {
    /// Returns the version number as sent on the wire.
    pub fn number(&self) -> i64 {
        match self {
            SignatureVersion::V1 => 1,
            SignatureVersion::V2 => 2,
            SignatureVersion::V3 => 3,
        }
    }

    /// Returns true if keys are sorted before canonicalization.
    pub fn sorts_keys(&self) -> bool {
        !matches!(self, SignatureVersion::V1)
    }
}

impl TryFrom<i64> for SignatureVersion {
    type Error = SignatureError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SignatureVersion::V1),
            2 => Ok(SignatureVersion::V2),
            3 => Ok(SignatureVersion::V3),
            other => Err(SignatureError::UnsupportedVersion(other)),
        }
    }
}

impl std::fmt::Display for SignatureVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.number())
    }
}
