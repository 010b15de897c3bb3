//! Vendor signature computation.
//!
//! Canonicalization rules, per version:
//!
//! 1. v1 keeps the caller's key order, v2/v3 sort keys byte-wise.
//! 2. Each entry renders as `key=value`; a sequence renders one
//!    `key[i]=item` segment per element; a null value renders `key=`.
//! 3. Segments are concatenated without delimiters and the secret is
//!    appended.
//! 4. v1/v2 hash with MD5, v3 with SHA-256, both as lowercase hex.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::SignatureError;
use super::params::{ParamValue, ParameterSet};
use super::version::SignatureVersion;

/// Builds the canonical string for `params`, without the secret.
pub fn canonicalize(params: &ParameterSet, version: SignatureVersion) -> String {
    let mut entries: Vec<(&str, &ParamValue)> = params.iter().collect();
    if version.sorts_keys() {
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    let mut out = String::new();
    for (key, value) in entries {
        value.write_canonical(key, &mut out);
    }
    out
}

/// Computes the signature token for `params`.
///
/// # Errors
///
/// Returns `SignatureError::EmptySecret` if `secret` is empty.
pub fn sign(
    params: &ParameterSet,
    secret: &SecretString,
    version: SignatureVersion,
) -> Result<String, SignatureError> {
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(SignatureError::EmptySecret);
    }

    let mut base = canonicalize(params, version);
    base.push_str(secret);

    let token = match version {
        SignatureVersion::V1 | SignatureVersion::V2 => {
            format!("{:x}", md5::compute(base.as_bytes()))
        }
        SignatureVersion::V3 => hex::encode(Sha256::digest(base.as_bytes())),
    };

    tracing::debug!(
        version = version.number(),
        entries = params.len(),
        "Computed parameter signature"
    );

    Ok(token)
}

/// Computes the signature for a version number that has not been validated.
///
/// The secret is checked before the version.
///
/// # Errors
///
/// - `EmptySecret` - the secret is empty
/// - `UnsupportedVersion` - `version` is not 1, 2 or 3
pub fn sign_with_version_number(
    params: &ParameterSet,
    secret: &SecretString,
    version: i64,
) -> Result<String, SignatureError> {
    if secret.expose_secret().is_empty() {
        return Err(SignatureError::EmptySecret);
    }
    let version = SignatureVersion::try_from(version)?;
    sign(params, secret, version)
}

/// Compares two signature tokens in constant time.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
