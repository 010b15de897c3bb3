//! Gateway source addresses.
//!
//! Matched by exact string membership, never by prefix or CIDR arithmetic.

use std::collections::HashSet;

use once_cell::sync::Lazy;

const FIXED_ADDRESSES: [&str; 5] = [
    "174.36.92.186",
    "174.36.96.66",
    "174.36.92.187",
    "174.36.92.192",
    "174.37.14.28",
];

const BLOCK_PREFIX: &str = "216.127.71.";

static WHITELIST: Lazy<HashSet<String>> = Lazy::new(|| {
    FIXED_ADDRESSES
        .iter()
        .map(|address| address.to_string())
        .chain((0..=255u16).map(|host| format!("{}{}", BLOCK_PREFIX, host)))
        .collect()
});

/// Returns true if `address` is a known pingback origin.
pub fn is_whitelisted(address: &str) -> bool {
    WHITELIST.contains(address)
}
