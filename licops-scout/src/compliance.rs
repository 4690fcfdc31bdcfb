//! Compliance checks
//!
//! Static table and regex lookups standing in for real registry-backed
//! verification: source credibility, license compatibility, sanctions
//! screening, and PII redaction ahead of indexing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Domains with prior contract history
const TRUSTED_DOMAINS: &[&str] = &[
    "reuters.com",
    "arxiv.org",
    "github.com",
    "wikimedia.org",
    "stackexchange.com",
];

/// Licenses incompatible with commercial model training
const INCOMPATIBLE_LICENSES: &[&str] = &["CC-BY-NC", "GPL v3", "AGPL", "Unknown"];

/// Entities flagged on the sanctions watchlist
const SANCTIONED_ENTITIES: &[&str] = &[
    "kaspersky",
    "huawei-subsidiary",
    "darknet-data-broker",
    "scrape-bot.io",
];

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("valid phone regex")
});

/// Replacement token for redacted email addresses
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL_REDACTED]";

/// Replacement token for redacted phone numbers
pub const PHONE_PLACEHOLDER: &str = "[PHONE_REDACTED]";

/// Does the vendor domain contain any trusted-domain entry?
pub fn is_trusted_domain(domain: &str) -> bool {
    let domain = domain.to_lowercase();
    TRUSTED_DOMAINS.iter().any(|d| domain.contains(d))
}

/// Is the license identifier on the disallowed list? Exact match.
pub fn is_incompatible_license(license_name: &str) -> bool {
    INCOMPATIBLE_LICENSES.contains(&license_name)
}

/// Does the vendor domain contain any sanctioned-entity keyword?
pub fn is_sanctioned(domain: &str) -> bool {
    let domain = domain.to_lowercase();
    SANCTIONED_ENTITIES.iter().any(|s| domain.contains(s))
}

/// Redact email-like then phone-like substrings
///
/// Two independent regex passes. Idempotent: the placeholder tokens contain
/// neither an address nor a digit run, so re-running is a no-op, and text
/// with no matches passes through unchanged.
pub fn redact_pii(text: &str) -> String {
    let redacted = EMAIL_PATTERN.replace_all(text, EMAIL_PLACEHOLDER);
    PHONE_PATTERN.replace_all(&redacted, PHONE_PLACEHOLDER).into_owned()
}
