//! Rule-based fallback extractor
//!
//! Deterministic, pure extraction used when no model credential is
//! configured (or when the caller explicitly selects the fallback after a
//! model failure). Matching is case-insensitive throughout.

use super::{ExtractionError, Extractor};
use licops_common::{DataType, ExtractedFields, RiskLevel, UNKNOWN_PARTNER};
use once_cell::sync::Lazy;
use regex::Regex;

/// Known partner keyword -> display name table
const PARTNER_KEYWORDS: &[(&str, &str)] = &[
    ("mediscan", "MediScan AI"),
    ("pixelperfect", "PixelPerfect Stock"),
    ("socialscrape", "SocialScrape Ltd"),
    ("opencode", "OpenCode Foundation"),
    ("globalbroadcast", "GlobalBroadcast Corp"),
    ("deepdive", "DeepDive Analytics"),
];

/// Keywords denoting regulated or sensitive data
const HIGH_RISK_TRIGGERS: &[&str] = &["gdpr", "pii", "hipaa", "identifiable", "scrape", "audit"];

/// Currency amounts like `$120,000` or `$150k`
static CURRENCY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d{1,3}(?:,\d{3})*|\d+)(k)?").expect("valid currency regex"));

/// Deterministic keyword/regex extraction strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    /// Extract structured fields from raw text
    ///
    /// Pure function of the input; exposed directly (in addition to the
    /// [`Extractor`] impl) so it can be tested without an async runtime.
    pub fn extract_fields(raw_text: &str) -> ExtractedFields {
        let lower = raw_text.to_lowercase();

        let partner = detect_partner(&lower);
        let risk_level = detect_risk(&lower);
        let estimated_value = detect_value(&lower);
        let data_type = detect_data_type(&lower);

        ExtractedFields {
            summary: format!("Automated intake for {} ({})", partner, data_type),
            partner_name: partner,
            data_type,
            risk_level,
            estimated_value,
        }
    }
}

#[async_trait::async_trait]
impl Extractor for RuleBasedExtractor {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        Ok(Self::extract_fields(raw_text))
    }
}

/// Match known partner keywords; first table entry wins
fn detect_partner(lower: &str) -> String {
    PARTNER_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| UNKNOWN_PARTNER.to_string())
}

/// Risk precedence: High > Medium > Low, first matching rule wins
fn detect_risk(lower: &str) -> RiskLevel {
    if HIGH_RISK_TRIGGERS.iter().any(|word| lower.contains(word)) {
        RiskLevel::High
    } else if lower.contains("rights") || lower.contains("check") {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// First `$`-amount in the text; trailing `k` multiplies by 1000; absent -> 0
fn detect_value(lower: &str) -> u64 {
    let Some(captures) = CURRENCY_PATTERN.captures(lower) else {
        return 0;
    };

    let digits = captures[1].replace(',', "");
    let multiplier = if captures.get(2).is_some() { 1000 } else { 1 };

    // Digits-and-commas only by construction; overflow is the only parse risk
    digits.parse::<u64>().map_or(0, |n| n.saturating_mul(multiplier))
}

/// Keyword-based category guess over the canonical enumeration
fn detect_data_type(lower: &str) -> DataType {
    if lower.contains("image") || lower.contains("x-ray") {
        DataType::Image
    } else if lower.contains("audio") {
        DataType::Audio
    } else if lower.contains("code") || lower.contains("repo") {
        DataType::Code
    } else {
        DataType::Text
    }
}
