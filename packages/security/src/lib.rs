#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Keyword heuristics that assign a [`SecurityTier`] to an access point.
//!
//! Classification walks an ordered rule table and the first matching rule
//! wins. Every keyword test is a substring check against the lower-cased
//! SSID or operator name.
//!
//! The `"te"` keyword in the secure rule also matches names such as
//! `"internet"` or `"gate"`.

use wifi_map_catalog_models::{WifiRecord, is_unknown_ssid};
pub use wifi_map_security_models::{ColorTag, SecurityAssessment, SecurityTier};

/// Operator keywords of the major domestic carriers.
pub const CARRIER_KEYWORDS: &[&str] = &["kt", "skt", "lgu+", "u+"];

/// SSID keywords that indicate an encrypted network.
pub const SECURE_KEYWORDS: &[&str] = &["secure", "giga", "te"];

/// SSID keywords that indicate an open or guest network.
pub const OPEN_KEYWORDS: &[&str] = &["free", "public", "open", "guest"];

/// Condition under which a [`SecurityRule`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// SSID is missing and the operator contains one of the keywords.
    MissingSsidWithProvider(&'static [&'static str]),
    /// SSID is missing.
    MissingSsid,
    /// SSID contains one of the keywords.
    SsidContainsAny(&'static [&'static str]),
    /// Always applies.
    Always,
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSsidWithProvider(keywords) => {
                write!(f, "no SSID, operator contains any of [{}]", keywords.join(", "))
            }
            Self::MissingSsid => f.write_str("no SSID"),
            Self::SsidContainsAny(keywords) => {
                write!(f, "SSID contains any of [{}]", keywords.join(", "))
            }
            Self::Always => f.write_str("otherwise"),
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityRule {
    /// When the rule applies.
    pub predicate: Predicate,
    /// Tier assigned when it does.
    pub tier: SecurityTier,
}

const RULES: &[SecurityRule] = &[
    SecurityRule {
        predicate: Predicate::MissingSsidWithProvider(CARRIER_KEYWORDS),
        tier: SecurityTier::UnknownLikelyModerate,
    },
    SecurityRule {
        predicate: Predicate::MissingSsid,
        tier: SecurityTier::UnknownLikelyLow,
    },
    SecurityRule {
        predicate: Predicate::SsidContainsAny(SECURE_KEYWORDS),
        tier: SecurityTier::Safe,
    },
    SecurityRule {
        predicate: Predicate::SsidContainsAny(OPEN_KEYWORDS),
        tier: SecurityTier::Open,
    },
    SecurityRule {
        predicate: Predicate::Always,
        tier: SecurityTier::Moderate,
    },
];

/// Returns the classification rules in evaluation order.
#[must_use]
pub const fn rules() -> &'static [SecurityRule] {
    RULES
}

/// Lower-cased inputs shared by every predicate.
struct Subject {
    ssid_missing: bool,
    ssid: String,
    provider: String,
}

impl Subject {
    fn new(ssid: &str, provider: &str) -> Self {
        Self {
            ssid_missing: is_unknown_ssid(ssid),
            ssid: ssid.to_lowercase(),
            provider: provider.to_lowercase(),
        }
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

impl Predicate {
    fn matches(self, subject: &Subject) -> bool {
        match self {
            Self::MissingSsidWithProvider(keywords) => {
                subject.ssid_missing && contains_any(&subject.provider, keywords)
            }
            Self::MissingSsid => subject.ssid_missing,
            Self::SsidContainsAny(keywords) => contains_any(&subject.ssid, keywords),
            Self::Always => true,
        }
    }
}

/// Classifies an access point from its SSID and operator name.
///
/// Total and deterministic. Pass an empty string for an absent value.
#[must_use]
pub fn classify(ssid: &str, provider: &str) -> SecurityAssessment {
    let subject = Subject::new(ssid, provider);
    let tier = RULES
        .iter()
        .find(|rule| rule.predicate.matches(&subject))
        .map_or(SecurityTier::Moderate, |rule| rule.tier);
    SecurityAssessment::from(tier)
}

/// Classifies a loaded record.
#[must_use]
pub fn classify_record(record: &WifiRecord) -> SecurityAssessment {
    classify(&record.ssid, &record.provider)
}

#[cfg(test)]
mod tests {
    use wifi_map_catalog_models::UNKNOWN_SENTINEL;

    use super::*;

    #[test]
    fn secure_keyword_wins_case_insensitively() {
        let a = classify("SEOUL_Secure_5G", "KT");
        assert_eq!(a.tier, SecurityTier::Safe);
        assert_eq!(a.score, 3);
        assert_eq!(a.color_tag, ColorTag::Green);
    }

    #[test]
    fn missing_ssid_with_carrier_is_likely_moderate() {
        let a = classify("", "SKT");
        assert_eq!(a.tier, SecurityTier::UnknownLikelyModerate);
        assert_eq!(a.score, 2);
        assert_eq!(a.color_tag, ColorTag::Gray);
        assert_eq!(a.label, "no SSID info (assumed: moderate)");
    }

    #[test]
    fn missing_ssid_with_other_provider_is_likely_low() {
        let a = classify("", "SomeVendor");
        assert_eq!(a.tier, SecurityTier::UnknownLikelyLow);
        assert_eq!(a.score, 0);
        assert_eq!(a.color_tag, ColorTag::Gray);
    }

    #[test]
    fn unknown_sentinel_counts_as_missing() {
        assert_eq!(
            classify(UNKNOWN_SENTINEL, "LGU+").tier,
            SecurityTier::UnknownLikelyModerate
        );
        assert_eq!(
            classify(UNKNOWN_SENTINEL, UNKNOWN_SENTINEL).tier,
            SecurityTier::UnknownLikelyLow
        );
    }

    #[test]
    fn carrier_keyword_is_a_substring_test() {
        assert_eq!(classify("", "U+ 공공").tier, SecurityTier::UnknownLikelyModerate);
        assert_eq!(classify("", "Katalk").tier, SecurityTier::UnknownLikelyLow);
        assert_eq!(classify("", "KTX 역사").tier, SecurityTier::UnknownLikelyModerate);
    }

    #[test]
    fn guest_network_is_open_regardless_of_provider() {
        let a = classify("Guest_WiFi", "KT");
        assert_eq!(a.tier, SecurityTier::Open);
        assert_eq!(a.score, 1);
        assert_eq!(a.color_tag, ColorTag::Red);
    }

    #[test]
    fn secure_rule_precedes_open_rule() {
        assert_eq!(classify("Free_Secure", "").tier, SecurityTier::Safe);
    }

    #[test]
    fn te_keyword_matches_broadly() {
        assert_eq!(classify("Public_Internet", "").tier, SecurityTier::Safe);
        assert_eq!(classify("GATE_WIFI", "").tier, SecurityTier::Safe);
    }

    #[test]
    fn other_names_are_moderate() {
        let a = classify("iptime", "SomeVendor");
        assert_eq!(a.tier, SecurityTier::Moderate);
        assert_eq!(a.score, 2);
        assert_eq!(a.color_tag, ColorTag::Orange);
        assert_eq!(a.label, "general (verify manually)");
    }

    #[test]
    fn rule_table_ends_with_catch_all() {
        let last = rules().last().unwrap();
        assert_eq!(last.predicate, Predicate::Always);
        assert_eq!(last.tier, SecurityTier::Moderate);
    }

    #[test]
    fn classify_record_uses_ssid_and_provider() {
        let record = WifiRecord {
            id: 7,
            ssid: "FREE_WIFI".to_string(),
            provider: "KT".to_string(),
            latitude: 37.5,
            longitude: 127.0,
            place_name: "A".to_string(),
            detail_address: String::new(),
        };
        assert_eq!(classify_record(&record).tier, SecurityTier::Open);
    }

    #[test]
    fn describes_predicates() {
        assert_eq!(
            Predicate::SsidContainsAny(OPEN_KEYWORDS).to_string(),
            "SSID contains any of [free, public, open, guest]"
        );
        assert_eq!(Predicate::Always.to_string(), "otherwise");
    }

    #[test]
    fn te_keyword_matches_internet_and_gateway() {
        assert_eq!(classify("Olleh_Internet", "").tier, SecurityTier::Safe);
        assert_eq!(classify("Gateway_01", "").tier, SecurityTier::Safe);
    }

    #[test]
    fn sentinel_match_is_case_sensitive() {
        assert_eq!(classify("Unknown", "").tier, SecurityTier::UnknownLikelyLow);
        assert_eq!(classify("unknown", "").tier, SecurityTier::Moderate);
    }
}
