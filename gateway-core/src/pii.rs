//! PII detection/redaction regex set shared by `memory-service`'s write
//! path and the telemetry client (spec §4.7, SPEC_FULL §10.4).

use regex::Regex;
use std::sync::OnceLock;

/// One PII class and its detection pattern.
struct PiiClass {
    name: &'static str,
    pattern: &'static str,
}

const PII_CLASSES: &[PiiClass] = &[
    PiiClass { name: "EMAIL", pattern: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b" },
    PiiClass { name: "PHONE", pattern: r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b" },
    PiiClass { name: "SSN", pattern: r"\b\d{3}-?\d{2}-?\d{4}\b" },
    PiiClass { name: "CREDIT_CARD", pattern: r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b" },
    PiiClass { name: "IP_ADDRESS", pattern: r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b" },
    PiiClass { name: "API_KEY", pattern: r"\b[A-Za-z0-9]{32,}\b" },
    PiiClass { name: "USER_ID", pattern: r"\buser[_-]?[a-z0-9]+\b" },
    PiiClass { name: "SESSION_ID", pattern: r"\bsess[a-z0-9]+\b" },
];

struct CompiledClasses(Vec<(&'static str, Regex)>);

static COMPILED: OnceLock<CompiledClasses> = OnceLock::new();

fn compiled() -> &'static CompiledClasses {
    COMPILED.get_or_init(|| {
        CompiledClasses(
            PII_CLASSES
                .iter()
                .map(|c| (c.name, Regex::new(c.pattern).expect("valid PII regex")))
                .collect(),
        )
    })
}

/// Redacts every detected PII class in `text`, replacing matches with
/// `[REDACTED_<CLASS>]`. Classes are checked in declaration order so that,
/// e.g., credit-card-shaped strings are not first partially eaten by the
/// phone pattern's looser match.
///
/// Returns the redacted text and the sorted, deduplicated list of classes
/// that were found (used for the `redacted_fields` response field and as
/// the testable property in spec §8: no PII class regex matches the
/// returned string).
pub fn redact(text: &str) -> (String, Vec<String>) {
    let mut out = text.to_string();
    let mut found = Vec::new();
    for (name, re) in &compiled().0 {
        if re.is_match(&out) {
            found.push(name.to_string());
            out = re.replace_all(&out, format!("[REDACTED_{name}]")).into_owned();
        }
    }
    found.sort();
    (out, found)
}

/// Detects which PII classes are present without redacting (used by
/// `memory-service` to decide whether to log a warning before redaction).
pub fn detect(text: &str) -> Vec<String> {
    let mut found: Vec<String> = compiled()
        .0
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(name, _)| name.to_string())
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_email() {
        let (redacted, classes) = redact("contact me at jane.doe@example.com please");
        assert!(redacted.contains("[REDACTED_EMAIL]"));
        assert!(!redacted.contains("jane.doe@example.com"));
        assert!(classes.contains(&"EMAIL".to_string()));
    }

    #[test]
    fn redacts_phone_and_ssn() {
        let (redacted, classes) = redact("call 555-123-4567 or ssn 123-45-6789");
        assert!(redacted.contains("[REDACTED_PHONE]") || redacted.contains("[REDACTED_SSN]"));
        assert!(classes.len() >= 1);
    }

    #[test]
    fn no_pii_classes_match_after_redaction() {
        let (redacted, _) = redact("my email is a@b.com and phone is 555-867-5309");
        let remaining = detect(&redacted);
        assert!(remaining.is_empty(), "remaining PII classes: {remaining:?}");
    }

    #[test]
    fn clean_text_is_unchanged() {
        let (redacted, classes) = redact("I enjoy hiking and reading books.");
        assert_eq!(redacted, "I enjoy hiking and reading books.");
        assert!(classes.is_empty());
    }
}
