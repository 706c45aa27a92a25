//! Trait extraction patterns (spec §4.7, SPEC_FULL §10.5), grounded in
//! `02-memory-2.0/src/app.py::extract_traits`.

use std::sync::OnceLock;

use regex::Regex;

/// One candidate trait pulled out of free text, before the
/// `confidence >= 0.7` persistence filter (spec §3) is applied.
pub struct Candidate {
    pub key: &'static str,
    pub value: String,
    pub confidence: f64,
}

struct Pattern {
    regex_src: &'static str,
    key: &'static str,
    confidence: f64,
}

const PATTERNS: &[Pattern] = &[
    Pattern { regex_src: r"(?:I am|I'm)\s+(\w+)", key: "personality", confidence: 0.7 },
    Pattern { regex_src: r"I (?:like|love|enjoy)\s+([^.!?]+)", key: "preference", confidence: 0.6 },
    Pattern { regex_src: r"I (?:work|am employed)\s+(?:as|at)\s+([^.!?]+)", key: "occupation", confidence: 0.8 },
    Pattern { regex_src: r"I live in\s+([^.!?]+)", key: "location", confidence: 0.8 },
    Pattern { regex_src: r"My (?:name is|name's)\s+(\w+)", key: "name", confidence: 0.9 },
    Pattern { regex_src: r"I (?:hate|dislike|don't like)\s+([^.!?]+)", key: "dislike", confidence: 0.6 },
];

static COMPILED: OnceLock<Vec<(Regex, &'static str, f64)>> = OnceLock::new();

fn compiled() -> &'static [(Regex, &'static str, f64)] {
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|p| (Regex::new(&format!("(?i){}", p.regex_src)).expect("valid trait regex"), p.key, p.confidence))
            .collect()
    })
}

/// Extracts every candidate trait from `text`, first match per pattern,
/// including the `preference`/`dislike` candidates below the 0.7
/// persistence threshold (spec §3 invariant: "only stored when
/// confidence >= 0.7") — the caller is responsible for filtering those out
/// before upserting.
pub fn extract_candidates(text: &str) -> Vec<Candidate> {
    compiled()
        .iter()
        .filter_map(|(re, key, confidence)| {
            re.captures(text).and_then(|caps| caps.get(1)).map(|m| Candidate {
                key,
                value: m.as_str().trim().to_string(),
                confidence: *confidence,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_name_and_occupation() {
        let candidates = extract_candidates("My name is Priya and I work as a nurse");
        let name = candidates.iter().find(|c| c.key == "name").unwrap();
        assert_eq!(name.value, "Priya");
        let occupation = candidates.iter().find(|c| c.key == "occupation").unwrap();
        assert_eq!(occupation.value, "a nurse");
    }

    #[test]
    fn low_confidence_candidates_are_still_returned_for_caller_to_filter() {
        let candidates = extract_candidates("I like hiking and I dislike mornings");
        let preference = candidates.iter().find(|c| c.key == "preference").unwrap();
        assert!(preference.confidence < 0.7);
        let dislike = candidates.iter().find(|c| c.key == "dislike").unwrap();
        assert!(dislike.confidence < 0.7);
    }

    #[test]
    fn location_pattern_matches() {
        let candidates = extract_candidates("I live in Lisbon these days");
        let location = candidates.iter().find(|c| c.key == "location").unwrap();
        assert_eq!(location.value, "Lisbon these days");
        assert_eq!(location.confidence, 0.8);
    }
}
