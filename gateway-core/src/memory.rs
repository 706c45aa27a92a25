//! Trait/Episode DTOs shared between `memory-service` and its callers
//! (spec §3 "Trait", "Episode").

use serde::{Deserialize, Serialize};

/// A persisted key→value user attribute with confidence (spec §3).
/// Only stored when `confidence >= 0.7`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trait {
    pub user_id: String,
    pub key: String,
    pub value: String,
    pub confidence: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A persisted conversational event (spec §3). Only stored when
/// `content.len() >= 20` and `confidence >= 0.7`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub summary: String,
    pub confidence: f64,
    pub tags: Vec<String>,
    pub created_at: i64,
}

/// Minimum confidence for persisting a trait or episode (spec §3).
pub const MIN_PERSIST_CONFIDENCE: f64 = 0.7;

/// Minimum raw content length for an episode to be eligible (spec §3, §4.7).
pub const MIN_EPISODE_CONTENT_LEN: usize = 20;

/// Char-per-token heuristic for the ~200-token extractive summary budget
/// (SPEC_FULL §12.3 / §10.8): `chars / 4`.
pub const CHARS_PER_TOKEN: usize = 4;

/// Target token budget for an episode summary (spec §3).
pub const SUMMARY_TOKEN_BUDGET: usize = 200;

/// Packs sentences from `content` into a summary bounded by
/// `SUMMARY_TOKEN_BUDGET` tokens (approximated as `chars / CHARS_PER_TOKEN`),
/// matching the extractive-packing algorithm in SPEC_FULL §10.8.
pub fn summarize_extractive(content: &str) -> String {
    let sentences: Vec<&str> = content
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.len() > 10)
        .collect();

    let mut budget_used = 0usize;
    let mut picked: Vec<&str> = Vec::new();
    for sentence in &sentences {
        let estimated_tokens = sentence.len() / CHARS_PER_TOKEN;
        if budget_used + estimated_tokens > SUMMARY_TOKEN_BUDGET {
            break;
        }
        picked.push(sentence);
        budget_used += estimated_tokens;
    }

    if picked.is_empty() {
        let cap = SUMMARY_TOKEN_BUDGET * CHARS_PER_TOKEN;
        return content.chars().take(cap).collect();
    }

    let mut summary = picked.join(". ");
    if !summary.ends_with('.') {
        summary.push('.');
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_extractive_packs_sentences() {
        let content = "I am a software engineer. I live in Berlin. I like hiking on weekends.";
        let summary = summarize_extractive(content);
        assert!(summary.contains("software engineer"));
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn summarize_extractive_falls_back_to_truncation_when_no_long_sentences() {
        let content = "hi. ok. no.";
        let summary = summarize_extractive(content);
        assert_eq!(summary, "hi. ok. no.");
    }
}
