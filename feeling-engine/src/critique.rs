//! Text critique/cleaning (spec §4.6), grounded in
//! `03-feeling-engine/src/app.py::TextCritic`.

use std::sync::OnceLock;

use regex::Regex;

const FILLER_WORDS: &[&str] = &["um", "uh", "like", "you know", "sort of", "kind of", "basically", "actually"];

pub struct Critique {
    pub cleaned_text: String,
    pub original_tokens: usize,
    pub cleaned_tokens: usize,
    pub changes_made: Vec<String>,
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn trailing_punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+$").expect("valid trailing punctuation regex"))
}

fn filler_re(filler: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(filler))).expect("valid filler regex")
}

/// Operations, in order: drop filler words seen more than twice, collapse
/// whitespace, truncate by word count, normalize trailing punctuation.
pub fn critique(text: &str, max_tokens: usize) -> Critique {
    let original_tokens = text.split_whitespace().count();
    let mut changes = Vec::new();
    let mut cleaned = text.to_string();

    for filler in FILLER_WORDS {
        let re = filler_re(filler);
        let count = re.find_iter(&cleaned).count();
        if count > 2 {
            cleaned = re.replace_all(&cleaned, "").into_owned();
            changes.push(format!("Removed {count} instances of filler word '{filler}'"));
        }
    }

    cleaned = whitespace_re().replace_all(&cleaned, " ").trim().to_string();

    let mut cleaned_tokens = cleaned.split_whitespace().count();
    if cleaned_tokens > max_tokens {
        cleaned = cleaned.split_whitespace().take(max_tokens).collect::<Vec<_>>().join(" ");
        changes.push(format!("Truncated text to {max_tokens} tokens"));
        cleaned_tokens = max_tokens;
    }

    cleaned = trailing_punctuation_re().replace(&cleaned, ".").into_owned();

    Critique { cleaned_text: cleaned, original_tokens, cleaned_tokens, changes_made: changes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_filler_words_above_threshold() {
        let result = critique("um this is um a test um of filler words", 100);
        assert!(!result.cleaned_text.contains("um"));
        assert!(result.changes_made.iter().any(|c| c.contains("filler word 'um'")));
    }

    #[test]
    fn leaves_occasional_filler_untouched() {
        let result = critique("um this happened once", 100);
        assert!(result.cleaned_text.contains("um"));
        assert!(result.changes_made.is_empty());
    }

    #[test]
    fn truncates_by_word_count() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let result = critique(&text, 5);
        assert_eq!(result.cleaned_tokens, 5);
        assert!(result.changes_made.iter().any(|c| c.contains("Truncated")));
    }

    #[test]
    fn idempotent_on_clean_input() {
        let first = critique("a short clean sentence.", 100);
        let second = critique(&first.cleaned_text, 100);
        assert_eq!(first.cleaned_text, second.cleaned_text);
    }
}
