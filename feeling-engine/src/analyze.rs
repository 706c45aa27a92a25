//! Affect analysis (spec §4.6): sentiment, emotion, dialog act, urgency,
//! grounded in `03-feeling-engine/src/app.py`'s rule-based analyzers.

use std::time::Instant;

use gateway_core::clients::feeling::AffectRecord;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "like", "happy", "joy", "pleased",
    "satisfied", "awesome", "perfect", "brilliant", "outstanding", "superb", "terrific",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "dislike", "sad", "angry", "frustrated", "annoyed",
    "disappointed", "upset", "worried", "scared", "afraid", "dreadful", "pathetic", "useless",
];

const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "so", "too", "quite"];

const EMOTION_LEXICON: &[(&str, &[&str])] = &[
    ("joy", &["happy", "excited", "delighted", "thrilled", "joyful", "cheerful", "glad"]),
    ("sadness", &["sad", "unhappy", "depressed", "sorrow", "grief", "melancholy", "blue"]),
    ("anger", &["angry", "mad", "furious", "irritated", "annoyed", "frustrated", "rage"]),
    ("fear", &["scared", "afraid", "terrified", "anxious", "worried", "frightened", "panic"]),
    ("surprise", &["surprised", "shocked", "amazed", "astonished", "startled", "unexpected"]),
    ("disgust", &["disgusted", "repulsed", "gross", "sick", "nauseous", "revolted"]),
];

const URGENT_WORDS: &[&str] = &[
    "urgent", "emergency", "asap", "immediately", "right now", "quickly", "critical", "important", "deadline",
    "rush", "hurry", "fast",
];

const LOW_URGENCY_WORDS: &[&str] = &["whenever", "sometime", "eventually", "later", "no rush", "take your time"];

fn words(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string()).collect()
}

fn sentiment(text: &str, tokens: &[String]) -> (&'static str, f64) {
    let mut positive_score = 0.0;
    let mut negative_score = 0.0;
    for (i, word) in tokens.iter().enumerate() {
        let multiplier = if i > 0 && INTENSIFIERS.contains(&tokens[i - 1].as_str()) { 1.5 } else { 1.0 };
        if POSITIVE_WORDS.contains(&word.as_str()) {
            positive_score += multiplier;
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            negative_score += multiplier;
        }
    }

    let total = tokens.len().max(1) as f64;
    if tokens.is_empty() {
        return ("neutral", 0.5);
    }
    if positive_score > negative_score {
        ("positive", (positive_score / (total * 0.1)).min(0.9))
    } else if negative_score > positive_score {
        ("negative", (negative_score / (total * 0.1)).min(0.9))
    } else {
        ("neutral", 0.5)
    }
}

fn emotions(text_lower: &str) -> Vec<String> {
    EMOTION_LEXICON
        .iter()
        .filter(|(_, patterns)| patterns.iter().any(|p| text_lower.contains(p)))
        .map(|(name, _)| name.to_string())
        .collect()
}

fn dialog_act(text_lower: &str) -> &'static str {
    let trimmed = text_lower.trim();
    if trimmed.ends_with('?')
        || ["what", "how", "why", "when", "where", "who", "which"].iter().any(|w| trimmed.contains(w))
    {
        return "question";
    }
    if trimmed.starts_with("please")
        || ["can you", "would you", "could you", "do this", "make"].iter().any(|p| trimmed.contains(p))
    {
        return "command";
    }
    if trimmed.ends_with('!') || ["wow", "oh", "ah", "yeah", "yes"].iter().any(|p| trimmed.contains(p)) {
        return "exclamation";
    }
    if ["i see", "okay", "alright", "got it", "understood", "agreed"].iter().any(|p| trimmed.contains(p)) {
        return "acknowledgment";
    }
    "statement"
}

fn urgency(text_lower: &str) -> &'static str {
    let urgent = URGENT_WORDS.iter().any(|w| text_lower.contains(w));
    let low = LOW_URGENCY_WORDS.iter().any(|w| text_lower.contains(w));
    if urgent {
        "high"
    } else if low {
        "low"
    } else {
        "medium"
    }
}

pub fn analyze(text: &str) -> AffectRecord {
    let started = Instant::now();
    let text_lower = text.to_lowercase();
    let tokens = words(text);
    let (sentiment, confidence) = sentiment(text, &tokens);

    AffectRecord {
        sentiment: sentiment.to_string(),
        emotions: emotions(&text_lower),
        dialog_act: dialog_act(&text_lower).to_string(),
        urgency: urgency(&text_lower).to_string(),
        confidence,
        processing_time_ms: started.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_positive_sentiment_with_intensifier() {
        let record = analyze("This is really wonderful news");
        assert_eq!(record.sentiment, "positive");
    }

    #[test]
    fn detects_fear_emotion_and_question_act() {
        let record = analyze("Why am I so scared and anxious about this?");
        assert!(record.emotions.contains(&"fear".to_string()));
        assert_eq!(record.dialog_act, "question");
    }

    #[test]
    fn detects_high_urgency() {
        let record = analyze("This is urgent, I need this ASAP");
        assert_eq!(record.urgency, "high");
    }

    #[test]
    fn empty_text_is_neutral() {
        let record = analyze("   ");
        assert_eq!(record.sentiment, "neutral");
    }
}
