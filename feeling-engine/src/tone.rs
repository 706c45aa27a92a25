//! Tone policy generation (spec §4.6). The wire contract hands this
//! service an already-computed [`AffectRecord`] rather than raw text
//! (`POST /affect/tone {affect}`), so policy selection works off
//! sentiment/emotion/urgency/dialog_act instead of the keyword indicators
//! `03-feeling-engine/src/app.py::TonePolicyGenerator` used against raw
//! input — same shape of output, different inputs available at this seam.

use gateway_core::clients::feeling::AffectRecord;

pub struct TonePolicies {
    pub tone_policies: Vec<String>,
    pub primary_tone: String,
    pub confidence: f64,
}

pub fn generate_policies(affect: &AffectRecord) -> TonePolicies {
    let mut policies = Vec::new();
    let mut primary_tone = "neutral".to_string();

    match affect.sentiment.as_str() {
        "negative" if !affect.emotions.is_empty() => {
            policies.push("Lead with empathy before addressing the substance".to_string());
            primary_tone = "empathetic".to_string();
        }
        "positive" => {
            policies.push("Match the user's positive energy, stay warm".to_string());
            primary_tone = "warm".to_string();
        }
        _ => {}
    }

    match affect.urgency.as_str() {
        "high" => {
            policies.push("Be direct and efficient, skip preamble".to_string());
            if primary_tone == "neutral" {
                primary_tone = "direct".to_string();
            }
        }
        "low" => policies.push("No need to rush the response".to_string()),
        _ => {}
    }

    if affect.dialog_act == "question" {
        policies.push("Answer the question plainly before elaborating".to_string());
    }

    if policies.is_empty() {
        policies = vec![
            "Use clear and concise language".to_string(),
            "Maintain professional yet approachable tone".to_string(),
            "Be helpful and informative".to_string(),
        ];
    }

    TonePolicies { tone_policies: policies, primary_tone, confidence: 0.8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn affect(sentiment: &str, emotions: Vec<&str>, urgency: &str, dialog_act: &str) -> AffectRecord {
        AffectRecord {
            sentiment: sentiment.to_string(),
            emotions: emotions.into_iter().map(String::from).collect(),
            dialog_act: dialog_act.to_string(),
            urgency: urgency.to_string(),
            confidence: 0.8,
            processing_time_ms: 1,
        }
    }

    #[test]
    fn negative_with_emotion_yields_empathetic_tone() {
        let result = generate_policies(&affect("negative", vec!["fear"], "medium", "statement"));
        assert_eq!(result.primary_tone, "empathetic");
    }

    #[test]
    fn high_urgency_adds_direct_policy() {
        let result = generate_policies(&affect("neutral", vec![], "high", "statement"));
        assert!(result.tone_policies.iter().any(|p| p.contains("direct")));
    }

    #[test]
    fn flat_affect_falls_back_to_default_policies() {
        let result = generate_policies(&affect("neutral", vec![], "medium", "statement"));
        assert_eq!(result.primary_tone, "neutral");
        assert_eq!(result.tone_policies.len(), 3);
    }
}
