//! Emotion templates (spec §4.3, §4.6), grounded in
//! `03-feeling-engine/src/app.py`'s `EMOTION_TEMPLATES` table and
//! `01-intent-router`'s family→template mapping. Exact suffix wording isn't
//! present in the source material (templates were loaded from an external
//! JSON file at runtime there); these suffixes are authored to match each
//! template's label and intent.

pub struct EmotionTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub system_suffix: &'static str,
}

pub const TEMPLATES: &[EmotionTemplate] = &[
    EmotionTemplate { id: "none", label: "No emotional augmentation", system_suffix: "" },
    EmotionTemplate {
        id: "empathy_therapist",
        label: "Therapeutic empathy",
        system_suffix: "Respond with warmth and patience. Validate feelings before offering guidance. Never diagnose; suggest professional help when appropriate.",
    },
    EmotionTemplate {
        id: "self_monitor",
        label: "Self-monitor + verify",
        system_suffix: "Before finalizing your answer, double-check claims for accuracy and flag any uncertainty explicitly.",
    },
    EmotionTemplate {
        id: "stakes",
        label: "High-stakes diligence",
        system_suffix: "Treat this as high-stakes. Be thorough, cite assumptions, and call out risks before concluding.",
    },
];

pub fn find(id: &str) -> &'static EmotionTemplate {
    TEMPLATES.iter().find(|t| t.id == id).unwrap_or_else(|| TEMPLATES.iter().find(|t| t.id == "none").unwrap())
}

/// Appends the template's suffix separated by a blank line; empty suffix
/// (`"none"`) is the identity.
pub fn apply_emotion_suffix(system_prompt: &str, template_id: &str) -> (String, &'static EmotionTemplate) {
    let template = find(template_id);
    let suffix = template.system_suffix.trim();
    let augmented = if suffix.is_empty() { system_prompt.to_string() } else { format!("{}\n\n{}", system_prompt.trim_end(), suffix) };
    (augmented, template)
}
