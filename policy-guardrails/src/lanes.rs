//! The lane table (spec §4.5, SPEC_FULL §10.6), grounded in
//! `13-policy-guardrails/src/app.py`'s `LANE_CONFIGS`.

use serde_json::{json, Value};

pub struct LaneConfig {
    pub name: &'static str,
    pub template: &'static str,
    pub required_fields: &'static [&'static str],
    pub filters: &'static [&'static str],
    pub max_length: usize,
}

pub fn schema_for(lane: &str) -> Value {
    match lane {
        "technical" => json!({
            "type": "object",
            "properties": {
                "explanation": {"type": "string", "description": "Clear explanation of the technical concept"},
                "code": {"type": "string", "description": "Code example if applicable"},
                "best_practices": {"type": "array", "items": {"type": "string"}, "description": "List of best practices"},
                "security_notes": {"type": "array", "items": {"type": "string"}, "description": "Security considerations"}
            },
            "required": ["explanation"]
        }),
        "emotional" => json!({
            "type": "object",
            "properties": {
                "acknowledgment": {"type": "string", "description": "Acknowledgment of user's feelings"},
                "support": {"type": "string", "description": "Supportive message"},
                "guidance": {"type": "string", "description": "Gentle guidance if appropriate"}
            },
            "additionalProperties": false
        }),
        "creative" => json!({
            "type": "object",
            "properties": {
                "concept": {"type": "string", "description": "Main creative concept or idea"},
                "development": {"type": "string", "description": "Further development of the concept"},
                "elements": {"type": "array", "items": {"type": "string"}, "description": "Key creative elements"}
            },
            "required": ["concept"]
        }),
        _ => json!({
            "type": "object",
            "properties": {
                "analysis": {"type": "string", "description": "Step-by-step analysis"},
                "evidence": {"type": "array", "items": {"type": "string"}, "description": "Supporting evidence"},
                "conclusion": {"type": "string", "description": "Logical conclusion"},
                "alternatives": {"type": "array", "items": {"type": "string"}, "description": "Alternative considerations"}
            },
            "required": ["analysis", "conclusion"]
        }),
    }
}

pub const LANES: &[LaneConfig] = &[
    LaneConfig {
        name: "technical",
        template: "You are a technical assistant. Follow these guidelines:\n\n1. Provide accurate, well-structured technical information\n2. Include code examples when relevant\n3. Explain concepts clearly and concisely\n4. Follow security best practices\n5. Use proper formatting for code and data structures\n\nResponse must conform to this JSON schema:\n{schema}\n\nCurrent context:\n- User affect: {emotion} (intensity: {intensity})\n- Drive state: Energy {energy}, Focus {focus}",
        required_fields: &["explanation"],
        filters: &["security", "syntax", "imports"],
        max_length: 2000,
    },
    LaneConfig {
        name: "emotional",
        template: "You are an empathetic assistant providing emotional support.\n\nGuidelines:\n1. Show genuine empathy and understanding\n2. Keep responses to 3-5 sentences\n3. Use warm, supportive language\n4. Validate feelings without judgment\n5. Offer gentle guidance when appropriate\n\nCurrent emotional context:\n- User affect: {emotion} (intensity: {intensity})\n- Drive state: Energy {energy}, Focus {focus}",
        required_fields: &[],
        filters: &["length", "tone", "appropriateness"],
        max_length: 2000,
    },
    LaneConfig {
        name: "creative",
        template: "You are a creative assistant for writing and ideation.\n\nGuidelines:\n1. Encourage original and imaginative thinking\n2. Provide engaging and compelling content\n3. Maintain narrative coherence and flow\n4. Use descriptive and vivid language\n5. Adapt to the user's creative goals\n\nCurrent context:\n- User affect: {emotion} (intensity: {intensity})\n- Drive state: Energy {energy}, Focus {focus}",
        required_fields: &["concept"],
        filters: &["originality", "coherence", "engagement"],
        max_length: 1500,
    },
    LaneConfig {
        name: "analytical",
        template: "You are an analytical assistant for reasoning and problem-solving.\n\nGuidelines:\n1. Break down complex problems systematically\n2. Provide evidence-based analysis\n3. Consider multiple perspectives\n4. Draw logical conclusions\n5. Present findings clearly and objectively\n\nCurrent context:\n- User affect: {emotion} (intensity: {intensity})\n- Drive state: Energy {energy}, Focus {focus}",
        required_fields: &["analysis", "conclusion"],
        filters: &["logic", "evidence", "objectivity"],
        max_length: 1800,
    },
];

pub fn find(name: &str) -> Option<&'static LaneConfig> {
    LANES.iter().find(|l| l.name == name)
}

/// Substitutes `{schema}`, `{emotion}`, `{intensity}`, `{energy}`, `{focus}`
/// into the lane's template (spec §4.5).
pub fn render_template(lane: &LaneConfig, emotion: &str, intensity: f64, energy: f64, focus: f64) -> String {
    let schema_json = serde_json::to_string_pretty(&schema_for(lane.name)).unwrap_or_default();
    lane.template
        .replace("{schema}", &schema_json)
        .replace("{emotion}", emotion)
        .replace("{intensity}", &intensity.to_string())
        .replace("{energy}", &energy.to_string())
        .replace("{focus}", &focus.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_template_substitutes_all_placeholders() {
        let lane = find("technical").unwrap();
        let rendered = render_template(lane, "calm", 0.4, 0.6, 0.7);
        assert!(rendered.contains("calm"));
        assert!(rendered.contains("0.4"));
        assert!(!rendered.contains("{schema}"));
    }

    #[test]
    fn unknown_lane_has_no_config() {
        assert!(find("bogus").is_none());
    }
}
