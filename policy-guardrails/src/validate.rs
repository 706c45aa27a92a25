//! `validate(lane, text)` (spec §4.5): filters, a JSON-looking-text schema
//! check, and a length bound, each converted to a `repair` entry.

use gateway_core::clients::policy::Repair;

use crate::filters::apply_filters;
use crate::lanes::{self, LaneConfig};
use crate::repairs::suggestion_for;

/// Checks only that bracketed JSON is valid JSON, is an object, and has
/// every field the lane's schema marks `required` — not a full JSON-Schema
/// draft evaluator (no such crate is part of the carried stack), but
/// enough to catch the obvious "model ignored the schema" failure mode.
fn looks_like_json_object(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with('{') && trimmed.ends_with('}')
}

fn matches_schema(text: &str, lane: &LaneConfig) -> bool {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(text) else {
        return false;
    };
    lane.required_fields.iter().all(|field| map.contains_key(*field))
}

pub struct ValidationOutcome {
    pub ok: bool,
    pub repairs: Vec<Repair>,
}

pub fn validate(lane_name: &str, text: &str) -> Option<ValidationOutcome> {
    let lane = lanes::find(lane_name)?;

    let mut issues: Vec<(&'static str, String, &'static str)> =
        apply_filters(text, lane.filters).into_iter().map(|issue| (issue.kind, issue.issue, issue.severity)).collect();

    if looks_like_json_object(text) && !matches_schema(text, lane) {
        issues.push(("schema", "Content does not match required JSON schema".to_string(), "high"));
    }

    if text.chars().count() > lane.max_length {
        issues.push(("length", format!("Content exceeds maximum length of {} characters", lane.max_length), "medium"));
    }

    let repairs = issues
        .into_iter()
        .map(|(kind, issue, severity)| {
            let repair = suggestion_for(&issue, lane_name).to_string();
            Repair { kind: kind.to_string(), issue, repair, severity: severity.to_string() }
        })
        .collect::<Vec<_>>();

    Some(ValidationOutcome { ok: repairs.is_empty(), repairs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        let outcome = validate("technical", "This explains the concept clearly and safely.").unwrap();
        assert!(outcome.ok);
    }

    #[test]
    fn insecure_code_fails_with_security_repair() {
        let outcome = validate("technical", "result = eval(user_input)").unwrap();
        assert!(!outcome.ok);
        assert!(outcome.repairs.iter().any(|r| r.repair.contains("eval")));
    }

    #[test]
    fn malformed_json_object_fails_schema_check() {
        let outcome = validate("technical", "{\"code\": \"print(1)\"}").unwrap();
        assert!(!outcome.ok);
        assert!(outcome.repairs.iter().any(|r| r.kind == "schema"));
    }

    #[test]
    fn unknown_lane_returns_none() {
        assert!(validate("bogus", "text").is_none());
    }
}
