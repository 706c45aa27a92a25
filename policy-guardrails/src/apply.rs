//! `apply(lane, base_system, user_text, affect, drive)` (spec §4.5),
//! grounded in `13-policy-guardrails/src/app.py::apply_policy`.

use gateway_core::clients::policy::Validator;

use crate::filters;
use crate::lanes::{self, render_template, schema_for};

pub struct ApplyOutcome {
    pub system_final: String,
    pub validators: Vec<Validator>,
}

pub fn apply(lane_name: &str, emotion: &str, intensity: f64, energy: f64, focus: f64) -> Option<ApplyOutcome> {
    let lane = lanes::find(lane_name)?;
    let system_final = render_template(lane, emotion, intensity, energy, focus);

    let mut validators = vec![Validator {
        kind: "schema".to_string(),
        schema: Some(schema_for(lane_name)),
        pattern: None,
        description: format!("JSON schema validation for {lane_name} responses"),
    }];

    for filter_name in lane.filters {
        let Some(config) = filters::find(filter_name) else { continue };
        for pattern in config.patterns {
            validators.push(Validator {
                kind: "filter".to_string(),
                schema: None,
                pattern: Some((*pattern).to_string()),
                description: config.description.to_string(),
            });
        }
    }

    Some(ApplyOutcome { system_final, validators })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_technical_lane_builds_schema_plus_pattern_validators() {
        let outcome = apply("technical", "calm", 0.3, 0.6, 0.5).unwrap();
        assert_eq!(outcome.validators[0].kind, "schema");
        assert!(outcome.validators.iter().skip(1).all(|v| v.kind == "filter"));
        assert!(outcome.system_final.contains("calm"));
    }

    #[test]
    fn unknown_lane_returns_none() {
        assert!(apply("bogus", "calm", 0.3, 0.6, 0.5).is_none());
    }
}
