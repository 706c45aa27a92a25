//! Intent classification family and the record produced by the Intent Router
//! (spec §3 "Intent Record", §4.2).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Content family, in strict precedence order PSYCHOTHERAPY > REGULATED >
/// LEGAL > TECH > GENERAL_PRECISION > OPEN_ENDED (spec §4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Family {
    Psychotherapy,
    Regulated,
    Legal,
    Tech,
    GeneralPrecision,
    OpenEnded,
}

impl Family {
    /// Emotion template id mapping per spec §4.2.
    pub fn emotion_template_id(self) -> &'static str {
        match self {
            Family::Tech | Family::Legal | Family::Regulated => "none",
            Family::Psychotherapy => "empathy_therapist",
            Family::GeneralPrecision => "self_monitor",
            Family::OpenEnded => "stakes",
        }
    }

    /// Provider preference per spec §4.2 (REGULATED is local unless the
    /// caller opts in to remote; TECH/LEGAL/PSYCHOTHERAPY are remote;
    /// PRECISION/OPEN_ENDED are local).
    pub fn provider_preference(self, regulated_remote_opt_in: bool) -> ProviderPreference {
        match self {
            Family::Regulated => {
                if regulated_remote_opt_in {
                    ProviderPreference::Remote
                } else {
                    ProviderPreference::Local
                }
            }
            Family::Tech | Family::Legal | Family::Psychotherapy => ProviderPreference::Remote,
            Family::GeneralPrecision | Family::OpenEnded => ProviderPreference::Local,
        }
    }

    /// Whether `/classify`'s coarse `needs_remote` flag should be set for
    /// this family (SPEC_FULL §10.3).
    pub fn needs_remote(self) -> bool {
        matches!(self, Family::Psychotherapy | Family::Tech | Family::Legal)
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Family::Psychotherapy => "PSYCHOTHERAPY",
            Family::Regulated => "REGULATED",
            Family::Legal => "LEGAL",
            Family::Tech => "TECH",
            Family::GeneralPrecision => "GENERAL_PRECISION",
            Family::OpenEnded => "OPEN_ENDED",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderPreference {
    Local,
    Remote,
}

/// Intent Record (spec §3): produced once per call by the Intent Router,
/// immutable thereafter in the `PipelineContext`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentRecord {
    pub family: Family,
    pub needs_remote: bool,
    pub emotion_template_id: String,
    pub provider_preference: ProviderPreference,
    pub suggested_model_priority: Vec<String>,
    pub tags: HashSet<String>,
}

impl IntentRecord {
    /// Default used when the Intent Router call fails (spec §4.1 step 1):
    /// family OPEN_ENDED, needs_remote false.
    pub fn fallback_open_ended() -> Self {
        Self {
            family: Family::OpenEnded,
            needs_remote: false,
            emotion_template_id: Family::OpenEnded.emotion_template_id().to_string(),
            provider_preference: ProviderPreference::Local,
            suggested_model_priority: Vec::new(),
            tags: HashSet::new(),
        }
    }

    /// Tags that a family implies regardless of what the classifier found,
    /// per the testable property in spec §8: TECH/LEGAL/REGULATED carry
    /// `"no_emotion"` unless the caller opted out; PSYCHOTHERAPY carries
    /// `"psychotherapy"`.
    pub fn implied_tags(family: Family, opted_out_of_no_emotion: bool) -> HashSet<String> {
        let mut tags = HashSet::new();
        if matches!(family, Family::Tech | Family::Legal | Family::Regulated) && !opted_out_of_no_emotion {
            tags.insert("no_emotion".to_string());
        }
        if family == Family::Psychotherapy {
            tags.insert("psychotherapy".to_string());
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regulated_defaults_to_local() {
        assert_eq!(
            Family::Regulated.provider_preference(false),
            ProviderPreference::Local
        );
        assert_eq!(
            Family::Regulated.provider_preference(true),
            ProviderPreference::Remote
        );
    }

    #[test]
    fn emotion_templates_match_spec_table() {
        assert_eq!(Family::Tech.emotion_template_id(), "none");
        assert_eq!(Family::Legal.emotion_template_id(), "none");
        assert_eq!(Family::Regulated.emotion_template_id(), "none");
        assert_eq!(Family::Psychotherapy.emotion_template_id(), "empathy_therapist");
        assert_eq!(Family::GeneralPrecision.emotion_template_id(), "self_monitor");
        assert_eq!(Family::OpenEnded.emotion_template_id(), "stakes");
    }

    #[test]
    fn implied_tags_no_emotion_for_tech_legal_regulated() {
        assert!(IntentRecord::implied_tags(Family::Tech, false).contains("no_emotion"));
        assert!(IntentRecord::implied_tags(Family::Legal, false).contains("no_emotion"));
        assert!(IntentRecord::implied_tags(Family::Regulated, false).contains("no_emotion"));
        assert!(!IntentRecord::implied_tags(Family::OpenEnded, false).contains("no_emotion"));
        assert!(!IntentRecord::implied_tags(Family::Tech, true).contains("no_emotion"));
    }

    #[test]
    fn implied_tags_psychotherapy() {
        let tags = IntentRecord::implied_tags(Family::Psychotherapy, false);
        assert!(tags.contains("psychotherapy"));
    }
}
