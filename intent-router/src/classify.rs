//! Family classification (spec §4.2, SPEC_FULL §10.3): a strict first-match
//! walk over precedence-ordered keyword/regex groups.

use std::sync::OnceLock;

use regex::Regex;

use gateway_core::Family;

struct Groups {
    psychotherapy: Vec<Regex>,
    regulated: Vec<Regex>,
    legal: Vec<Regex>,
    tech: Vec<Regex>,
    general_precision: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(&format!("(?i){p}")).expect("valid classify regex")).collect()
}

static GROUPS: OnceLock<Groups> = OnceLock::new();

fn groups() -> &'static Groups {
    GROUPS.get_or_init(|| Groups {
        psychotherapy: compile(&[
            r"\btherapy\b", r"\btherapist\b", r"\banxious\b", r"\banxiety\b", r"\bdepress", r"\bsuicid",
            r"\bself-harm\b", r"\bpanic attack\b", r"\bcounsel", r"\bi feel\b", r"\bi'?m feeling\b",
        ]),
        regulated: compile(&[
            r"\bhipaa\b", r"\bsox\b", r"\bpci-dss\b", r"\bcompliance\b", r"\bregulatory\b", r"\baudit trail\b",
            r"\bfinancial data processing\b", r"\bgdpr\b",
        ]),
        legal: compile(&[
            r"\bcontract\b", r"\blawsuit\b", r"\bliability\b", r"\bterms of service\b", r"\blegal advice\b",
            r"\battorney\b", r"\bstatute\b",
        ]),
        tech: compile(&[
            r"\b(code|programming|debug|function|class)\b",
            r"\b(python|javascript|typescript|java|c\+\+)\b",
            r"\b(algorithm|implementation|refactor)\b",
            r"\b(github|repository|commit|pull request)\b",
            r"\bdef\b", r"\bimport\b", r"#include", r"\basync def\b", r"\bpublic static\b",
        ]),
        general_precision: compile(&[
            r"\bprove\b", r"\bproof\b", r"\btheorem\b", r"\balways true\b", r"\bexactly\b", r"\bprecisely\b",
            r"\bcalculate the exact\b",
        ]),
    })
}

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

/// Classifies `text` into a [`Family`] by a strict precedence walk
/// (PSYCHOTHERAPY > REGULATED > LEGAL > TECH > GENERAL_PRECISION >
/// OPEN_ENDED), per spec §4.2. REGULATED is checked before LEGAL so a
/// `gdpr`-adjacent compliance keyword wins outright even when `contract`
/// is also present (SPEC_FULL §10.3).
pub fn classify_family(text: &str) -> Family {
    let g = groups();
    if any_match(&g.psychotherapy, text) {
        Family::Psychotherapy
    } else if any_match(&g.regulated, text) {
        Family::Regulated
    } else if any_match(&g.legal, text) {
        Family::Legal
    } else if text.contains("```") || any_match(&g.tech, text) {
        Family::Tech
    } else if any_match(&g.general_precision, text) {
        Family::GeneralPrecision
    } else {
        Family::OpenEnded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psychotherapy_takes_precedence() {
        assert_eq!(classify_family("I feel anxious about my contract with HIPAA compliance"), Family::Psychotherapy);
    }

    #[test]
    fn regulated_wins_over_legal_on_gdpr_plus_contract() {
        assert_eq!(classify_family("our GDPR compliance audit trail covers this contract"), Family::Regulated);
    }

    #[test]
    fn legal_without_regulated_keywords() {
        assert_eq!(classify_family("can you review this contract for liability issues"), Family::Legal);
    }

    #[test]
    fn tech_from_code_fence() {
        assert_eq!(classify_family("```\nprint('hi')\n```"), Family::Tech);
    }

    #[test]
    fn general_precision_from_proof_language() {
        assert_eq!(classify_family("prove that this theorem is always true"), Family::GeneralPrecision);
    }

    #[test]
    fn open_ended_default() {
        assert_eq!(classify_family("tell me a fun fact about otters"), Family::OpenEnded);
    }
}
