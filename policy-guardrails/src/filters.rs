//! The global filter registry (spec §4.5, SPEC_FULL §10.6), grounded in
//! `13-policy-guardrails/src/app.py`'s `FILTER_CONFIGS`.

use std::sync::OnceLock;

use regex::Regex;

pub struct FilterConfig {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
    pub max_sentences: Option<usize>,
    pub severity: &'static str,
    pub description: &'static str,
}

pub const FILTERS: &[FilterConfig] = &[
    FilterConfig {
        name: "security",
        patterns: &[
            r"eval\s*\(",
            r"exec\s*\(",
            r#"password\s*=\s*['"][^'"]*['"]"#,
            r"import\s+os\s*;?\s*os\.system",
            r"subprocess\.(call|Popen|run)",
        ],
        max_sentences: None,
        severity: "high",
        description: "Security vulnerability detected",
    },
    FilterConfig {
        name: "syntax",
        patterns: &[r"def\s+\w+\s*\([^)]*$", r"class\s+\w+\s*:\s*$", r"if\s+.*:\s*$", r"for\s+.*:\s*$"],
        max_sentences: None,
        severity: "medium",
        description: "Syntax error detected",
    },
    FilterConfig {
        name: "imports",
        patterns: &[r"import\s+\w+", r"from\s+\w+\s+import"],
        max_sentences: None,
        severity: "low",
        description: "Import statement validation",
    },
    FilterConfig { name: "length", patterns: &[], max_sentences: Some(5), severity: "medium", description: "Response length exceeds limit" },
    FilterConfig {
        name: "tone",
        patterns: &[r"\b(hate|stupid|idiot|dumb)\b", r"\b(you.*should|you.*must)\b.*!"],
        max_sentences: None,
        severity: "high",
        description: "Inappropriate tone detected",
    },
    FilterConfig {
        name: "appropriateness",
        patterns: &[r"\b(hate|stupid|idiot|dumb|moron)\b", r"\b(die|kill|hurt)\b.*\b(yourself|someone)\b"],
        max_sentences: None,
        severity: "high",
        description: "Inappropriate content detected",
    },
    FilterConfig {
        name: "originality",
        patterns: &["This is a copy of", "Plagiarized from", "Stolen content"],
        max_sentences: None,
        severity: "high",
        description: "Potential plagiarism detected",
    },
    FilterConfig {
        name: "coherence",
        patterns: &[r"\.\s*[A-Z]", r"\?\s*[a-z]", r"!\s*[a-z]"],
        max_sentences: None,
        severity: "low",
        description: "Coherence issue detected",
    },
    FilterConfig {
        name: "engagement",
        patterns: &[r"\b(boring|dull|uninteresting)\b", r"no\s+one\s+cares", r"whatever"],
        max_sentences: None,
        severity: "medium",
        description: "Low engagement content detected",
    },
    FilterConfig {
        name: "logic",
        patterns: &["therefore.*but", "however.*therefore", "because.*although"],
        max_sentences: None,
        severity: "medium",
        description: "Logical inconsistency detected",
    },
    FilterConfig {
        name: "evidence",
        patterns: &[r"because\s+I\s+(think|feel|believe)", "obviously", "clearly"],
        max_sentences: None,
        severity: "low",
        description: "Weak evidence detected",
    },
    FilterConfig {
        name: "objectivity",
        patterns: &[r"I\s+personally\s+(think|believe|feel)", r"In\s+my\s+opinion", r"This\s+is\s+the\s+best"],
        max_sentences: None,
        severity: "low",
        description: "Subjective language detected",
    },
];

pub fn find(name: &str) -> Option<&'static FilterConfig> {
    FILTERS.iter().find(|f| f.name == name)
}

static COMPILED: OnceLock<Vec<(&'static str, Vec<Regex>)>> = OnceLock::new();

fn compiled_patterns() -> &'static [(&'static str, Vec<Regex>)] {
    COMPILED.get_or_init(|| {
        FILTERS
            .iter()
            .map(|f| (f.name, f.patterns.iter().map(|p| Regex::new(&format!("(?i){p}")).expect("valid filter regex")).collect()))
            .collect()
    })
}

pub fn compiled_for(name: &str) -> &'static [Regex] {
    compiled_patterns().iter().find(|(n, _)| *n == name).map(|(_, patterns)| patterns.as_slice()).unwrap_or(&[])
}

/// One `{type, issue, severity}` hit from running `filters` against `text`
/// (spec §4.5: "one issue per filter, not per match").
pub struct Issue {
    pub kind: &'static str,
    pub issue: String,
    pub severity: &'static str,
}

pub fn apply_filters(text: &str, filter_names: &[&'static str]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for name in filter_names {
        let Some(config) = find(name) else { continue };
        if let Some(max_sentences) = config.max_sentences {
            let sentence_count = text.split(['.', '!', '?']).map(str::trim).filter(|s| !s.is_empty()).count();
            if sentence_count > max_sentences {
                issues.push(Issue { kind: "filter", issue: config.description.to_string(), severity: config.severity });
            }
            continue;
        }
        if compiled_for(name).iter().any(|re| re.is_match(text)) {
            issues.push(Issue { kind: "filter", issue: config.description.to_string(), severity: config.severity });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_filter_flags_eval() {
        let issues = apply_filters("result = eval(user_input)", &["security"]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, "high");
    }

    #[test]
    fn length_filter_flags_too_many_sentences() {
        let text = "One. Two. Three. Four. Five. Six.";
        let issues = apply_filters(text, &["length"]);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn clean_text_flags_nothing() {
        let issues = apply_filters("A perfectly reasonable response.", &["security", "tone", "logic"]);
        assert!(issues.is_empty());
    }
}
