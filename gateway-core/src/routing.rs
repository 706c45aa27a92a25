//! Routing Policy (spec §4.3): in-gateway provider/model selection over
//! content analysis, plus the remote-escalation heuristic from Pre stage
//! step 2 (spec §4.1, SPEC_FULL §10.2).

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::ServiceError;
use crate::message::ChatMessage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Local,
    Remote,
}

/// `(provider, model)` pair chosen by the Routing Policy (spec §4.3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDecision {
    pub provider: Provider,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct ModelSlugs {
    pub default_local: String,
    pub vision: String,
    pub explicit: String,
    pub coder: String,
    pub toolcall: String,
}

/// Inputs the Routing Policy decides over (spec §4.3).
pub struct RoutingInput<'a> {
    pub messages: &'a [ChatMessage],
    pub has_tools: bool,
    pub force_model: Option<&'a str>,
    pub remote_available: bool,
    pub local_available: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum RoutingError {
    #[error("no provider available")]
    NoProviderAvailable,
}

struct ContentGroups {
    explicit: Vec<Regex>,
    vision: Vec<Regex>,
    coding: Vec<Regex>,
    tools: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid routing regex"))
        .collect()
}

static GROUPS: OnceLock<ContentGroups> = OnceLock::new();

fn groups() -> &'static ContentGroups {
    GROUPS.get_or_init(|| ContentGroups {
        explicit: compile(&[
            r"\b(sex|sexual|porn|xxx|nude|explicit|nsfw)\b",
            r"\b(erotic|sensual|intimate|seductive)\b",
            r"\b(fetish|bdsm|kinky|adult content)\b",
        ]),
        vision: compile(&[
            r"\b(image|photo|picture|visual|diagram)\b",
            r"\b(see|look|view|analyze.*image)\b",
            r"\b(what.*in.*image|describe.*image)\b",
        ]),
        coding: compile(&[
            r"\b(code|programming|debug|function|class)\b",
            r"\b(python|javascript|typescript|java|c\+\+)\b",
            r"\b(algorithm|implementation|refactor)\b",
            r"\b(github|repository|commit|pull request)\b",
        ]),
        tools: compile(&[
            r"\b(call|invoke|execute|run).*\b(tool|function|api)\b",
            r"\b(search|lookup|find|fetch)\b",
            r"\b(calculate|compute|analyze|process)\b",
        ]),
    })
}

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

fn concatenated_text(messages: &[ChatMessage]) -> String {
    messages.iter().map(|m| m.content.as_str()).collect::<Vec<_>>().join(" ")
}

fn has_image_attachment(messages: &[ChatMessage]) -> bool {
    messages.iter().any(|m| m.has_image())
}

/// Decides `(provider, model)` per spec §4.3's decision order.
pub fn decide(input: &RoutingInput<'_>, models: &ModelSlugs) -> Result<RouteDecision, RoutingError> {
    // Step 1: force_model.
    if let Some(forced) = input.force_model {
        if let Some(local_model) = forced.strip_prefix("local/") {
            return Ok(RouteDecision { provider: Provider::Local, model: local_model.to_string() });
        }
        if !forced.is_empty() {
            return Ok(RouteDecision { provider: Provider::Remote, model: forced.to_string() });
        }
    }

    // Step 2: provider availability fallback.
    if !input.remote_available {
        if input.local_available {
            return Ok(RouteDecision { provider: Provider::Local, model: models.default_local.clone() });
        }
        return Err(RoutingError::NoProviderAvailable);
    }

    // Step 3+4: content analysis, first match wins.
    let text = concatenated_text(input.messages);
    let g = groups();

    if has_image_attachment(input.messages) || any_match(&g.vision, &text) {
        return Ok(RouteDecision { provider: Provider::Remote, model: models.vision.clone() });
    }
    if any_match(&g.explicit, &text) {
        return Ok(RouteDecision { provider: Provider::Remote, model: models.explicit.clone() });
    }
    if any_match(&g.coding, &text) {
        return Ok(RouteDecision { provider: Provider::Remote, model: models.coder.clone() });
    }
    if input.has_tools || any_match(&g.tools, &text) {
        return Ok(RouteDecision { provider: Provider::Remote, model: models.toolcall.clone() });
    }

    Ok(RouteDecision { provider: Provider::Remote, model: models.toolcall.clone() })
}

/// Fallback on routing/provider error (spec §4.3 "Fallback policy on error"):
/// if the primary pick was remote and local is available, fall back to local.
pub fn fallback(primary: &RouteDecision, local_available: bool, default_local: &str) -> Option<RouteDecision> {
    if primary.provider == Provider::Remote && local_available {
        Some(RouteDecision { provider: Provider::Local, model: default_local.to_string() })
    } else {
        None
    }
}

/// Remote-escalation heuristic (spec §4.1 step 2, SPEC_FULL §10.2): flips
/// `needs_remote` to true when the user text looks like code, a
/// performance/concurrency discussion, is long, or explicitly asks for a
/// bigger model.
pub fn should_escalate_to_remote(text: &str) -> bool {
    // `def`/`class`/`import` are anchored with a trailing space so ordinary
    // words ("important", "classic", "indefinitely") don't match; the rest
    // are already distinctive enough as plain substrings.
    const ANCHORED_LANGUAGE_KEYWORDS: &[&str] = &["def ", "class ", "import "];
    const LANGUAGE_KEYWORDS: &[&str] = &["#include", "async def", "public static"];
    const KEYWORDS: &[&str] = &[
        "optimize", "refactor", "algorithm", "complexity", "asyncio", "deadlock", "thread", "socket", "performance",
        "vectorize",
    ];
    const UPSCALE_PHRASES: &[&str] = &["gpt-4", "larger model", "highest quality", "best model"];
    const LENGTH_THRESHOLD: usize = 350;

    if text.contains("```") {
        return true;
    }
    let lowered = text.to_lowercase();
    if ANCHORED_LANGUAGE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return true;
    }
    if LANGUAGE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return true;
    }
    if KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return true;
    }
    if UPSCALE_PHRASES.iter().any(|kw| lowered.contains(kw)) {
        return true;
    }
    text.chars().count() >= LENGTH_THRESHOLD
}

/// Per-model retry budget and backoff base (spec §4.3 "Remote call retry").
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}

/// Whether a failed attempt against one model should be retried on the same
/// model (true) or the caller should advance to the next model in the
/// priority list (false), per spec §4.3.
pub fn is_retryable(error: &ServiceError) -> bool {
    error.is_retryable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatMessage;

    fn models() -> ModelSlugs {
        ModelSlugs {
            default_local: "local-default".into(),
            vision: "vision-model".into(),
            explicit: "explicit-model".into(),
            coder: "coder-model".into(),
            toolcall: "toolcall-model".into(),
        }
    }

    #[test]
    fn forced_local_model_wins() {
        let messages = vec![ChatMessage::user("hello")];
        let input = RoutingInput {
            messages: &messages,
            has_tools: false,
            force_model: Some("local/mistral"),
            remote_available: true,
            local_available: true,
        };
        let decision = decide(&input, &models()).unwrap();
        assert_eq!(decision, RouteDecision { provider: Provider::Local, model: "mistral".into() });
    }

    #[test]
    fn coding_text_routes_to_coder_model() {
        let messages = vec![ChatMessage::user("please debug this python function")];
        let input = RoutingInput {
            messages: &messages,
            has_tools: false,
            force_model: None,
            remote_available: true,
            local_available: true,
        };
        let decision = decide(&input, &models()).unwrap();
        assert_eq!(decision.model, "coder-model");
    }

    #[test]
    fn vision_wins_over_explicit_when_both_present() {
        let messages = vec![ChatMessage::user("describe this nsfw image please")];
        let input = RoutingInput {
            messages: &messages,
            has_tools: false,
            force_model: None,
            remote_available: true,
            local_available: true,
        };
        let decision = decide(&input, &models()).unwrap();
        assert_eq!(decision.model, "vision-model");
    }

    #[test]
    fn no_remote_falls_back_to_local_default() {
        let messages = vec![ChatMessage::user("hi")];
        let input = RoutingInput {
            messages: &messages,
            has_tools: false,
            force_model: None,
            remote_available: false,
            local_available: true,
        };
        let decision = decide(&input, &models()).unwrap();
        assert_eq!(decision, RouteDecision { provider: Provider::Local, model: "local-default".into() });
    }

    #[test]
    fn no_provider_available_errors() {
        let messages = vec![ChatMessage::user("hi")];
        let input = RoutingInput {
            messages: &messages,
            has_tools: false,
            force_model: None,
            remote_available: false,
            local_available: false,
        };
        assert!(matches!(decide(&input, &models()), Err(RoutingError::NoProviderAvailable)));
    }

    #[test]
    fn length_threshold_is_inclusive_350() {
        let short = "a".repeat(349);
        let long = "a".repeat(350);
        assert!(!should_escalate_to_remote(&short));
        assert!(should_escalate_to_remote(&long));
    }

    #[test]
    fn code_fence_always_escalates() {
        assert!(should_escalate_to_remote("```\nprint(1)\n```"));
    }

    #[test]
    fn language_keywords_do_not_match_inside_ordinary_words() {
        assert!(!should_escalate_to_remote("this is important and classy, indefinitely so"));
    }

    #[test]
    fn language_keywords_match_with_trailing_space() {
        assert!(should_escalate_to_remote("def handler(x):"));
        assert!(should_escalate_to_remote("class Foo:"));
        assert!(should_escalate_to_remote("import os"));
    }
}
