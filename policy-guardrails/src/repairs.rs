//! Repair-suggestion lookup table (spec §4.5), grounded in
//! `13-policy-guardrails/src/app.py::get_repair_suggestion`.

/// Picks a fixed repair suggestion keyed by substring match on the issue
/// category, same precedence order as the original. `lane == "emotional"`
/// gets a lane-specific length repair.
pub fn suggestion_for(issue: &str, lane: &str) -> &'static str {
    let issue_lower = issue.to_lowercase();
    if issue_lower.contains("security") {
        "Remove or replace insecure code patterns (eval, exec, password literals, etc.)"
    } else if issue_lower.contains("syntax") {
        "Fix syntax errors in code examples"
    } else if issue_lower.contains("length") {
        if lane == "emotional" {
            "Reduce response to 3-5 sentences"
        } else {
            "Shorten content to meet length requirements"
        }
    } else if issue_lower.contains("tone") {
        "Use more supportive and appropriate language"
    } else if issue_lower.contains("appropriate") {
        "Remove inappropriate or harmful content"
    } else if issue_lower.contains("originality") || issue_lower.contains("plagiarism") {
        "Ensure content is original and not plagiarized"
    } else if issue_lower.contains("coherence") {
        "Improve sentence structure and punctuation"
    } else if issue_lower.contains("engagement") {
        "Make content more engaging and compelling"
    } else if issue_lower.contains("logic") || issue_lower.contains("logical") {
        "Fix logical inconsistencies in reasoning"
    } else if issue_lower.contains("evidence") {
        "Provide stronger evidence and avoid unsubstantiated claims"
    } else if issue_lower.contains("objectivity") || issue_lower.contains("subjective") {
        "Use more objective language and avoid personal opinions"
    } else if issue_lower.contains("schema") {
        "Adjust the response to match the required JSON schema"
    } else {
        "Review and revise content according to lane guidelines"
    }
}
