//! Salvage parsing for model completions.
//!
//! The completion endpoint is asked for strict JSON but routinely wraps it
//! in Markdown fences, prepends prose, or appends stray braces. These
//! helpers pull a usable payload out of whatever came back, and degrade to
//! the raw text when they cannot.

use crate::analyzer::Solution;
use crate::classify::classify;
use crate::subject::Subject;

/// Extract the JSON payload from a completion that may wrap it in Markdown
/// fences or surrounding prose.
///
/// Returns the best candidate slice; callers still have to parse it. If no
/// JSON-looking region exists, the trimmed input is returned unchanged.
pub fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();

    if trimmed.starts_with('{') {
        return balanced_object(trimmed);
    }

    // JSON inside a ```json fence.
    if let Some(start) = trimmed.find("```json") {
        let body = &trimmed[start + 7..];
        if let Some(end) = body.find("```") {
            return balanced_object(body[..end].trim());
        }
    }

    // JSON inside a generic ``` fence, skipping an optional language line.
    if let Some(start) = trimmed.find("```") {
        let body = &trimmed[start + 3..];
        let body_start = body.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = body[body_start..].find("```") {
            return balanced_object(body[body_start..body_start + end].trim());
        }
    }

    // A bare object somewhere in the text.
    if let Some(start) = trimmed.find('{') {
        return balanced_object(&trimmed[start..]);
    }

    trimmed
}

/// Trim a string that starts with `{` down to its balanced object.
///
/// Handles replies where the model appends trailing characters, e.g.
/// `{"ders": "Kimya"}}}` -> `{"ders": "Kimya"}`. Input that does not start
/// with `{` or never balances is returned unchanged.
fn balanced_object(s: &str) -> &str {
    if !s.starts_with('{') {
        return s;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return &s[..=i];
                }
            }
            _ => {}
        }
    }

    s
}

/// Normalize a subject-detection completion onto the canonical set.
///
/// Strips fences, pulls the `ders`/`subject` field if the remainder parses
/// as JSON, and otherwise treats the remainder as the subject name itself.
/// Like [`classify`], this is total: it never errors.
pub fn subject_from_reply(reply: &str) -> Subject {
    let cleaned = extract_json(reply);

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(cleaned) {
        let name = value
            .get("ders")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("subject").and_then(|v| v.as_str()));
        if let Some(name) = name {
            return classify(name);
        }
    }

    classify(cleaned)
}

/// Salvage a solving completion into a [`Solution`].
///
/// Accepts `cozum`/`çözüm`/`solution` for the worked steps and
/// `cevap`/`answer` for the short answer. Malformed JSON degrades to the
/// whole cleaned reply as the steps text; this never fails.
pub fn solution_from_reply(reply: &str) -> Solution {
    let cleaned = extract_json(reply);

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(cleaned) {
        let steps = value
            .get("cozum")
            .or_else(|| value.get("çözüm"))
            .or_else(|| value.get("solution"))
            .and_then(|v| v.as_str());
        if let Some(steps) = steps {
            let answer = value
                .get("cevap")
                .or_else(|| value.get("answer"))
                .and_then(|v| v.as_str())
                .map(str::to_string);
            return Solution {
                steps: steps.to_string(),
                answer,
            };
        }
    }

    Solution {
        steps: cleaned.to_string(),
        answer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_clean_object() {
        let input = r#"{"ders": "Kimya"}"#;
        assert_eq!(extract_json(input), input);
    }

    #[test]
    fn test_extract_json_trailing_braces() {
        let input = r#"{"ders": "Kimya"}}}"#;
        assert_eq!(extract_json(input), r#"{"ders": "Kimya"}"#);
    }

    #[test]
    fn test_extract_json_fenced() {
        let input = "```json\n{\"ders\": \"Kimya\"}\n```";
        assert_eq!(extract_json(input), r#"{"ders": "Kimya"}"#);
    }

    #[test]
    fn test_extract_json_generic_fence() {
        let input = "```\n{\"ders\": \"Fizik\"}\n```";
        assert_eq!(extract_json(input), r#"{"ders": "Fizik"}"#);
    }

    #[test]
    fn test_extract_json_embedded_in_prose() {
        let input = "Here you go: {\"ders\": \"Tarih\"} hope that helps";
        assert_eq!(extract_json(input), r#"{"ders": "Tarih"}"#);
    }

    #[test]
    fn test_extract_json_braces_inside_strings() {
        let input = r#"{"ders": "Kimya", "not": "a } inside"}"#;
        assert_eq!(extract_json(input), input);
    }

    #[test]
    fn test_extract_json_plain_text_passthrough() {
        assert_eq!(extract_json("  Kimya  "), "Kimya");
    }

    #[test]
    fn test_subject_from_fenced_json() {
        let reply = "```json\n{\"ders\": \"Kimya\"}\n```";
        assert_eq!(subject_from_reply(reply), Subject::Kimya);
    }

    #[test]
    fn test_subject_from_english_field_name() {
        let reply = r#"{"subject": "Fizik"}"#;
        assert_eq!(subject_from_reply(reply), Subject::Fizik);
    }

    #[test]
    fn test_subject_from_bare_name() {
        assert_eq!(subject_from_reply("Matematik"), Subject::Matematik);
    }

    #[test]
    fn test_subject_from_broken_json_falls_back_to_text() {
        // Unbalanced JSON never parses; the remainder still carries the name.
        let reply = r#"{"ders": "Biyoloji"#;
        assert_eq!(subject_from_reply(reply), Subject::Biyoloji);
    }

    #[test]
    fn test_subject_from_garbage_is_unknown() {
        assert_eq!(subject_from_reply("asdkjasjd"), Subject::Bilinmeyen);
        assert_eq!(subject_from_reply(""), Subject::Bilinmeyen);
    }

    #[test]
    fn test_solution_from_clean_json() {
        let reply = r#"{"cozum": "Önce türev alınır.", "cevap": "B"}"#;
        let solution = solution_from_reply(reply);
        assert_eq!(solution.steps, "Önce türev alınır.");
        assert_eq!(solution.answer.as_deref(), Some("B"));
    }

    #[test]
    fn test_solution_from_fenced_json_without_answer() {
        let reply = "```json\n{\"çözüm\": \"İki tarafa 3 ekle.\"}\n```";
        let solution = solution_from_reply(reply);
        assert_eq!(solution.steps, "İki tarafa 3 ekle.");
        assert!(solution.answer.is_none());
    }

    #[test]
    fn test_solution_from_prose_degrades_to_steps() {
        let reply = "Adım adım: önce payda eşitlenir, sonra sadeleştirilir.";
        let solution = solution_from_reply(reply);
        assert_eq!(solution.steps, reply);
        assert!(solution.answer.is_none());
    }
}
