//! Lenient parsing of model replies.
//!
//! Models are asked for JSON-only replies but routinely wrap the object in
//! prose or markdown fences. The parser extracts the first balanced JSON
//! object from the reply text and deserializes it.

use cv_screen_domain::analysis::CvAnalysis;
use cv_screen_domain::errors::AnalysisError;
use cv_screen_domain::job::JobSummary;

/// Extract the first balanced JSON object from `text`.
///
/// Tracks string and escape state so braces inside string values do not
/// unbalance the scan. Returns `None` when no complete object is present.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a CV analysis from a model reply, clamping all scores.
pub fn parse_analysis(reply: &str) -> Result<CvAnalysis, AnalysisError> {
    let object = extract_json_object(reply)
        .ok_or_else(|| AnalysisError::UnparseableReply(snippet(reply)))?;

    let mut analysis: CvAnalysis = serde_json::from_str(object)
        .map_err(|e| AnalysisError::UnparseableReply(format!("{e}: {}", snippet(object))))?;
    analysis.clamp_scores();
    Ok(analysis)
}

/// Parse a job summary from a model reply.
pub fn parse_summary(reply: &str) -> Result<JobSummary, AnalysisError> {
    let object = extract_json_object(reply)
        .ok_or_else(|| AnalysisError::UnparseableReply(snippet(reply)))?;

    serde_json::from_str(object)
        .map_err(|e| AnalysisError::UnparseableReply(format!("{e}: {}", snippet(object))))
}

/// Bounded snippet of a reply for error messages.
fn snippet(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        let text = r#"{"match_score": 0.7}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_from_fenced_reply() {
        let text = "Here is the analysis:\n```json\n{\"match_score\": 0.7}\n```\nHope that helps!";
        assert_eq!(extract_json_object(text), Some(r#"{"match_score": 0.7}"#));
    }

    #[test]
    fn test_extract_handles_braces_in_strings() {
        let text = r#"{"recommendation": "uses {curly} notation", "match_score": 1}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_none_for_prose() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{unclosed"), None);
    }

    #[test]
    fn test_parse_analysis_clamps() {
        let reply = r#"{"match_score": 1.8, "breakdown": {"essential_skills": -0.3}}"#;
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.match_score, 1.0);
        assert_eq!(analysis.breakdown.essential_skills, 0.0);
    }

    #[test]
    fn test_parse_analysis_rejects_prose() {
        let err = parse_analysis("I cannot analyze this CV.").unwrap_err();
        assert!(matches!(err, AnalysisError::UnparseableReply(_)));
    }

    #[test]
    fn test_parse_summary() {
        let reply = r#"{"summary": "A role", "key_requirements": ["Rust"], "key_responsibilities": ["Ship"]}"#;
        let summary = parse_summary(reply).unwrap();
        assert_eq!(summary.summary, "A role");
        assert_eq!(summary.key_requirements, vec!["Rust".to_string()]);
    }
}
