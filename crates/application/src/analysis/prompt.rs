//! Prompt construction for analysis and summarization.

use cv_screen_common::text::truncate_chars;

/// Template for scoring a CV against a job description.
///
/// The model is instructed to reply with a single JSON object matching the
/// `CvAnalysis` shape; parsing is lenient regardless.
const ANALYSIS_TEMPLATE: &str = r#"You are an expert HR recruiter analyzing a CV against job requirements. Be objective and thorough.

Job Description:
{job}

CV Content:
{cv}

Follow these strict scoring guidelines:

Essential Skills Match (40% of total score):
- Compare required skills in job description with CV
- Award points for exact matches and relevant equivalents
- Consider both technical and soft skills

Experience Relevance (30% of total score):
- Years of relevant experience
- Industry relevance
- Project/role similarities

Education Fit (15% of total score):
- Required degree/certification matches
- Field of study relevance

Additional Qualifications (15% of total score):
- Extra relevant certifications
- Industry recognition
- Publications/patents if applicable

Provide a JSON response with these fields:
{
    "match_score": <calculated score between 0-1>,
    "breakdown": {
        "essential_skills": <score 0-1>,
        "experience": <score 0-1>,
        "education": <score 0-1>,
        "additional": <score 0-1>
    },
    "strengths": ["specific strength 1", "specific strength 2"],
    "weaknesses": ["specific weakness 1", "specific weakness 2"],
    "key_skills": ["matched skill 1", "matched skill 2"],
    "recommendation": "Detailed recommendation explaining score and key factors"
}

Only return valid JSON, no other text."#;

/// Template for summarizing a job description.
const SUMMARY_TEMPLATE: &str = r#"Please provide a concise summary of this job description, highlighting the key requirements and responsibilities:

{job}

Format the response as a JSON object with the following structure:
{
    "summary": "A brief summary of the job",
    "key_requirements": ["List of main requirements"],
    "key_responsibilities": ["List of main responsibilities"]
}

Only return valid JSON, no other text."#;

/// Build the CV analysis prompt, truncating both inputs to `max_chars`.
pub fn build_analysis_prompt(job_description: &str, cv_text: &str, max_chars: usize) -> String {
    ANALYSIS_TEMPLATE
        .replace("{job}", truncate_chars(job_description, max_chars))
        .replace("{cv}", truncate_chars(cv_text, max_chars))
}

/// Build the job summary prompt, truncating the description to `max_chars`.
pub fn build_summary_prompt(job_description: &str, max_chars: usize) -> String {
    SUMMARY_TEMPLATE.replace("{job}", truncate_chars(job_description, max_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_contains_inputs() {
        let prompt = build_analysis_prompt("Rust engineer wanted", "Ten years of Rust", 4000);
        assert!(prompt.contains("Rust engineer wanted"));
        assert!(prompt.contains("Ten years of Rust"));
        assert!(prompt.contains("match_score"));
    }

    #[test]
    fn test_analysis_prompt_truncates() {
        let long_cv = "x".repeat(10_000);
        let prompt = build_analysis_prompt("desc", &long_cv, 4000);
        // The full 10k-character CV must not survive truncation
        assert!(!prompt.contains(&long_cv));
        assert!(prompt.contains(&"x".repeat(4000)));
    }

    #[test]
    fn test_summary_prompt() {
        let prompt = build_summary_prompt("Build and operate services", 4000);
        assert!(prompt.contains("Build and operate services"));
        assert!(prompt.contains("key_requirements"));
    }
}
