//! Shared test fixtures: sample documents and canned model replies.

/// A realistic job description used across tests.
pub const SAMPLE_JOB_DESCRIPTION: &str = "\
We are hiring a Backend Engineer to build and operate data-heavy services. \
You will design REST APIs, own PostgreSQL schemas, and deploy with Docker on AWS. \
Requirements: 5+ years of backend experience, strong SQL, Python or Rust, \
and solid communication skills. A computer science degree is preferred.";

/// A realistic CV text used across tests.
pub const SAMPLE_CV_TEXT: &str = "\
Senior software engineer with 8 years of experience building web services in \
Python and Rust. Designed REST APIs backed by PostgreSQL, containerized with \
Docker, and deployed to AWS. Led a team of four; strong communication and \
mentoring record. BSc in Computer Science.";

/// A minimal importable jobs CSV with two valid rows and one skippable row.
pub fn jobs_csv() -> String {
    "Job Title,Job Description,Requirements\n\
     Backend Engineer,Build and operate services,Rust and SQL\n\
     Data Engineer,'''Maintain pipelines''',\n\
     Empty Role,,\n"
        .to_string()
}

/// A well-formed analysis reply with the given aggregate score in every
/// breakdown dimension.
pub fn analysis_reply(score: f64) -> String {
    format!(
        r#"{{
            "match_score": {score},
            "breakdown": {{
                "essential_skills": {score},
                "experience": {score},
                "education": {score},
                "additional": {score}
            }},
            "strengths": ["relevant backend experience"],
            "weaknesses": ["no Kubernetes exposure"],
            "key_skills": ["Python", "PostgreSQL"],
            "recommendation": "Solid match for the role"
        }}"#
    )
}

/// An analysis reply wrapped in a markdown fence with prose around it.
pub fn fenced_analysis_reply(score: f64) -> String {
    format!(
        "Here is my assessment:\n```json\n{}\n```\nLet me know if you need more.",
        analysis_reply(score)
    )
}

/// A reply containing no JSON at all.
pub fn prose_reply() -> String {
    "I am unable to produce a structured assessment for this candidate.".to_string()
}

/// A well-formed job summary reply.
pub fn summary_reply() -> String {
    r#"{
        "summary": "Backend engineering role focused on data-heavy services",
        "key_requirements": ["5+ years backend experience", "Strong SQL"],
        "key_responsibilities": ["Design REST APIs", "Own PostgreSQL schemas"]
    }"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_replies_parse() {
        let analysis: serde_json::Value = serde_json::from_str(&analysis_reply(0.9)).unwrap();
        assert_eq!(analysis["match_score"], 0.9);

        let summary: serde_json::Value = serde_json::from_str(&summary_reply()).unwrap();
        assert!(summary["key_requirements"].is_array());
    }

    #[test]
    fn test_jobs_csv_has_required_columns() {
        let csv = jobs_csv();
        assert!(csv.starts_with("Job Title,Job Description"));
    }
}
