//! Skill taxonomy and extraction.
//!
//! The taxonomy is the fixed list of technical and soft skills the platform
//! recognizes when scanning CV text. Extraction is case-insensitive and
//! word-bounded so that, for example, "Java" does not match inside
//! "JavaScript".

use once_cell::sync::Lazy;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Technical skills recognized in CV text.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "Python", "Java", "JavaScript", "C++", "SQL", "AWS", "Azure", "Docker",
    "Kubernetes", "React", "Angular", "Vue.js", "Node.js", "Express", "Django",
    "Flask", "Spring", "Git", "CI/CD", "Jenkins", "Testing", "Machine Learning",
    "AI", "Data Analysis", "Cloud", "DevOps", "Security", "Linux", "Windows",
    "Networking", "API", "REST", "GraphQL", "MongoDB", "PostgreSQL", "MySQL",
    "Oracle", "HTML", "CSS", "PHP", "Ruby", "Scala", "Hadoop", "Spark",
    "TensorFlow", "PyTorch", "NLP", "Computer Vision", "Agile", "Scrum",
];

/// Soft skills recognized in CV text.
pub const SOFT_SKILLS: &[&str] = &[
    "Leadership", "Communication", "Problem Solving", "Team Work", "Time Management",
    "Project Management", "Critical Thinking", "Adaptability", "Creativity",
    "Analytical Skills", "Attention to Detail", "Organization", "Decision Making",
    "Interpersonal Skills", "Presentation Skills", "Negotiation", "Mentoring",
];

/// Category of a recognized skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    /// Tools, languages, and technologies
    Technical,
    /// Interpersonal and organizational skills
    Soft,
}

/// A skill found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedSkill {
    /// Canonical skill name from the taxonomy
    pub name: String,
    /// Which taxonomy the skill belongs to
    pub category: SkillCategory,
}

struct SkillMatcher {
    name: &'static str,
    category: SkillCategory,
    pattern: regex::Regex,
}

static MATCHERS: Lazy<Vec<SkillMatcher>> = Lazy::new(|| {
    let entry = |name: &'static str, category: SkillCategory| {
        // Word-bound the escaped skill name. Skills ending in a symbol
        // ("C++", "Vue.js") get no trailing boundary since \b after a
        // non-word character never matches.
        let escaped = regex::escape(name);
        let trailing = if name
            .chars()
            .last()
            .map(|c| c.is_alphanumeric())
            .unwrap_or(false)
        {
            r"\b"
        } else {
            ""
        };
        let pattern = RegexBuilder::new(&format!(r"\b{escaped}{trailing}"))
            .case_insensitive(true)
            .build()
            .expect("skill pattern is valid");
        SkillMatcher {
            name,
            category,
            pattern,
        }
    };

    TECHNICAL_SKILLS
        .iter()
        .map(|name| entry(name, SkillCategory::Technical))
        .chain(SOFT_SKILLS.iter().map(|name| entry(name, SkillCategory::Soft)))
        .collect()
});

/// Extract all recognized skills from a piece of text.
///
/// Returns skills in taxonomy order, each at most once.
pub fn extract_skills(text: &str) -> Vec<MatchedSkill> {
    MATCHERS
        .iter()
        .filter(|m| m.pattern.is_match(text))
        .map(|m| MatchedSkill {
            name: m.name.to_string(),
            category: m.category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_technical_skills() {
        let text = "Experienced with Rust, Python, PostgreSQL and Docker deployments.";
        let skills = extract_skills(text);
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Python"));
        assert!(names.contains(&"PostgreSQL"));
        assert!(names.contains(&"Docker"));
    }

    #[test]
    fn test_extraction_is_case_insensitive() {
        let skills = extract_skills("worked with KUBERNETES and graphql");
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Kubernetes"));
        assert!(names.contains(&"GraphQL"));
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        let skills = extract_skills("Five years of JavaScript.");
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"JavaScript"));
        assert!(!names.contains(&"Java"));
    }

    #[test]
    fn test_symbol_terminated_skills() {
        let skills = extract_skills("Low-level work in C++ and UIs in Vue.js.");
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"C++"));
        assert!(names.contains(&"Vue.js"));
    }

    #[test]
    fn test_soft_skills_categorized() {
        let skills = extract_skills("Known for leadership and communication.");
        assert!(skills
            .iter()
            .any(|s| s.name == "Leadership" && s.category == SkillCategory::Soft));
    }

    #[test]
    fn test_no_duplicates() {
        let skills = extract_skills("Python, python, PYTHON");
        let count = skills.iter().filter(|s| s.name == "Python").count();
        assert_eq!(count, 1);
    }
}
