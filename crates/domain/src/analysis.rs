//! CV analysis result types, score breakdowns, and aggregation weights.

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Clamp a score into the valid `[0, 1]` range.
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Result of analyzing a CV against a job description.
///
/// This mirrors the JSON object the analysis prompt asks the model to
/// produce. All scores are clamped to `[0, 1]` at the parsing boundary;
/// downstream layers rely on that invariant and do not re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    /// Overall match score in [0, 1]
    pub match_score: f64,
    /// Per-dimension score breakdown
    #[serde(default)]
    pub breakdown: ScoreBreakdown,
    /// Key strengths found in the CV
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Areas where the CV falls short of the requirements
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Relevant skills found in the CV
    #[serde(default)]
    pub key_skills: Vec<String>,
    /// Overall recommendation text
    #[serde(default)]
    pub recommendation: String,
}

impl CvAnalysis {
    /// Fallback analysis stored when the model reply cannot be parsed.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            match_score: 0.0,
            breakdown: ScoreBreakdown::default(),
            strengths: Vec::new(),
            weaknesses: vec!["Error analyzing CV".to_string()],
            key_skills: Vec::new(),
            recommendation: reason.into(),
        }
    }

    /// Clamp every score field into `[0, 1]` in place.
    pub fn clamp_scores(&mut self) {
        self.match_score = clamp_score(self.match_score);
        self.breakdown.clamp_scores();
    }
}

/// Per-dimension score breakdown, each value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Match against the essential skills in the job description
    #[serde(default)]
    pub essential_skills: f64,
    /// Relevance of the candidate's experience
    #[serde(default)]
    pub experience: f64,
    /// Fit of the candidate's education
    #[serde(default)]
    pub education: f64,
    /// Additional qualifications (certifications, publications, ...)
    #[serde(default)]
    pub additional: f64,
}

impl ScoreBreakdown {
    /// Breakdown with the same score in every dimension. Test helper.
    pub fn uniform(score: f64) -> Self {
        Self {
            essential_skills: score,
            experience: score,
            education: score,
            additional: score,
        }
    }

    /// Clamp every dimension into `[0, 1]` in place.
    pub fn clamp_scores(&mut self) {
        self.essential_skills = clamp_score(self.essential_skills);
        self.experience = clamp_score(self.experience);
        self.education = clamp_score(self.education);
        self.additional = clamp_score(self.additional);
    }

    /// Weighted aggregate of the breakdown.
    pub fn weighted_total(&self, weights: &ScoreWeights) -> f64 {
        clamp_score(
            self.essential_skills * weights.essential_skills
                + self.experience * weights.experience
                + self.education * weights.education
                + self.additional * weights.additional,
        )
    }
}

/// Weights applied when aggregating a score breakdown.
///
/// The defaults weight essential skills at 40%, experience at 30%, and
/// education and additional qualifications at 15% each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the essential skills dimension
    pub essential_skills: f64,
    /// Weight of the experience dimension
    pub experience: f64,
    /// Weight of the education dimension
    pub education: f64,
    /// Weight of the additional qualifications dimension
    pub additional: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            essential_skills: 0.40,
            experience: 0.30,
            education: 0.15,
            additional: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Validate that all weights are non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            self.essential_skills,
            self.experience,
            self.education,
            self.additional,
        ];
        if values.iter().any(|w| *w < 0.0) {
            return Err("Score weights must be non-negative".to_string());
        }
        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("Score weights must sum to 1.0, got {sum}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-0.5), 0.0);
        assert_eq!(clamp_score(0.42), 0.42);
        assert_eq!(clamp_score(1.7), 1.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_default_weights_are_valid() {
        assert!(ScoreWeights::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_weights() {
        let mut weights = ScoreWeights::default();
        weights.experience = 0.5;
        assert!(weights.validate().is_err());

        weights = ScoreWeights {
            essential_skills: -0.1,
            experience: 0.6,
            education: 0.3,
            additional: 0.2,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_weighted_total() {
        let breakdown = ScoreBreakdown {
            essential_skills: 1.0,
            experience: 0.5,
            education: 0.0,
            additional: 1.0,
        };
        let total = breakdown.weighted_total(&ScoreWeights::default());
        // 1.0*0.40 + 0.5*0.30 + 0.0*0.15 + 1.0*0.15
        assert!((total - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_analysis_clamping() {
        let mut analysis = CvAnalysis {
            match_score: 1.4,
            breakdown: ScoreBreakdown::uniform(-0.2),
            strengths: vec![],
            weaknesses: vec![],
            key_skills: vec![],
            recommendation: String::new(),
        };
        analysis.clamp_scores();
        assert_eq!(analysis.match_score, 1.0);
        assert_eq!(analysis.breakdown.essential_skills, 0.0);
    }

    #[test]
    fn test_fallback_analysis() {
        let analysis = CvAnalysis::fallback("Unable to analyze CV properly");
        assert_eq!(analysis.match_score, 0.0);
        assert_eq!(analysis.weaknesses, vec!["Error analyzing CV".to_string()]);
        assert_eq!(analysis.recommendation, "Unable to analyze CV properly");
    }

    proptest::proptest! {
        #[test]
        fn prop_clamp_score_is_bounded(score in proptest::num::f64::ANY) {
            let clamped = clamp_score(score);
            proptest::prop_assert!((0.0..=1.0).contains(&clamped));
        }

        #[test]
        fn prop_weighted_total_is_bounded(
            essential in 0.0f64..=1.0,
            experience in 0.0f64..=1.0,
            education in 0.0f64..=1.0,
            additional in 0.0f64..=1.0,
        ) {
            let breakdown = ScoreBreakdown {
                essential_skills: essential,
                experience,
                education,
                additional,
            };
            let total = breakdown.weighted_total(&ScoreWeights::default());
            proptest::prop_assert!((0.0..=1.0).contains(&total));
        }
    }

    #[test]
    fn test_analysis_deserializes_partial_json() {
        let analysis: CvAnalysis =
            serde_json::from_str(r#"{"match_score": 0.9}"#).unwrap();
        assert_eq!(analysis.match_score, 0.9);
        assert!(analysis.strengths.is_empty());
        assert_eq!(analysis.breakdown, ScoreBreakdown::default());
    }
}
