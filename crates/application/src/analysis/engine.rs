//! Analysis engine - CV scoring and job summarization.

use super::{build_analysis_prompt, build_summary_prompt, parse_analysis, parse_summary, LlmPort};
use crate::{ApplicationError, ApplicationResult};
use cv_screen_domain::analysis::{CvAnalysis, ScoreWeights};
use cv_screen_domain::job::JobSummary;
use cv_screen_domain::skills::extract_skills;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Analysis engine configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum characters of CV and job description sent to the model
    pub max_text_length: usize,
    /// Weights applied when aggregating the score breakdown
    pub weights: ScoreWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_text_length: 4000,
            weights: ScoreWeights::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.max_text_length == 0 {
            return Err(ApplicationError::InvalidInput(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        self.weights
            .validate()
            .map_err(ApplicationError::InvalidInput)
    }
}

/// Scores CVs against job descriptions through the model port.
///
/// Transport failures surface as errors so callers can retry; unparseable
/// replies degrade to a zero-score fallback analysis, since re-asking the
/// same model the same question rarely changes the shape of its answer.
pub struct AnalysisEngine {
    llm: Arc<dyn LlmPort>,
    config: AnalysisConfig,
}

impl AnalysisEngine {
    /// Create an engine over a model port.
    pub fn new(llm: Arc<dyn LlmPort>, config: AnalysisConfig) -> Self {
        Self { llm, config }
    }

    /// Analyze a CV against a job description.
    #[instrument(skip(self, cv_text, job_description), fields(cv_chars = cv_text.len()))]
    pub async fn analyze(
        &self,
        cv_text: &str,
        job_description: &str,
    ) -> ApplicationResult<CvAnalysis> {
        let prompt = build_analysis_prompt(job_description, cv_text, self.config.max_text_length);
        let reply = self.llm.complete(&prompt).await?;

        let mut analysis = match parse_analysis(&reply) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, "Model reply was not parseable, storing fallback analysis");
                return Ok(CvAnalysis::fallback("Unable to analyze CV properly"));
            }
        };

        // A populated breakdown is authoritative; the aggregate is recomputed
        // from it so the configured weights always hold.
        if analysis.breakdown != Default::default() {
            analysis.match_score = analysis.breakdown.weighted_total(&self.config.weights);
        }

        self.supplement_skills(&mut analysis, cv_text);

        debug!(match_score = analysis.match_score, "CV analyzed");
        Ok(analysis)
    }

    /// Merge taxonomy skills found in the CV into the model's key skills.
    fn supplement_skills(&self, analysis: &mut CvAnalysis, cv_text: &str) {
        for skill in extract_skills(cv_text) {
            if !analysis
                .key_skills
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(&skill.name))
            {
                analysis.key_skills.push(skill.name);
            }
        }
    }
}

/// Produces structured summaries of job descriptions.
pub struct JobSummarizer {
    llm: Arc<dyn LlmPort>,
    max_text_length: usize,
}

impl JobSummarizer {
    /// Create a summarizer over a model port.
    pub fn new(llm: Arc<dyn LlmPort>, max_text_length: usize) -> Self {
        Self {
            llm,
            max_text_length,
        }
    }

    /// Summarize a job description.
    ///
    /// An unparseable reply is preserved verbatim as the prose summary.
    #[instrument(skip(self, job_description))]
    pub async fn summarize(&self, job_description: &str) -> ApplicationResult<JobSummary> {
        let prompt = build_summary_prompt(job_description, self.max_text_length);
        let reply = self.llm.complete(&prompt).await?;

        match parse_summary(&reply) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                warn!(error = %e, "Summary reply was not parseable, keeping raw text");
                Ok(JobSummary::from_raw_text(reply.trim()))
            }
        }
    }
}
