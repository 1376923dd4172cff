//! LLM-backed CV analysis and job summarization.
//!
//! The analysis engine coordinates prompting, model calls, lenient reply
//! parsing, score clamping, weighted aggregation, and taxonomy-based skill
//! extraction.

mod engine;
mod parser;
mod prompt;

pub use engine::{AnalysisConfig, AnalysisEngine, JobSummarizer};
pub use parser::{extract_json_object, parse_analysis, parse_summary};
pub use prompt::{build_analysis_prompt, build_summary_prompt};

use crate::ApplicationError;
use async_trait::async_trait;

/// Port to the language model.
///
/// Implementations send a single-turn chat prompt and return the assistant
/// reply text. The infrastructure crate provides the Ollama-backed
/// implementation; tests use a scripted mock.
#[async_trait]
pub trait LlmPort: Send + Sync {
    /// Send a prompt, returning the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String, ApplicationError>;
}
