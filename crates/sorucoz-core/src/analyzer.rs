//! The question analysis seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::subject::Subject;

/// A worked solution produced by the solving completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Step-by-step solution text.
    pub steps: String,
    /// Short final answer (e.g. a choice letter), when one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Solution {
    /// Create a solution with steps only.
    pub fn new(steps: impl Into<String>) -> Self {
        Self {
            steps: steps.into(),
            answer: None,
        }
    }

    /// Create a solution with steps and a final answer.
    pub fn with_answer(steps: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            steps: steps.into(),
            answer: Some(answer.into()),
        }
    }
}

/// A trait for analyzing photographed questions.
///
/// Implementations can range from fixed test doubles to vision-capable AI
/// backends. This trait is object-safe and can be used with
/// `Box<dyn QuestionAnalyzer>`.
#[async_trait]
pub trait QuestionAnalyzer: Send + Sync {
    /// Name the school subject of the question in the image.
    ///
    /// Failures here are the caller's to absorb: the submission flow
    /// substitutes [`Subject::Bilinmeyen`] instead of failing the upload.
    async fn detect_subject(&self, image_url: &str) -> Result<Subject, AnalyzerError>;

    /// Produce a worked solution for the question in the image.
    async fn solve(&self, image_url: &str, subject: Subject) -> Result<Solution, AnalyzerError>;

    /// Get a human-readable name for this analyzer implementation.
    fn name(&self) -> &str;

    /// Check if the analyzer is ready to take requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
