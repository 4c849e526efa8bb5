//! Always-failing analyzer implementation.

use async_trait::async_trait;
use sorucoz_core::{AnalyzerError, QuestionAnalyzer, Solution, Subject};

/// An analyzer that fails every call with a network error.
///
/// Exercises the degradation paths: the submission flow must substitute
/// `Bilinmeyen` for a failed detection and keep the question.
#[derive(Debug, Clone)]
pub struct FailingAnalyzer {
    message: String,
}

impl FailingAnalyzer {
    /// Create a failing analyzer with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingAnalyzer {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

#[async_trait]
impl QuestionAnalyzer for FailingAnalyzer {
    async fn detect_subject(&self, _image_url: &str) -> Result<Subject, AnalyzerError> {
        Err(AnalyzerError::Network(self.message.clone()))
    }

    async fn solve(&self, _image_url: &str, _subject: Subject) -> Result<Solution, AnalyzerError> {
        Err(AnalyzerError::Network(self.message.clone()))
    }

    fn name(&self) -> &str {
        "FailingAnalyzer"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
