//! Fixed-answer analyzer implementation.

use std::time::Duration;

use async_trait::async_trait;
use sorucoz_core::{AnalyzerError, QuestionAnalyzer, Solution, Subject};

/// An analyzer that answers every request with a fixed subject and solution.
///
/// Useful for testing submission flows without any AI processing. An
/// optional delay simulates a slow backend.
#[derive(Debug, Clone)]
pub struct FixedAnalyzer {
    subject: Subject,
    solution: Solution,
    delay: Option<Duration>,
}

impl FixedAnalyzer {
    /// Create an analyzer that always detects the given subject.
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            solution: Solution::new("Adım adım çözüm."),
            delay: None,
        }
    }

    /// Create an analyzer with a fixed subject and solution.
    pub fn with_solution(subject: Subject, solution: Solution) -> Self {
        Self {
            subject,
            solution,
            delay: None,
        }
    }

    /// Add an artificial delay before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn maybe_sleep(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl QuestionAnalyzer for FixedAnalyzer {
    async fn detect_subject(&self, _image_url: &str) -> Result<Subject, AnalyzerError> {
        self.maybe_sleep().await;
        Ok(self.subject)
    }

    async fn solve(&self, _image_url: &str, _subject: Subject) -> Result<Solution, AnalyzerError> {
        self.maybe_sleep().await;
        Ok(self.solution.clone())
    }

    fn name(&self) -> &str {
        "FixedAnalyzer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_subject() {
        let analyzer = FixedAnalyzer::new(Subject::Fizik);
        let subject = analyzer.detect_subject("https://img.example/q.jpg").await.unwrap();
        assert_eq!(subject, Subject::Fizik);
    }

    #[tokio::test]
    async fn test_fixed_solution() {
        let analyzer =
            FixedAnalyzer::with_solution(Subject::Kimya, Solution::with_answer("Mol hesabı.", "C"));
        let solution = analyzer
            .solve("https://img.example/q.jpg", Subject::Kimya)
            .await
            .unwrap();
        assert_eq!(solution.answer.as_deref(), Some("C"));
    }

    #[tokio::test]
    async fn test_analyzer_name() {
        let analyzer = FixedAnalyzer::new(Subject::Matematik);
        assert_eq!(analyzer.name(), "FixedAnalyzer");
        assert!(analyzer.is_ready().await);
    }
}
