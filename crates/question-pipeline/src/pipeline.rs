//! The submission pipeline.

use chrono::Utc;
use serde::Serialize;
use sorucoz_core::{QuestionAnalyzer, Subject};
use sorucoz_database::{question, Database, Question};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PipelineError;

/// Configuration for the submission pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Solve questions immediately on submission. When off, solving happens
    /// on demand via [`QuestionPipeline::solve_later`].
    pub auto_solve: bool,
}

/// A user's questions for one canonical subject.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectGroup {
    /// The grouping subject.
    pub subject: Subject,
    /// Questions under it, newest first.
    pub questions: Vec<Question>,
}

/// The flow behind submitting a photographed question.
///
/// Generic over the analyzer so tests can run against mocks.
pub struct QuestionPipeline<A: QuestionAnalyzer> {
    analyzer: A,
    db: Database,
    config: PipelineConfig,
}

impl<A: QuestionAnalyzer> QuestionPipeline<A> {
    /// Create a new pipeline.
    pub fn new(analyzer: A, db: Database, config: PipelineConfig) -> Self {
        Self {
            analyzer,
            db,
            config,
        }
    }

    /// Create a pipeline with default configuration.
    pub fn with_defaults(analyzer: A, db: Database) -> Self {
        Self::new(analyzer, db, PipelineConfig::default())
    }

    /// Get a reference to the analyzer.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Get the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Submit a photographed question: detect its subject, optionally solve
    /// it, and persist the result.
    ///
    /// Detection trouble must not fail the upload: an analyzer error stores
    /// the question under `Bilinmeyen`. A solve failure stores it unsolved.
    pub async fn submit(&self, user_id: &str, image_url: &str) -> Result<Question, PipelineError> {
        info!("Submitting question for {}: {}", user_id, image_url);

        let subject = match self.analyzer.detect_subject(image_url).await {
            Ok(subject) => subject,
            Err(e) => {
                warn!(
                    "Subject detection failed for {}, storing as {}: {}",
                    image_url,
                    Subject::Bilinmeyen,
                    e
                );
                Subject::Bilinmeyen
            }
        };

        let mut solution = None;
        if self.config.auto_solve && !subject.is_unknown() {
            match self.analyzer.solve(image_url, subject).await {
                Ok(solved) => solution = Some(solved),
                Err(e) => warn!("Solve failed for {}, storing unsolved: {}", image_url, e),
            }
        }

        let question = Question {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            image_url: image_url.to_string(),
            subject: subject.label().to_string(),
            solution_steps: solution.as_ref().map(|s| s.steps.clone()),
            solution_answer: solution.and_then(|s| s.answer),
            created_at: Utc::now().to_rfc3339(),
        };

        question::create_question(self.db.pool(), &question).await?;
        info!("Stored question {} as {}", question.id, question.subject);

        Ok(question)
    }

    /// Solve an already stored question and persist the result.
    ///
    /// Unlike submission, an analyzer failure here surfaces to the caller:
    /// the user explicitly asked for a solution.
    pub async fn solve_later(&self, question_id: &str) -> Result<Question, PipelineError> {
        let question = question::get_question(self.db.pool(), question_id).await?;
        let subject = Subject::from_label(&question.subject).unwrap_or(Subject::Bilinmeyen);

        let solution = self.analyzer.solve(&question.image_url, subject).await?;
        question::set_solution(
            self.db.pool(),
            question_id,
            &solution.steps,
            solution.answer.as_deref(),
        )
        .await?;

        info!("Solved question {}", question_id);
        Ok(question::get_question(self.db.pool(), question_id).await?)
    }

    /// A user's questions bucketed by canonical subject.
    ///
    /// Groups appear in classifier table order, `Bilinmeyen` last; empty
    /// groups are omitted. Within a group, questions are newest first.
    pub async fn grouped_for_user(&self, user_id: &str) -> Result<Vec<SubjectGroup>, PipelineError> {
        let questions = question::list_for_user(self.db.pool(), user_id).await?;

        let mut groups: Vec<SubjectGroup> = Subject::ALL
            .into_iter()
            .chain(std::iter::once(Subject::Bilinmeyen))
            .map(|subject| SubjectGroup {
                subject,
                questions: Vec::new(),
            })
            .collect();

        for question in questions {
            let subject = Subject::from_label(&question.subject).unwrap_or(Subject::Bilinmeyen);
            if let Some(group) = groups.iter_mut().find(|g| g.subject == subject) {
                group.questions.push(question);
            }
        }

        groups.retain(|g| !g.questions.is_empty());
        Ok(groups)
    }
}
