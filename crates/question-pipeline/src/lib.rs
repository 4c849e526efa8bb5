//! Question submission pipeline for SoruÇöz.
//!
//! The flow behind "photograph a question": ask the analyzer which subject
//! the image belongs to, optionally have it solved, persist the result, and
//! serve it back grouped by canonical subject.
//!
//! Detection trouble never fails a submission: when the analyzer errors,
//! the question is stored under `Bilinmeyen` and the upload succeeds.
//!
//! # Example
//!
//! ```no_run
//! use mock_analyzer::FixedAnalyzer;
//! use question_pipeline::QuestionPipeline;
//! use sorucoz_core::Subject;
//! use sorucoz_database::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:sorucoz.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let pipeline = QuestionPipeline::with_defaults(FixedAnalyzer::new(Subject::Fizik), db);
//! let question = pipeline.submit("u-1", "https://img.example/q.jpg").await?;
//! println!("stored as {}", question.subject);
//! # Ok(())
//! # }
//! ```

mod error;
mod pipeline;

pub use error::PipelineError;
pub use pipeline::{PipelineConfig, QuestionPipeline, SubjectGroup};
