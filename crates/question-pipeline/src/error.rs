//! Pipeline error types.

use thiserror::Error;

/// Errors that can occur in the submission pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error from the persistence layer.
    #[error("database error: {0}")]
    Database(#[from] sorucoz_database::DatabaseError),

    /// Error from the analyzer, where the pipeline does not degrade
    /// (explicit solve requests).
    #[error("analyzer error: {0}")]
    Analyzer(#[from] sorucoz_core::AnalyzerError),
}
