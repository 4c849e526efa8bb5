//! Gemini-based question analyzer for SoruÇöz.
//!
//! This crate implements [`sorucoz_core::QuestionAnalyzer`] on top of the
//! Gemini `generateContent` HTTP API. It sends the question photo as a
//! `file_data` part together with an instruction prompt, then runs the
//! reply through the core salvage parsers:
//!
//! - [`GeminiAnalyzer`] - the analyzer implementation
//! - [`GeminiConfig`] - configuration, from env vars or a builder
//!
//! # Example
//!
//! ```no_run
//! use gemini_analyzer::GeminiAnalyzer;
//! use sorucoz_core::QuestionAnalyzer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = GeminiAnalyzer::from_env()?;
//! let subject = analyzer.detect_subject("https://img.example/q.jpg").await?;
//! println!("detected: {}", subject);
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod api_types;
mod config;

pub use analyzer::GeminiAnalyzer;
pub use config::{GeminiConfig, GeminiConfigBuilder, DEFAULT_DETECT_PROMPT, DEFAULT_SOLVE_PROMPT};

// Re-export the seam types callers need alongside the analyzer.
pub use sorucoz_core::{AnalyzerError, QuestionAnalyzer, Solution, Subject};
