//! Core types and traits for the SoruÇöz question platform.
//!
//! This crate provides the shared vocabulary for the platform's Rust
//! services. It defines:
//!
//! - [`Subject`] - the closed set of canonical school subjects
//! - [`classify`] / [`subject_from_reply`] - normalization of free-text
//!   subject guesses onto that set
//! - [`PushPayload`] - the push message tagged union with its identity,
//!   grouping-tag and click-route derivations
//! - [`QuestionAnalyzer`] / [`Notifier`] - the seams that analysis and
//!   rendering backends implement
//! - [`AnalyzerError`] / [`NotifierError`] - error types for those seams
//!
//! # Example
//!
//! ```rust
//! use sorucoz_core::{classify, Subject};
//!
//! assert_eq!(classify("Bu soruda momentum ve ivme hesaplanıyor"), Subject::Fizik);
//! assert_eq!(classify("asdkjasjd"), Subject::Bilinmeyen);
//! ```

mod analyzer;
mod classify;
mod error;
mod notifier;
mod payload;
mod prompt;
mod reply;
mod subject;

pub use analyzer::{QuestionAnalyzer, Solution};
pub use classify::classify;
pub use error::{AnalyzerError, NotifierError};
pub use notifier::Notifier;
pub use payload::{NotificationDisplay, PushPayload};
pub use prompt::prompt_fingerprint;
pub use reply::{extract_json, solution_from_reply, subject_from_reply};
pub use subject::Subject;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
