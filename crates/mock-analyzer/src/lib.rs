//! Mock implementations for testing SoruÇöz message and notification flows.
//!
//! This crate provides test doubles for the two seams in
//! [`sorucoz_core`]:
//!
//! - [`FixedAnalyzer`] - answers every detection with a fixed subject
//! - [`FailingAnalyzer`] - fails every call, for degradation paths
//! - [`RecordingNotifier`] - records shown/closed notifications in memory
//!
//! None of them touch the network or the OS notification surface.

mod failing;
mod fixed;
mod notifier;

pub use failing::FailingAnalyzer;
pub use fixed::FixedAnalyzer;
pub use notifier::{RecordingNotifier, ShownNotification};
