//! Push-notification deduplication worker for SoruÇöz.
//!
//! The push delivery layer re-invokes handlers for messages it has already
//! delivered, and several contexts on one device can race on the same
//! logical message. This crate decides, exactly once per notification
//! identity and TTL window, whether a payload becomes a visible system
//! notification:
//!
//! - [`NotificationDispatcher`] - the layered dedup state machine
//! - [`DispatcherConfig`] - lock window and record TTL tuning
//! - [`DispatchOutcome`] / [`SuppressStage`] - what happened to a payload
//!
//! Checks run in increasing order of cost: an entry lock at the dispatch
//! entrypoint, an in-flight set, an in-memory shown cache, and finally the
//! durable store shared by every context on the device. The durable layer
//! is the authoritative gate; the in-memory layers close most of the race
//! window before the async store call is awaited.

mod config;
mod dispatcher;

pub use config::DispatcherConfig;
pub use dispatcher::{DispatchError, DispatchOutcome, NotificationDispatcher, SuppressStage};
