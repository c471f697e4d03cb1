//! Lifecycle tracking and control of the detection service.
//!
//! The service publishes `Started`, `Stopped` and `Result` events on the
//! detection channel. [`DetectionTracker`] listens there and keeps a running
//! flag and a result counter. [`DetectionCommander`] publishes `Start` and
//! `Stop` commands onto the same channel; the tracker sees those echoes and
//! ignores them.

mod classes;
mod commander;
mod tracker;

pub use classes::{ClassNames, ClassTable, UNKNOWN_CLASS};
pub use commander::DetectionCommander;
pub use tracker::{DetectionStats, DetectionTracker, Report};
