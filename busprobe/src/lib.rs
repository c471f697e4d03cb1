#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Busprobe
//!
//! Tracing and observation for a typed publish/subscribe bus.
//!
//! Busprobe attaches to the channels of a [`Bus`] and turns every published
//! message into a short `(channel, event)` [`TraceRecord`] that a
//! [`TraceSink`] writes out. Alongside the tracer, a [`DetectionTracker`]
//! follows the lifecycle of a detection service from the messages on its
//! channel, and a [`DetectionCommander`] sends that service start and stop
//! commands.
//!
//! ## Quick Start
//!
//! ```rust
//! use busprobe::*;
//! use busprobe::catalog::{ButtonMsg, ButtonPress, DetectionKind, DetectionMsg};
//!
//! fn main() -> Result {
//!     let bus = Bus::default();
//!     let channels = Channels::new(&bus);
//!     let sink = RecordingSink::new();
//!
//!     TraceDispatcher::with_default_decoders(&channels, sink.clone())
//!         .observe(&channels.detection)
//!         .build()?
//!         .attach(&bus)?;
//!
//!     let tracker = DetectionTracker::default();
//!     tracker.attach(&bus, &channels.detection)?;
//!
//!     let press = ButtonMsg::new(1, ButtonPress::Short);
//!     bus.publish(&channels.button, press.into(), WaitPolicy::NoWait)?;
//!
//!     let started = DetectionMsg::new(DetectionKind::Started, 0);
//!     bus.publish(&channels.detection, started.into(), WaitPolicy::NoWait)?;
//!
//!     assert!(tracker.stats().is_running());
//!     assert_eq!(sink.records()[0].to_string(), "BUTTON_CHANNEL, SHORT_PRESS");
//!     assert_eq!(sink.records()[1].to_string(), "DETECTION_CHAN, unhandled");
//!     Ok(())
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bus`] | Synchronous pub/sub bus with per-channel listeners |
//! | [`ChannelId`] | Identity handle of one channel |
//! | [`Message`] | Sum of every channel's message type (see [`catalog`]) |
//! | [`TraceDispatcher`] | Maps channels to [`decoders`] and feeds a sink |
//! | [`TraceSink`] | Destination for trace records ([`sinks`]) |
//! | [`DetectionTracker`] | Running flag and result counter of the detection service |
//! | [`DetectionCommander`] | Publishes detection start/stop commands |
//! | [`DetectionShell`] | `detection_handler start` and `stop` command lines |
//! | [`Config`] | Bus-wide settings |
//!
//! ## Feature Flags
//!
//! - `trace-button`, `trace-cloud`, `trace-environmental`, `trace-fota`,
//!   `trace-led`, `trace-location`, `trace-network`, `trace-power` (default):
//!   compile in the decoder for that channel. A channel without its decoder
//!   gets no trace listener from [`TraceDispatcher::with_default_decoders`].
//! - `serde`: `Serialize`/`Deserialize` for messages, records and [`Config`].

mod bus;
mod channel;
mod clock;
mod config;
mod dispatch;
mod error;
mod label;
mod trace;

pub mod catalog;
pub mod decoders;
pub mod detection;
pub mod shell;
pub mod sinks;

pub use bus::{Bus, Listener, Notification, Publish, WaitPolicy};
pub use catalog::{Message, MessageKind};
pub use channel::{ChannelId, Channels};
pub use clock::{Clock, FixedClock, MonotonicClock};
pub use config::Config;
pub use detection::{DetectionCommander, DetectionStats, DetectionTracker};
pub use dispatch::{TraceDispatcher, TraceDispatcherBuilder};
pub use error::Error;
pub use label::Label;
pub use shell::DetectionShell;
pub use sinks::{RecordingSink, TracingSink};
pub use trace::{TraceRecord, TraceSink};

/// Convenience alias for `Result<T, busprobe::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
