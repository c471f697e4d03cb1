//! Ready-to-use [`TraceSink`](crate::TraceSink) implementations.
//!
//! - [`TracingSink`] - writes each record through the `tracing` crate
//! - [`RecordingSink`] - keeps records in memory for inspection
//!
//! # Example
//!
//! ```ignore
//! use busprobe::sinks::TracingSink;
//!
//! let dispatcher = TraceDispatcher::with_default_decoders(&channels, TracingSink::new("zbus"));
//! ```

mod recording;
pub use recording::RecordingSink;

mod tracing_sink;
pub use tracing_sink::TracingSink;
