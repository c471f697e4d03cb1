use std::borrow::Cow;

/// Condensed trace label for a message variant.
///
/// Every catalog message implements this, and the decoders in
/// [`crate::decoders`] pair the label with a channel label to build a
/// [`TraceRecord`](crate::TraceRecord). Labels are the short upper-case
/// tokens used in trace output (`"SHORT_PRESS"`, `"SIM_FAILURE"`), not
/// full renderings of the payload.
///
/// # Example
///
/// ```rust
/// use busprobe::{Label, catalog::CloudMsg};
///
/// assert_eq!(CloudMsg::Connected.label(), "CONNECTED");
/// assert_eq!(CloudMsg::Unrecognized(99).label(), "UNKNOWN");
/// ```
pub trait Label {
    /// Returns the trace label for this item.
    fn label(&self) -> Cow<'static, str>;
}
