use std::{borrow::Cow, fmt};

/// A decoded `(channel, event)` pair on its way to a [`TraceSink`].
///
/// Produced and consumed within one dispatch; nothing stores it. Labels
/// from decoders are `'static`; the fallback path borrows the channel's
/// own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecord<'a> {
    channel: Cow<'a, str>,
    event: Cow<'a, str>,
}

impl<'a> TraceRecord<'a> {
    pub fn new(channel: impl Into<Cow<'a, str>>, event: impl Into<Cow<'a, str>>) -> Self {
        Self {
            channel: channel.into(),
            event: event.into(),
        }
    }

    /// Detach the record from any borrowed channel name.
    pub fn into_owned(self) -> TraceRecord<'static> {
        TraceRecord {
            channel: Cow::Owned(self.channel.into_owned()),
            event: Cow::Owned(self.event.into_owned()),
        }
    }

    /// Channel label, e.g. `"CLOUD_CHAN"`.
    #[inline]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Event label, e.g. `"CONNECTED"`.
    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl fmt::Display for TraceRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.channel, self.event)
    }
}

/// Destination for trace records.
///
/// Called once per notification by the
/// [`TraceDispatcher`](crate::TraceDispatcher), synchronously and from
/// whatever thread published. The output format belongs to the sink.
pub trait TraceSink: Send + Sync {
    fn emit(&self, record: &TraceRecord<'_>);
}

impl<S: TraceSink + ?Sized> TraceSink for std::sync::Arc<S> {
    fn emit(&self, record: &TraceRecord<'_>) {
        (**self).emit(record)
    }
}
