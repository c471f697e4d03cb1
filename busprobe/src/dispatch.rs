use std::{fmt, sync::Arc};

use crate::{
    Bus, ChannelId, Channels, Error, Listener, Message, Notification, Result, TraceRecord,
    TraceSink, decoders::Decoder,
};

/// Channel label used when an unregistered channel has no name.
pub const UNKNOWN_CHANNEL: &str = "unknown";

/// Event label for messages on channels without a decoder.
pub const UNHANDLED: &str = "unhandled";

struct DecoderEntry {
    channel: ChannelId,
    decoder: Decoder,
}

/// Routes every notification it receives to the decoder registered for the
/// publishing channel and writes the result to a [`TraceSink`].
///
/// The decoder table is fixed at [`build`](TraceDispatcherBuilder::build)
/// time. Lookup is by channel identity: a channel that merely shares a name
/// with a registered one is not registered. Notifications from channels with
/// no decoder (reachable through [`observe`](TraceDispatcherBuilder::observe))
/// are traced as `(<channel name or "unknown">, "unhandled")`.
///
/// Every notification produces exactly one sink write.
///
/// # Example
///
/// ```rust
/// use busprobe::{Bus, Channels, Publish, RecordingSink, TraceDispatcher, WaitPolicy};
/// use busprobe::catalog::CloudMsg;
///
/// # fn main() -> busprobe::Result {
/// let bus = Bus::default();
/// let channels = Channels::new(&bus);
/// let sink = RecordingSink::new();
///
/// TraceDispatcher::with_default_decoders(&channels, sink.clone())
///     .build()?
///     .attach(&bus)?;
///
/// bus.publish(&channels.cloud, CloudMsg::Connected.into(), WaitPolicy::NoWait)?;
/// assert_eq!(sink.last().unwrap().to_string(), "CLOUD_CHAN, CONNECTED");
/// # Ok(())
/// # }
/// ```
pub struct TraceDispatcher {
    entries: Vec<DecoderEntry>,
    observed: Vec<ChannelId>,
    sink: Box<dyn TraceSink>,
}

impl TraceDispatcher {
    pub fn builder(sink: impl TraceSink + 'static) -> TraceDispatcherBuilder {
        TraceDispatcherBuilder {
            entries: Vec::new(),
            observed: Vec::new(),
            sink: Box::new(sink),
        }
    }

    /// Builder pre-loaded with every decoder enabled by Cargo features.
    pub fn with_default_decoders(
        channels: &Channels,
        sink: impl TraceSink + 'static,
    ) -> TraceDispatcherBuilder {
        Self::builder(sink).default_decoders(channels)
    }

    /// Decode `message` as if it had been published on `channel`.
    pub fn dispatch<'a>(&self, channel: &'a ChannelId, message: &Message) -> TraceRecord<'a> {
        match self.entries.iter().find(|e| e.channel == *channel) {
            Some(entry) => entry.decoder.decode(message),
            None => TraceRecord::new(channel.name().unwrap_or(UNKNOWN_CHANNEL), UNHANDLED),
        }
    }

    /// Whether `channel` has a decoder.
    pub fn is_registered(&self, channel: &ChannelId) -> bool {
        self.entries.iter().any(|e| e.channel == *channel)
    }

    /// Every channel the dispatcher listens on once attached.
    pub fn channels(&self) -> impl Iterator<Item = &ChannelId> {
        self.entries.iter().map(|e| &e.channel).chain(&self.observed)
    }

    /// Attach the dispatcher as a listener on each of its channels.
    ///
    /// On failure, listeners already attached by this call are removed again.
    ///
    /// # Errors
    ///
    /// Whatever [`Bus::add_listener`] reports for the first channel that
    /// refuses the listener.
    pub fn attach(self, bus: &Bus) -> Result<Arc<Self>> {
        let this = Arc::new(self);
        let listener: Arc<dyn Listener> = this.clone();

        let mut attached = Vec::new();
        for channel in this.channels() {
            if let Err(e) = bus.add_listener(channel, listener.clone()) {
                for done in attached {
                    bus.remove_listener(done, &listener);
                }
                return Err(e);
            }
            attached.push(channel);
        }

        tracing::info!(channels = attached.len(), "trace dispatcher attached");
        Ok(this)
    }

    /// Remove the dispatcher from all of its channels.
    pub fn detach(self: &Arc<Self>, bus: &Bus) {
        let listener: Arc<dyn Listener> = self.clone();
        for channel in self.channels() {
            bus.remove_listener(channel, &listener);
        }
    }
}

impl Listener for TraceDispatcher {
    fn on_notify(&self, notification: &Notification<'_>) {
        let record = self.dispatch(notification.channel(), notification.message());
        tracing::trace!(channel = %record.channel(), event = %record.event(), "decoded");
        self.sink.emit(&record);
    }

    fn name(&self) -> &str {
        "trace-dispatcher"
    }
}

impl fmt::Debug for TraceDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceDispatcher")
            .field("decoders", &self.entries.len())
            .field("observed", &self.observed)
            .finish_non_exhaustive()
    }
}

/// Collects decoder registrations for a [`TraceDispatcher`].
pub struct TraceDispatcherBuilder {
    entries: Vec<DecoderEntry>,
    observed: Vec<ChannelId>,
    sink: Box<dyn TraceSink>,
}

impl TraceDispatcherBuilder {
    /// Register `decoder` for `channel`.
    pub fn decoder(mut self, channel: &ChannelId, decoder: Decoder) -> Self {
        self.entries.push(DecoderEntry {
            channel: channel.clone(),
            decoder,
        });
        self
    }

    /// Listen on `channel` without a decoder; its messages take the
    /// `"unhandled"` path.
    pub fn observe(mut self, channel: &ChannelId) -> Self {
        self.observed.push(channel.clone());
        self
    }

    /// Register every decoder enabled by Cargo features.
    #[allow(unused_mut, unused_variables)]
    pub fn default_decoders(mut self, channels: &Channels) -> Self {
        #[cfg(feature = "trace-button")]
        {
            self = self.decoder(&channels.button, crate::decoders::BUTTON);
        }
        #[cfg(feature = "trace-cloud")]
        {
            self = self.decoder(&channels.cloud, crate::decoders::CLOUD);
        }
        #[cfg(feature = "trace-environmental")]
        {
            self = self.decoder(&channels.environmental, crate::decoders::ENVIRONMENTAL);
        }
        #[cfg(feature = "trace-fota")]
        {
            self = self.decoder(&channels.fota, crate::decoders::FOTA);
        }
        #[cfg(feature = "trace-led")]
        {
            self = self.decoder(&channels.led, crate::decoders::LED);
        }
        #[cfg(feature = "trace-location")]
        {
            self = self.decoder(&channels.location, crate::decoders::LOCATION);
        }
        #[cfg(feature = "trace-network")]
        {
            self = self.decoder(&channels.network, crate::decoders::NETWORK);
        }
        #[cfg(feature = "trace-power")]
        {
            self = self.decoder(&channels.power, crate::decoders::POWER);
        }
        self
    }

    /// # Errors
    ///
    /// - [`Error::DecoderMismatch`] if a decoder reads a different message
    ///   kind than its channel carries.
    /// - [`Error::DuplicateChannel`] if a channel was registered twice, either
    ///   with two decoders or as both decoded and observed.
    pub fn build(self) -> Result<TraceDispatcher> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.decoder.kind() != e.channel.kind())
        {
            return Err(Error::DecoderMismatch {
                channel: entry.channel.display_name(),
                carries: entry.channel.kind(),
                decodes: entry.decoder.kind(),
            });
        }

        let all: Vec<&ChannelId> = self
            .entries
            .iter()
            .map(|e| &e.channel)
            .chain(&self.observed)
            .collect();
        for (i, channel) in all.iter().enumerate() {
            if all[..i].contains(channel) {
                return Err(Error::DuplicateChannel(channel.display_name()));
            }
        }

        Ok(TraceDispatcher {
            entries: self.entries,
            observed: self.observed,
            sink: self.sink,
        })
    }
}

impl fmt::Debug for TraceDispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceDispatcherBuilder")
            .field("decoders", &self.entries.len())
            .field("observed", &self.observed)
            .finish_non_exhaustive()
    }
}
