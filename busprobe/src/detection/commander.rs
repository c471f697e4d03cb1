use crate::{
    Bus, ChannelId, Clock, Label, MonotonicClock, Publish, Result, WaitPolicy,
    catalog::{DetectionKind, DetectionMsg},
};

/// Publishes `Start` and `Stop` commands on the detection channel.
///
/// Publishing never waits: if the channel is busy or refuses the message the
/// call fails at once with the bus error, which is logged and returned. The
/// command is not retried.
#[derive(Debug, Clone)]
pub struct DetectionCommander<P: Publish = Bus, C: Clock = MonotonicClock> {
    publisher: P,
    channel: ChannelId,
    clock: C,
}

impl<P: Publish> DetectionCommander<P, MonotonicClock> {
    pub fn new(publisher: P, channel: ChannelId) -> Self {
        Self::with_clock(publisher, channel, MonotonicClock::new())
    }
}

impl<P: Publish, C: Clock> DetectionCommander<P, C> {
    pub fn with_clock(publisher: P, channel: ChannelId, clock: C) -> Self {
        Self {
            publisher,
            channel,
            clock,
        }
    }

    /// Ask the detection service to start.
    pub fn request_start(&self) -> Result<()> {
        self.send(DetectionKind::Start)
    }

    /// Ask the detection service to stop.
    pub fn request_stop(&self) -> Result<()> {
        self.send(DetectionKind::Stop)
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    fn send(&self, kind: DetectionKind) -> Result<()> {
        let msg = DetectionMsg::new(kind, self.clock.uptime_ms());
        self.publisher
            .publish(&self.channel, msg.into(), WaitPolicy::NoWait)
            .inspect_err(|e| {
                tracing::error!(
                    command = %msg.label(),
                    code = e.code(),
                    error = %e,
                    "failed to publish detection command"
                );
            })
    }
}
