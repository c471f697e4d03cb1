//! Minimal synchronous publish/subscribe bus.
//!
//! The bus delivers each published message to every listener of the
//! channel, in registration order, before `publish` returns. There are no
//! queues and no background tasks; the channel stays locked for the whole
//! delivery, so one channel never delivers two messages at once.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use busprobe::{Bus, Listener, Notification, MessageKind, Publish, WaitPolicy};
//! use busprobe::catalog::FotaMsg;
//!
//! let bus = Bus::default();
//! let fota = bus.channel("FOTA_CHAN", MessageKind::Fota);
//!
//! let listener: Arc<dyn Listener> = Arc::new(|n: &Notification<'_>| {
//!     println!("{:?}", n.message());
//! });
//! bus.add_listener(&fota, listener)?;
//! bus.publish(&fota, FotaMsg::PollRequest.into(), WaitPolicy::NoWait)?;
//! # Ok::<(), busprobe::Error>(())
//! ```

mod listener;
mod wait_policy;

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, MutexGuard, PoisonError, TryLockError},
};

pub use listener::{Listener, Notification};
pub use wait_policy::WaitPolicy;

use crate::{
    ChannelId, Config, Error, Message, MessageKind, Result,
    channel::ChannelState,
};

/// Publishing side of a bus.
///
/// [`Bus`] implements it; components that only publish (like
/// [`DetectionCommander`](crate::detection::DetectionCommander)) take any
/// `Publish` so tests can substitute a failing bus.
pub trait Publish {
    /// Publish `message` on `channel` and deliver it to every listener.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMessage`] if the message kind does not match the channel.
    /// - [`Error::Busy`] if `wait` is [`WaitPolicy::NoWait`] and the channel is mid-delivery.
    fn publish(&self, channel: &ChannelId, message: Message, wait: WaitPolicy) -> Result<()>;
}

impl<P: Publish + ?Sized> Publish for Arc<P> {
    fn publish(&self, channel: &ChannelId, message: Message, wait: WaitPolicy) -> Result<()> {
        (**self).publish(channel, message, wait)
    }
}

/// In-process bus that creates channels and delivers messages.
///
/// Cheap to clone; clones share the configuration. Channels themselves hold
/// their listeners and last message, so a [`ChannelId`] stays usable with
/// any clone of the bus that created it.
#[derive(Debug, Clone, Default)]
pub struct Bus {
    config: Arc<Config>,
}

impl Bus {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration this bus was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a named channel carrying `kind` messages.
    pub fn channel(&self, name: impl Into<String>, kind: MessageKind) -> ChannelId {
        ChannelId::new(
            Some(name.into()),
            kind,
            self.config.max_listeners_per_channel(),
        )
    }

    /// Create a channel without a name.
    pub fn unnamed_channel(&self, kind: MessageKind) -> ChannelId {
        ChannelId::new(None, kind, self.config.max_listeners_per_channel())
    }

    /// Attach a listener to a channel.
    ///
    /// Blocks while the channel is mid-delivery, so it must not be called
    /// from a listener of the same channel.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateListener`] if this exact listener is already attached.
    /// - [`Error::ListenerCapacity`] if the channel is full.
    pub fn add_listener(&self, channel: &ChannelId, listener: Arc<dyn Listener>) -> Result<()> {
        let mut state = lock_forever(channel);
        if state.listeners.iter().any(|l| same_listener(l, &listener)) {
            return Err(Error::DuplicateListener(channel.display_name()));
        }
        if state.listeners.len() >= channel.max_listeners() {
            return Err(Error::ListenerCapacity(channel.display_name()));
        }
        tracing::debug!(channel = %channel, listener = %listener.name(), "listener attached");
        state.listeners.push(listener);
        Ok(())
    }

    /// Detach a listener. Returns `true` if it was attached.
    pub fn remove_listener(&self, channel: &ChannelId, listener: &Arc<dyn Listener>) -> bool {
        let mut state = lock_forever(channel);
        let before = state.listeners.len();
        state.listeners.retain(|l| !same_listener(l, listener));
        before != state.listeners.len()
    }

    /// Number of listeners attached to a channel.
    pub fn listener_count(&self, channel: &ChannelId) -> usize {
        lock_forever(channel).listeners.len()
    }

    /// Copy of the last message published on a channel.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] if `wait` is [`WaitPolicy::NoWait`] and the channel is mid-delivery.
    pub fn read(&self, channel: &ChannelId, wait: WaitPolicy) -> Result<Option<Message>> {
        let state = lock(channel, wait)?;
        Ok(state.message.clone())
    }
}

impl Publish for Bus {
    fn publish(&self, channel: &ChannelId, message: Message, wait: WaitPolicy) -> Result<()> {
        if message.kind() != channel.kind() {
            return Err(Error::InvalidMessage {
                channel: channel.display_name(),
                expected: channel.kind(),
                found: message.kind(),
            });
        }

        let mut state = lock(channel, wait)?;
        let ChannelState { message: slot, listeners } = &mut *state;
        let notification = Notification::new(channel, slot.insert(message));

        let mut panicked = Vec::new();
        for (idx, listener) in listeners.iter().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| listener.on_notify(&notification)));
            if result.is_err() {
                tracing::error!(channel = %channel, listener = %listener.name(), "listener panicked, removing");
                panicked.push(idx);
            }
        }
        tracing::trace!(channel = %channel, listeners = listeners.len(), "message delivered");

        while let Some(idx) = panicked.pop() {
            listeners.remove(idx);
        }
        Ok(())
    }
}

fn lock(channel: &ChannelId, wait: WaitPolicy) -> Result<MutexGuard<'_, ChannelState>> {
    match wait {
        WaitPolicy::Forever => Ok(lock_forever(channel)),
        WaitPolicy::NoWait => match channel.inner().state.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => Err(Error::Busy(channel.display_name())),
        },
    }
}

// Listener panics are caught before they can poison the lock; recover anyway.
fn lock_forever(channel: &ChannelId) -> MutexGuard<'_, ChannelState> {
    channel
        .inner()
        .state
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn same_listener(a: &Arc<dyn Listener>, b: &Arc<dyn Listener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::catalog::{CloudMsg, FotaMsg, LedMsg};

    struct Counter(AtomicUsize);

    impl Listener for Counter {
        fn on_notify(&self, _n: &Notification<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counter() -> Arc<Counter> {
        Arc::new(Counter(AtomicUsize::new(0)))
    }

    #[test]
    fn delivers_to_every_listener_in_order() {
        let bus = Bus::default();
        let chan = bus.channel("CLOUD_CHAN", MessageKind::Cloud);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            let l: Arc<dyn Listener> = Arc::new(move |n: &Notification<'_>| {
                assert_eq!(n.message(), &Message::Cloud(CloudMsg::Connected));
                seen.lock().unwrap().push(tag);
            });
            bus.add_listener(&chan, l).unwrap();
        }

        bus.publish(&chan, CloudMsg::Connected.into(), WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let bus = Bus::default();
        let chan = bus.channel("FOTA_CHAN", MessageKind::Fota);
        let err = bus
            .publish(&chan, LedMsg::default().into(), WaitPolicy::NoWait)
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidMessage {
                channel: "FOTA_CHAN".into(),
                expected: MessageKind::Fota,
                found: MessageKind::Led,
            }
        );
        assert_eq!(bus.read(&chan, WaitPolicy::NoWait).unwrap(), None);
    }

    #[test]
    fn read_returns_last_message() {
        let bus = Bus::default();
        let chan = bus.channel("FOTA_CHAN", MessageKind::Fota);
        bus.publish(&chan, FotaMsg::PollRequest.into(), WaitPolicy::NoWait)
            .unwrap();
        bus.publish(&chan, FotaMsg::ImageApply.into(), WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(
            bus.read(&chan, WaitPolicy::NoWait).unwrap(),
            Some(Message::Fota(FotaMsg::ImageApply))
        );
    }

    #[test]
    fn duplicate_listener_is_rejected() {
        let bus = Bus::default();
        let chan = bus.channel("LED_CHAN", MessageKind::Led);
        let l: Arc<dyn Listener> = counter();
        bus.add_listener(&chan, l.clone()).unwrap();
        assert_eq!(
            bus.add_listener(&chan, l),
            Err(Error::DuplicateListener("LED_CHAN".into()))
        );
    }

    #[test]
    fn listener_capacity_is_enforced() {
        let bus = Bus::new(Config::default().with_max_listeners_per_channel(1));
        let chan = bus.channel("LED_CHAN", MessageKind::Led);
        bus.add_listener(&chan, counter()).unwrap();
        let err = bus.add_listener(&chan, counter()).unwrap_err();
        assert_eq!(err, Error::ListenerCapacity("LED_CHAN".into()));
        assert_eq!(err.code(), -12);
    }

    #[test]
    fn remove_listener_stops_delivery() {
        let bus = Bus::default();
        let chan = bus.channel("LED_CHAN", MessageKind::Led);
        let c = counter();
        let l: Arc<dyn Listener> = c.clone();
        bus.add_listener(&chan, l.clone()).unwrap();
        bus.publish(&chan, LedMsg::default().into(), WaitPolicy::NoWait)
            .unwrap();
        assert!(bus.remove_listener(&chan, &l));
        assert!(!bus.remove_listener(&chan, &l));
        bus.publish(&chan, LedMsg::default().into(), WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(c.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn republish_from_listener_is_busy() {
        let bus = Bus::default();
        let chan = bus.channel("FOTA_CHAN", MessageKind::Fota);
        let result = Arc::new(Mutex::new(None));

        let (inner_bus, inner_chan, inner_result) = (bus.clone(), chan.clone(), result.clone());
        let l: Arc<dyn Listener> = Arc::new(move |n: &Notification<'_>| {
            if n.message() == &Message::Fota(FotaMsg::PollRequest) {
                let r = inner_bus.publish(&inner_chan, FotaMsg::ImageApply.into(), WaitPolicy::NoWait);
                *inner_result.lock().unwrap() = Some(r);
            }
        });
        bus.add_listener(&chan, l).unwrap();

        bus.publish(&chan, FotaMsg::PollRequest.into(), WaitPolicy::NoWait)
            .unwrap();
        let r = result.lock().unwrap().take().unwrap();
        assert_eq!(r, Err(Error::Busy("FOTA_CHAN".into())));
        assert_eq!(r.unwrap_err().code(), -16);
    }

    #[test]
    fn panicking_listener_is_detached() {
        let bus = Bus::default();
        let chan = bus.channel("LED_CHAN", MessageKind::Led);
        let boom: Arc<dyn Listener> = Arc::new(|_n: &Notification<'_>| {
            panic!("boom");
        });
        let c = counter();
        bus.add_listener(&chan, boom).unwrap();
        bus.add_listener(&chan, c.clone()).unwrap();

        bus.publish(&chan, LedMsg::default().into(), WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(bus.listener_count(&chan), 1);
        assert_eq!(c.0.load(Ordering::SeqCst), 1);

        bus.publish(&chan, LedMsg::default().into(), WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(c.0.load(Ordering::SeqCst), 2);
    }
}
