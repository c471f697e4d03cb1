use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex},
};

use crate::{Bus, Message, MessageKind, bus::Listener};

/// Opaque handle to one publish/subscribe channel.
///
/// Returned by [`Bus::channel`](crate::Bus::channel). Two handles are equal
/// only if they refer to the same channel instance: equality and hashing
/// use the address of the shared allocation, never the name. Two channels
/// created with the same name are still different channels.
///
/// `ChannelId` is cheap to clone; every clone refers to the same channel.
///
/// # Example
///
/// ```rust
/// use busprobe::{Bus, MessageKind};
///
/// let bus = Bus::default();
/// let a = bus.channel("FOTA_CHAN", MessageKind::Fota);
/// let b = bus.channel("FOTA_CHAN", MessageKind::Fota);
///
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// assert_eq!(a.name(), Some("FOTA_CHAN"));
/// ```
#[derive(Clone)]
pub struct ChannelId(Arc<ChannelInner>);

pub(crate) struct ChannelInner {
    name: Option<String>,
    kind: MessageKind,
    max_listeners: usize,
    pub(crate) state: Mutex<ChannelState>,
}

#[derive(Default)]
pub(crate) struct ChannelState {
    pub(crate) message: Option<Message>,
    pub(crate) listeners: Vec<Arc<dyn Listener>>,
}

impl ChannelId {
    pub(crate) fn new(name: Option<String>, kind: MessageKind, max_listeners: usize) -> Self {
        Self(Arc::new(ChannelInner {
            name,
            kind,
            max_listeners,
            state: Mutex::new(ChannelState::default()),
        }))
    }

    /// The channel's name, if it was created with one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// The message type this channel carries.
    #[inline]
    pub fn kind(&self) -> MessageKind {
        self.0.kind
    }

    /// Maximum number of listeners this channel accepts.
    #[inline]
    pub fn max_listeners(&self) -> usize {
        self.0.max_listeners
    }

    pub(crate) fn inner(&self) -> &ChannelInner {
        &self.0
    }

    /// Name for logs and error messages.
    pub(crate) fn display_name(&self) -> String {
        self.name().unwrap_or("<unnamed>").to_string()
    }
}

impl PartialEq for ChannelId {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ChannelId {}

impl Hash for ChannelId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelId")
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .field("addr", &Arc::as_ptr(&self.0))
            .finish()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("<unnamed>"))
    }
}

/// Handles to the standard application channels.
///
/// Created together on one bus at startup and handed to the components that
/// publish or listen on them.
#[derive(Debug, Clone)]
pub struct Channels {
    pub button: ChannelId,
    pub cloud: ChannelId,
    pub environmental: ChannelId,
    pub fota: ChannelId,
    pub led: ChannelId,
    pub location: ChannelId,
    pub network: ChannelId,
    pub power: ChannelId,
    pub detection: ChannelId,
}

impl Channels {
    pub fn new(bus: &Bus) -> Self {
        Self {
            button: bus.channel("BUTTON_CHAN", MessageKind::Button),
            cloud: bus.channel("CLOUD_CHAN", MessageKind::Cloud),
            environmental: bus.channel("ENVIRONMENTAL_CHAN", MessageKind::Environmental),
            fota: bus.channel("FOTA_CHAN", MessageKind::Fota),
            led: bus.channel("LED_CHAN", MessageKind::Led),
            location: bus.channel("LOCATION_CHAN", MessageKind::Location),
            network: bus.channel("NETWORK_CHAN", MessageKind::Network),
            power: bus.channel("POWER_CHAN", MessageKind::Power),
            detection: bus.channel("DETECTION_CHAN", MessageKind::Detection),
        }
    }

    /// All channels, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelId> {
        [
            &self.button,
            &self.cloud,
            &self.environmental,
            &self.fota,
            &self.led,
            &self.location,
            &self.network,
            &self.power,
            &self.detection,
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_is_identity() {
        let a = ChannelId::new(Some("LED_CHAN".into()), MessageKind::Led, 4);
        let b = ChannelId::new(Some("LED_CHAN".into()), MessageKind::Led, 4);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn hash_follows_identity() {
        let a = ChannelId::new(Some("LED_CHAN".into()), MessageKind::Led, 4);
        let b = ChannelId::new(Some("LED_CHAN".into()), MessageKind::Led, 4);
        let set: HashSet<_> = [a.clone(), a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn standard_channels_are_distinct() {
        let channels = Channels::new(&Bus::default());
        let set: HashSet<_> = channels.iter().collect();
        assert_eq!(set.len(), 9);
        assert_eq!(channels.detection.kind(), MessageKind::Detection);
        assert_eq!(channels.button.name(), Some("BUTTON_CHAN"));
    }

    #[test]
    fn unnamed_channel() {
        let c = ChannelId::new(None, MessageKind::Power, 1);
        assert_eq!(c.name(), None);
        assert_eq!(c.to_string(), "<unnamed>");
    }
}
