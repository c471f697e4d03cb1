use crate::{ChannelId, Message};

/// The message being delivered, borrowed for the duration of one callback.
///
/// Listeners must not keep references past [`Listener::on_notify`]; clone
/// the message if it is needed later.
#[derive(Debug, Clone, Copy)]
pub struct Notification<'a> {
    channel: &'a ChannelId,
    message: &'a Message,
}

impl<'a> Notification<'a> {
    pub(crate) fn new(channel: &'a ChannelId, message: &'a Message) -> Self {
        Self { channel, message }
    }

    /// The channel that published.
    #[inline]
    pub fn channel(&self) -> &'a ChannelId {
        self.channel
    }

    /// The published message.
    #[inline]
    pub fn message(&self) -> &'a Message {
        self.message
    }
}

/// Code registered to run on every publish of a channel.
///
/// Listeners run synchronously inside [`Bus::publish`](crate::Bus), in
/// registration order, while the channel is locked. Per channel they are
/// never invoked concurrently; a listener attached to several channels may
/// be invoked concurrently for different channels, so shared state needs
/// interior synchronization.
///
/// A listener that panics is detached from the channel and the panic is
/// logged; the remaining listeners still run.
///
/// # Example
///
/// ```rust
/// use busprobe::{Bus, Listener, Notification};
///
/// struct Printer;
///
/// impl Listener for Printer {
///     fn on_notify(&self, n: &Notification<'_>) {
///         println!("{} -> {:?}", n.channel(), n.message());
///     }
/// }
/// ```
pub trait Listener: Send + Sync {
    /// Called once per publish on a channel this listener is attached to.
    fn on_notify(&self, notification: &Notification<'_>);

    /// Name used in logs.
    ///
    /// The default uses `type_name::<Self>()`; override it with something
    /// short when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Listener for F
where
    F: Fn(&Notification<'_>) + Send + Sync,
{
    fn on_notify(&self, notification: &Notification<'_>) {
        self(notification)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
