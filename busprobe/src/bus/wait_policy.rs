use std::fmt;

/// Controls what a publish or read does when the channel is busy.
///
/// A channel is busy while a publish is delivering to its listeners. That
/// includes a listener publishing on the channel it is being notified for.
///
/// | Policy | Channel busy | Use case |
/// |--------|--------------|----------|
/// | [`NoWait`](Self::NoWait) | Fail with [`Error::Busy`](crate::Error::Busy) | Commands from shells and listeners |
/// | [`Forever`](Self::Forever) | Wait for the delivery to finish | Producers on their own thread |
///
/// # Default
///
/// `NoWait`. Publishing never blocks the caller unless it asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaitPolicy {
    /// Fail immediately if the channel is mid-delivery.
    #[default]
    NoWait,

    /// Block until the channel is free.
    ///
    /// Never use this from inside a listener of the same channel: the
    /// delivery it waits for is its own caller.
    Forever,
}

impl WaitPolicy {
    /// Returns `true` if this is the [`NoWait`](Self::NoWait) policy.
    pub fn is_no_wait(&self) -> bool {
        matches!(self, WaitPolicy::NoWait)
    }

    /// Returns `true` if this is the [`Forever`](Self::Forever) policy.
    pub fn is_forever(&self) -> bool {
        matches!(self, WaitPolicy::Forever)
    }
}

impl fmt::Display for WaitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitPolicy::NoWait => write!(f, "NoWait"),
            WaitPolicy::Forever => write!(f, "Forever"),
        }
    }
}
