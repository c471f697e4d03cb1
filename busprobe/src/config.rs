/// Runtime configuration for the bus and the trace sink.
///
/// Use the builder methods to customize, or [`Default`] for the stock
/// values.
///
/// # Examples
///
/// ```rust
/// use busprobe::Config;
///
/// let config = Config::default()
///     .with_max_listeners_per_channel(4)
///     .with_trace_prefix("bus");
/// assert_eq!(config.trace_prefix(), "bus");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// How many listeners a single channel accepts before
    /// [`Bus::add_listener`](crate::Bus::add_listener) fails.
    /// Default: 16
    max_listeners_per_channel: usize,

    /// Prefix written before the channel label by
    /// [`TracingSink`](crate::sinks::TracingSink).
    /// Default: "zbus"
    trace_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_listeners_per_channel: 16,
            trace_prefix: "zbus".to_string(),
        }
    }
}

impl Config {
    /// Set the per-channel listener capacity. Clamped to at least 1.
    pub fn with_max_listeners_per_channel(mut self, capacity: usize) -> Self {
        self.max_listeners_per_channel = capacity.max(1);
        self
    }

    /// Returns the per-channel listener capacity.
    pub fn max_listeners_per_channel(&self) -> usize {
        self.max_listeners_per_channel
    }

    /// Set the prefix used in trace lines.
    pub fn with_trace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trace_prefix = prefix.into();
        self
    }

    /// Returns the prefix used in trace lines.
    pub fn trace_prefix(&self) -> &str {
        &self.trace_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.max_listeners_per_channel(), 16);
        assert_eq!(c.trace_prefix(), "zbus");
    }

    #[test]
    fn listener_capacity_is_clamped() {
        let c = Config::default().with_max_listeners_per_channel(0);
        assert_eq!(c.max_listeners_per_channel(), 1);
    }
}
