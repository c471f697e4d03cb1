use crate::{Config, TraceRecord, TraceSink};

/// A sink that logs each trace record to the `tracing` crate.
///
/// Records are written at `info` level on the `busprobe::trace` target as
/// `"<prefix>/<channel>, <event>"`, with the labels also attached as
/// structured fields:
///
/// ```text
/// INFO busprobe::trace: zbus/CLOUD_CHAN, CONNECTED channel="CLOUD_CHAN" event="CONNECTED"
/// ```
#[derive(Debug, Clone)]
pub struct TracingSink {
    prefix: String,
}

impl TracingSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Sink using the prefix from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.trace_prefix())
    }

    /// Text written for `record`.
    pub fn format(&self, record: &TraceRecord<'_>) -> String {
        format!("{}/{}", self.prefix, record)
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TraceSink for TracingSink {
    fn emit(&self, record: &TraceRecord<'_>) {
        tracing::info!(
            target: "busprobe::trace",
            channel = %record.channel(),
            event = %record.event(),
            "{}",
            self.format(record)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uses_prefix() {
        let sink = TracingSink::default();
        let r = TraceRecord::new("BUTTON_CHANNEL", "SHORT_PRESS");
        assert_eq!(sink.format(&r), "zbus/BUTTON_CHANNEL, SHORT_PRESS");
    }

    #[test]
    fn prefix_from_config() {
        let sink = TracingSink::from_config(&Config::default().with_trace_prefix("bus"));
        let r = TraceRecord::new("LED_CHAN", "LED_UPDATE");
        assert_eq!(sink.format(&r), "bus/LED_CHAN, LED_UPDATE");
    }
}
