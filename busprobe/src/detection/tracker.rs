use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    Bus, ChannelId, Error, Listener, Message, MessageKind, Notification, Result,
    catalog::{DetectionKind, DetectionMsg},
};

use super::{ClassNames, ClassTable};

/// Snapshot of the tracked detection service state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    running: bool,
    count: u32,
}

impl DetectionStats {
    /// `true` between a `Started` event and the next `Stopped` event.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Results seen since the last `Started` event.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// What a detection message changed, for the log.
///
/// Borrows the class name from the tracker's [`ClassNames`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report<'a> {
    Started,
    Stopped {
        total: u32,
    },
    Detection {
        n: u32,
        class_id: u32,
        class_name: &'a str,
        confidence: f32,
    },
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Started => f.write_str("started"),
            Report::Stopped { total } => write!(f, "stopped, total={total}"),
            Report::Detection {
                n,
                class_id,
                class_name,
                confidence,
            } => write!(
                f,
                "detection #{n}: {class_name} (class {class_id}), confidence={:.1}%",
                f64::from(*confidence) * 100.0
            ),
        }
    }
}

/// Listener that follows the detection service lifecycle.
///
/// | Message         | Effect                                   |
/// |-----------------|------------------------------------------|
/// | `Started`       | running, count reset to 0                |
/// | `Stopped`       | not running, count kept                  |
/// | `Result`        | count + 1, whether running or not        |
/// | `Start`, `Stop` | ignored (echoes of our own commands)     |
/// | unrecognized    | warning, no change                       |
///
/// Clones share state: keep one for querying and attach another.
///
/// ```ignore
/// let tracker = DetectionTracker::new(ClassTable::new(["person", "vehicle"]));
/// tracker.attach(&bus, &channels.detection)?;
///
/// // Later, from any thread:
/// let stats = tracker.stats();
/// ```
#[derive(Clone)]
pub struct DetectionTracker {
    state: Arc<Mutex<DetectionStats>>,
    classes: Arc<dyn ClassNames>,
}

impl DetectionTracker {
    pub fn new(classes: impl ClassNames + 'static) -> Self {
        Self {
            state: Arc::default(),
            classes: Arc::new(classes),
        }
    }

    /// Current state.
    pub fn stats(&self) -> DetectionStats {
        *self.lock()
    }

    /// Feed one message through the state machine.
    ///
    /// Returns the report to log, or `None` if the message changed nothing.
    pub fn apply(&self, msg: &DetectionMsg) -> Option<Report<'_>> {
        let mut state = self.lock();
        match msg.kind {
            DetectionKind::Started => {
                state.running = true;
                state.count = 0;
                Some(Report::Started)
            }
            DetectionKind::Stopped => {
                state.running = false;
                Some(Report::Stopped { total: state.count })
            }
            DetectionKind::Result(result) => {
                state.count = state.count.wrapping_add(1);
                Some(Report::Detection {
                    n: state.count,
                    class_id: result.predicted_class,
                    class_name: self.classes.class_name(result.predicted_class),
                    confidence: result.confidence,
                })
            }
            DetectionKind::Start | DetectionKind::Stop => None,
            DetectionKind::Unrecognized(d) => {
                tracing::warn!(discriminant = d, "unknown detection message type");
                None
            }
        }
    }

    /// Attach a clone of this tracker to `channel`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMessage`] if `channel` does not carry detection
    ///   messages.
    /// - Whatever [`Bus::add_listener`] reports.
    pub fn attach(&self, bus: &Bus, channel: &ChannelId) -> Result<()> {
        if channel.kind() != MessageKind::Detection {
            return Err(Error::InvalidMessage {
                channel: channel.display_name(),
                expected: channel.kind(),
                found: MessageKind::Detection,
            });
        }
        bus.add_listener(channel, Arc::new(self.clone()))
    }

    fn lock(&self) -> MutexGuard<'_, DetectionStats> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DetectionTracker {
    fn default() -> Self {
        Self::new(ClassTable::default())
    }
}

impl Listener for DetectionTracker {
    fn on_notify(&self, notification: &Notification<'_>) {
        let Message::Detection(msg) = notification.message() else {
            tracing::warn!(
                channel = %notification.channel(),
                kind = %notification.message().kind(),
                "non-detection message ignored"
            );
            return;
        };
        if let Some(report) = self.apply(msg) {
            tracing::info!(timestamp = msg.timestamp, "{report}");
        }
    }

    fn name(&self) -> &str {
        "detection-tracker"
    }
}

impl fmt::Debug for DetectionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionTracker")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DetectionResult, LedMsg};

    fn msg(kind: DetectionKind) -> DetectionMsg {
        DetectionMsg::new(kind, 0)
    }

    fn result(class: u32, confidence: f32) -> DetectionMsg {
        msg(DetectionKind::Result(DetectionResult {
            predicted_class: class,
            confidence,
        }))
    }

    #[test]
    fn starts_idle() {
        let t = DetectionTracker::default();
        assert_eq!(t.stats(), DetectionStats::default());
        assert!(!t.stats().is_running());
    }

    #[test]
    fn full_session() {
        let t = DetectionTracker::new(ClassTable::new(["background", "person"]));
        let reports: Vec<String> = [
            msg(DetectionKind::Started),
            result(1, 0.9),
            result(7, 0.5),
            msg(DetectionKind::Stopped),
        ]
        .iter()
        .filter_map(|m| t.apply(m))
        .map(|r| r.to_string())
        .collect();

        assert_eq!(
            reports,
            vec![
                "started",
                "detection #1: person (class 1), confidence=90.0%",
                "detection #2: unknown (class 7), confidence=50.0%",
                "stopped, total=2",
            ]
        );
        assert!(!t.stats().is_running());
        assert_eq!(t.stats().count(), 2);
    }

    #[test]
    fn stopped_twice() {
        let t = DetectionTracker::default();
        t.apply(&msg(DetectionKind::Started));
        t.apply(&result(0, 0.1));
        t.apply(&msg(DetectionKind::Stopped));
        let again = t.apply(&msg(DetectionKind::Stopped));

        assert_eq!(again, Some(Report::Stopped { total: 1 }));
        assert!(!t.stats().is_running());
        assert_eq!(t.stats().count(), 1);
    }

    #[test]
    fn result_before_started_still_counts() {
        let t = DetectionTracker::default();
        t.apply(&result(0, 0.3));
        t.apply(&result(0, 0.3));
        assert!(!t.stats().is_running());
        assert_eq!(t.stats().count(), 2);

        t.apply(&msg(DetectionKind::Started));
        assert_eq!(t.stats().count(), 0);
    }

    #[test]
    fn command_echoes_ignored() {
        let t = DetectionTracker::default();
        assert_eq!(t.apply(&msg(DetectionKind::Start)), None);
        assert!(!t.stats().is_running());

        t.apply(&msg(DetectionKind::Started));
        assert_eq!(t.apply(&msg(DetectionKind::Stop)), None);
        assert!(t.stats().is_running());
    }

    #[test]
    fn unrecognized_changes_nothing() {
        let t = DetectionTracker::default();
        t.apply(&msg(DetectionKind::Started));
        t.apply(&result(0, 0.2));
        assert_eq!(t.apply(&msg(DetectionKind::Unrecognized(77))), None);
        assert_eq!(t.stats().count(), 1);
        assert!(t.stats().is_running());
    }

    #[test]
    fn confidence_one_decimal() {
        let t = DetectionTracker::new(ClassTable::new(["cat"]));
        let report = t.apply(&result(0, 0.8675)).unwrap();
        assert_eq!(report.to_string(), "detection #1: cat (class 0), confidence=86.8%");
        assert!(matches!(report, Report::Detection { class_name: "cat", .. }));
        let Report::Detection { confidence, .. } = report else {
            panic!("expected a detection report");
        };
        assert_eq!(confidence, 0.8675);
    }

    #[test]
    fn attach_rejects_other_channel_kinds() {
        let bus = Bus::default();
        let led = bus.channel("LED_CHAN", MessageKind::Led);
        let err = DetectionTracker::default().attach(&bus, &led).unwrap_err();

        assert_eq!(
            err,
            Error::InvalidMessage {
                channel: "LED_CHAN".into(),
                expected: MessageKind::Led,
                found: MessageKind::Detection,
            }
        );
        assert_eq!(err.code(), -42);
        assert_eq!(bus.listener_count(&led), 0);
    }

    #[test]
    fn non_detection_notification_changes_nothing() {
        let bus = Bus::default();
        let led = bus.channel("LED_CHAN", MessageKind::Led);
        let t = DetectionTracker::default();
        t.apply(&msg(DetectionKind::Started));

        let message: Message = LedMsg::default().into();
        t.on_notify(&Notification::new(&led, &message));

        assert!(t.stats().is_running());
        assert_eq!(t.stats().count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let t = DetectionTracker::default();
        let query = t.clone();
        t.apply(&msg(DetectionKind::Started));
        assert!(query.stats().is_running());
    }
}
