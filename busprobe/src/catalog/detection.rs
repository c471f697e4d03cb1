use std::borrow::Cow;

use crate::Label;

/// One inference result from the detection service.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionResult {
    /// Class id, resolved to a name through [`ClassNames`](crate::detection::ClassNames).
    pub predicted_class: u32,
    /// Fraction in `[0.0, 1.0]`.
    pub confidence: f32,
}

/// Discriminant and payload of a [`DetectionMsg`].
///
/// `Start` and `Stop` are commands addressed to the service. `Started`,
/// `Stopped` and `Result` are events the service publishes back.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionKind {
    Start,
    Stop,
    Started,
    Stopped,
    Result(DetectionResult),
    Unrecognized(u8),
}

impl DetectionKind {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            DetectionKind::Start => 1,
            DetectionKind::Stop => 2,
            DetectionKind::Started => 3,
            DetectionKind::Stopped => 4,
            DetectionKind::Result(_) => 5,
            DetectionKind::Unrecognized(d) => *d,
        }
    }

    /// `true` for the command variants (`Start`, `Stop`).
    pub fn is_command(&self) -> bool {
        matches!(self, DetectionKind::Start | DetectionKind::Stop)
    }
}

/// Message on `DETECTION_CHAN`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionMsg {
    pub kind: DetectionKind,
    /// Milliseconds of uptime when the message was built.
    pub timestamp: i64,
}

impl DetectionMsg {
    pub fn new(kind: DetectionKind, timestamp: i64) -> Self {
        Self { kind, timestamp }
    }
}

impl Label for DetectionMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self.kind {
            DetectionKind::Start => "START",
            DetectionKind::Stop => "STOP",
            DetectionKind::Started => "STARTED",
            DetectionKind::Stopped => "STOPPED",
            DetectionKind::Result(_) => "RESULT",
            DetectionKind::Unrecognized(_) => "UNKNOWN",
        })
    }
}
