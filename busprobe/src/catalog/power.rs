use std::borrow::Cow;

use crate::Label;

/// Battery sampling on `POWER_CHAN`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerMsg {
    SampleRequest,
    SampleResponse {
        /// State of charge, percent.
        percentage: f64,
        charging: bool,
        /// Millivolts.
        voltage: u16,
    },
    Unrecognized(u8),
}

impl PowerMsg {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            PowerMsg::SampleRequest => 1,
            PowerMsg::SampleResponse { .. } => 2,
            PowerMsg::Unrecognized(d) => *d,
        }
    }
}

impl Label for PowerMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            PowerMsg::SampleRequest => "SAMPLE_REQUEST",
            PowerMsg::SampleResponse { .. } => "SAMPLE_RESPONSE",
            PowerMsg::Unrecognized(_) => "UNKNOWN",
        })
    }
}
