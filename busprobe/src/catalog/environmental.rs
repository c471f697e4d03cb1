use std::borrow::Cow;

use crate::Label;

/// Environmental sensor traffic on `ENVIRONMENTAL_CHAN`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnvironmentalMsg {
    SampleRequest,
    SampleResponse {
        /// Degrees Celsius.
        temperature: f64,
        /// Kilopascal.
        pressure: f64,
        /// Relative humidity, percent.
        humidity: f64,
    },
    Unrecognized(u8),
}

impl EnvironmentalMsg {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            EnvironmentalMsg::SampleRequest => 1,
            EnvironmentalMsg::SampleResponse { .. } => 2,
            EnvironmentalMsg::Unrecognized(d) => *d,
        }
    }
}

impl Label for EnvironmentalMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            EnvironmentalMsg::SampleRequest => "SENSOR_SAMPLE_REQUEST",
            EnvironmentalMsg::SampleResponse { .. } => "SENSOR_SAMPLE_RESPONSE",
            EnvironmentalMsg::Unrecognized(_) => "UNKNOWN",
        })
    }
}
