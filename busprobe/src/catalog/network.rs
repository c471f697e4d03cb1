use std::borrow::Cow;

use crate::Label;

/// Cellular network state and requests on `NETWORK_CHAN`.
///
/// Only the connection lifecycle and fault cases have their own trace
/// label; everything else traces as `OTHER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkMsg {
    Disconnected,
    Connected,
    Connect,
    Disconnect,
    AttachRejected,
    ModemResetLoop,
    UiccFailure,
    QualitySampleRequest,
    QualitySampleResponse {
        /// Reference signal received power, dBm.
        rsrp: i16,
        /// Signal to noise ratio, dB.
        snr: i8,
    },
    SystemModeRequest,
    Unrecognized(u8),
}

impl NetworkMsg {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            NetworkMsg::Disconnected => 1,
            NetworkMsg::Connected => 2,
            NetworkMsg::Connect => 3,
            NetworkMsg::Disconnect => 4,
            NetworkMsg::AttachRejected => 5,
            NetworkMsg::ModemResetLoop => 6,
            NetworkMsg::UiccFailure => 7,
            NetworkMsg::QualitySampleRequest => 8,
            NetworkMsg::QualitySampleResponse { .. } => 9,
            NetworkMsg::SystemModeRequest => 10,
            NetworkMsg::Unrecognized(d) => *d,
        }
    }
}

impl Label for NetworkMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            NetworkMsg::Connected => "CONNECTED",
            NetworkMsg::Disconnected => "DISCONNECTED",
            NetworkMsg::Connect => "CONNECT_REQ",
            NetworkMsg::Disconnect => "DISCONNECT_REQ",
            NetworkMsg::AttachRejected => "ATTACH_REJECTED",
            NetworkMsg::ModemResetLoop => "RESET_LOOP",
            NetworkMsg::UiccFailure => "SIM_FAILURE",
            NetworkMsg::QualitySampleRequest
            | NetworkMsg::QualitySampleResponse { .. }
            | NetworkMsg::SystemModeRequest
            | NetworkMsg::Unrecognized(_) => "OTHER",
        })
    }
}
