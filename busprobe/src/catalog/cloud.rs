use std::borrow::Cow;

use crate::Label;

/// Cloud connection state and shadow traffic on `CLOUD_CHAN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloudMsg {
    Disconnected,
    Connected,
    ConnectionAttemptCountReached,
    /// JSON document to send to the cloud.
    PayloadJson(String),
    PollShadow,
    /// Desired section of the device shadow.
    ShadowResponseDesired(String),
    /// Delta section of the device shadow.
    ShadowResponseDelta(String),
    Unrecognized(u8),
}

impl CloudMsg {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            CloudMsg::Disconnected => 1,
            CloudMsg::Connected => 2,
            CloudMsg::ConnectionAttemptCountReached => 3,
            CloudMsg::PayloadJson(_) => 4,
            CloudMsg::PollShadow => 5,
            CloudMsg::ShadowResponseDesired(_) => 6,
            CloudMsg::ShadowResponseDelta(_) => 7,
            CloudMsg::Unrecognized(d) => *d,
        }
    }
}

impl Label for CloudMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            CloudMsg::Disconnected => "DISCONNECTED",
            CloudMsg::Connected => "CONNECTED",
            CloudMsg::ConnectionAttemptCountReached => "CONN_ATTEMPTS_REACHED",
            CloudMsg::PayloadJson(_) => "PAYLOAD_JSON",
            CloudMsg::PollShadow => "POLL_SHADOW",
            CloudMsg::ShadowResponseDesired(_) => "SHADOW_RESPONSE_DESIRED",
            CloudMsg::ShadowResponseDelta(_) => "SHADOW_RESPONSE_DELTA",
            CloudMsg::Unrecognized(_) => "UNKNOWN",
        })
    }
}
