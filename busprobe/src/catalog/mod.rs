//! Message types carried by the observed channels.
//!
//! Each channel carries one message type. Messages are sum types with one
//! case per discriminant, so payload fields can only be reached after
//! matching on the discriminant. Every type with a discriminant also has an
//! `Unrecognized(u8)` case holding a raw tag that this catalog does not know
//! yet; decoders and the detection tracker must accept it.

mod button;
mod cloud;
mod detection;
mod environmental;
mod fota;
mod led;
mod location;
mod network;
mod power;

use std::fmt;

pub use button::{ButtonMsg, ButtonPress};
pub use cloud::CloudMsg;
pub use detection::{DetectionKind, DetectionMsg, DetectionResult};
pub use environmental::EnvironmentalMsg;
pub use fota::FotaMsg;
pub use led::LedMsg;
pub use location::{CellInfo, GnssPosition, LocationMsg};
pub use network::NetworkMsg;
pub use power::PowerMsg;

/// Identifies which message type a channel carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    Button,
    Cloud,
    Environmental,
    Fota,
    Led,
    Location,
    Network,
    Power,
    Detection,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Button => "button",
            MessageKind::Cloud => "cloud",
            MessageKind::Environmental => "environmental",
            MessageKind::Fota => "fota",
            MessageKind::Led => "led",
            MessageKind::Location => "location",
            MessageKind::Network => "network",
            MessageKind::Power => "power",
            MessageKind::Detection => "detection",
        };
        f.write_str(name)
    }
}

/// A message published on one of the catalog channels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    Button(ButtonMsg),
    Cloud(CloudMsg),
    Environmental(EnvironmentalMsg),
    Fota(FotaMsg),
    Led(LedMsg),
    Location(LocationMsg),
    Network(NetworkMsg),
    Power(PowerMsg),
    Detection(DetectionMsg),
}

impl Message {
    /// The kind of channel this message belongs on.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Button(_) => MessageKind::Button,
            Message::Cloud(_) => MessageKind::Cloud,
            Message::Environmental(_) => MessageKind::Environmental,
            Message::Fota(_) => MessageKind::Fota,
            Message::Led(_) => MessageKind::Led,
            Message::Location(_) => MessageKind::Location,
            Message::Network(_) => MessageKind::Network,
            Message::Power(_) => MessageKind::Power,
            Message::Detection(_) => MessageKind::Detection,
        }
    }
}

macro_rules! impl_from_msg {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(msg: $ty) -> Self {
                    Message::$variant(msg)
                }
            }
        )*
    };
}

impl_from_msg! {
    ButtonMsg => Button,
    CloudMsg => Cloud,
    EnvironmentalMsg => Environmental,
    FotaMsg => Fota,
    LedMsg => Led,
    LocationMsg => Location,
    NetworkMsg => Network,
    PowerMsg => Power,
    DetectionMsg => Detection,
}
