//! One decoder per traced channel.
//!
//! A decoder turns a message into a [`TraceRecord`] holding the channel's
//! trace label and the message's condensed event label. Decoders are pure:
//! the same message always yields the same record. Each one branches on the
//! discriminant first (through the catalog's [`Label`] impls) and has an
//! explicit fallback for discriminants the catalog does not know, so every
//! decoder is total.
//!
//! Each decoder function also has a [`Decoder`] constant pairing it with the
//! message kind it reads, which is what
//! [`TraceDispatcherBuilder::decoder`](crate::TraceDispatcherBuilder::decoder)
//! takes. Decoders are compiled in per channel by the `trace-*` Cargo
//! features.

use std::borrow::Cow;

use crate::{Label, Message, MessageKind, TraceRecord};

/// Maps a message to its trace record.
pub type DecodeFn = fn(&Message) -> TraceRecord<'static>;

/// A decode function and the message kind it reads.
///
/// The dispatcher refuses to build when a decoder is registered on a
/// channel of a different kind.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    kind: MessageKind,
    decode: DecodeFn,
}

impl Decoder {
    pub const fn new(kind: MessageKind, decode: DecodeFn) -> Self {
        Self { kind, decode }
    }

    /// Message kind this decoder reads.
    #[inline]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    #[inline]
    pub fn decode(&self, message: &Message) -> TraceRecord<'static> {
        (self.decode)(message)
    }
}

#[cfg(feature = "trace-button")]
pub const BUTTON: Decoder = Decoder::new(MessageKind::Button, button);
#[cfg(feature = "trace-cloud")]
pub const CLOUD: Decoder = Decoder::new(MessageKind::Cloud, cloud);
#[cfg(feature = "trace-environmental")]
pub const ENVIRONMENTAL: Decoder = Decoder::new(MessageKind::Environmental, environmental);
#[cfg(feature = "trace-fota")]
pub const FOTA: Decoder = Decoder::new(MessageKind::Fota, fota);
#[cfg(feature = "trace-led")]
pub const LED: Decoder = Decoder::new(MessageKind::Led, led);
#[cfg(feature = "trace-location")]
pub const LOCATION: Decoder = Decoder::new(MessageKind::Location, location);
#[cfg(feature = "trace-network")]
pub const NETWORK: Decoder = Decoder::new(MessageKind::Network, network);
#[cfg(feature = "trace-power")]
pub const POWER: Decoder = Decoder::new(MessageKind::Power, power);

/// Event label for unrecognized discriminants.
pub const UNKNOWN: &str = "UNKNOWN";

/// Fallback event label used by the network decoder.
pub const OTHER: &str = "OTHER";

pub const BUTTON_CHANNEL: &str = "BUTTON_CHANNEL";
pub const CLOUD_CHAN: &str = "CLOUD_CHAN";
pub const ENVIRONMENTAL_CHAN: &str = "ENVIRONMENTAL_CHAN";
pub const FOTA_CHAN: &str = "FOTA_CHAN";
pub const LED_CHAN: &str = "LED_CHAN";
pub const LOCATION_CHAN: &str = "LOCATION_CHAN";
pub const NETWORK_CHAN: &str = "NETWORK_CHAN";
pub const POWER_CHAN: &str = "POWER_CHAN";

// A message of the wrong kind for the decoder traces as `fallback`.
#[allow(dead_code)]
fn record<T: Label>(channel: &'static str, msg: Option<&T>, fallback: &'static str) -> TraceRecord<'static> {
    let event = msg.map_or(Cow::Borrowed(fallback), Label::label);
    TraceRecord::new(channel, event)
}

#[cfg(feature = "trace-button")]
pub fn button(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Button(m) => Some(m),
        _ => None,
    };
    record(BUTTON_CHANNEL, msg, UNKNOWN)
}

#[cfg(feature = "trace-cloud")]
pub fn cloud(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Cloud(m) => Some(m),
        _ => None,
    };
    record(CLOUD_CHAN, msg, UNKNOWN)
}

#[cfg(feature = "trace-environmental")]
pub fn environmental(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Environmental(m) => Some(m),
        _ => None,
    };
    record(ENVIRONMENTAL_CHAN, msg, UNKNOWN)
}

#[cfg(feature = "trace-fota")]
pub fn fota(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Fota(m) => Some(m),
        _ => None,
    };
    record(FOTA_CHAN, msg, UNKNOWN)
}

/// LED messages have a single shape and always trace as `LED_UPDATE`.
#[cfg(feature = "trace-led")]
pub fn led(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Led(m) => Some(m),
        _ => None,
    };
    record(LED_CHAN, msg, UNKNOWN)
}

#[cfg(feature = "trace-location")]
pub fn location(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Location(m) => Some(m),
        _ => None,
    };
    record(LOCATION_CHAN, msg, UNKNOWN)
}

/// Network messages outside the connection lifecycle trace as `OTHER`.
#[cfg(feature = "trace-network")]
pub fn network(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Network(m) => Some(m),
        _ => None,
    };
    record(NETWORK_CHAN, msg, OTHER)
}

#[cfg(feature = "trace-power")]
pub fn power(message: &Message) -> TraceRecord<'static> {
    let msg = match message {
        Message::Power(m) => Some(m),
        _ => None,
    };
    record(POWER_CHAN, msg, UNKNOWN)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    #[allow(unused_imports)]
    use crate::catalog::*;

    #[cfg(feature = "trace-button")]
    #[test]
    fn button_press_duration() {
        let short = ButtonMsg::new(1, ButtonPress::Short).into();
        let long = ButtonMsg::new(2, ButtonPress::Long).into();
        let odd = ButtonMsg::new(1, ButtonPress::Unrecognized(9)).into();
        assert_eq!(button(&short), TraceRecord::new(BUTTON_CHANNEL, "SHORT_PRESS"));
        assert_eq!(button(&long).event(), "LONG_PRESS");
        assert_eq!(button(&odd).event(), UNKNOWN);
    }

    #[cfg(feature = "trace-cloud")]
    #[test]
    fn cloud_labels() {
        let cases = [
            (CloudMsg::Disconnected, "DISCONNECTED"),
            (CloudMsg::Connected, "CONNECTED"),
            (CloudMsg::ConnectionAttemptCountReached, "CONN_ATTEMPTS_REACHED"),
            (CloudMsg::PayloadJson("{}".into()), "PAYLOAD_JSON"),
            (CloudMsg::PollShadow, "POLL_SHADOW"),
            (CloudMsg::ShadowResponseDesired("{}".into()), "SHADOW_RESPONSE_DESIRED"),
            (CloudMsg::ShadowResponseDelta("{}".into()), "SHADOW_RESPONSE_DELTA"),
            (CloudMsg::Unrecognized(200), UNKNOWN),
        ];
        for (msg, expected) in cases {
            let rec = cloud(&msg.into());
            assert_eq!(rec.channel(), CLOUD_CHAN);
            assert_eq!(rec.event(), expected);
        }
    }

    #[cfg(feature = "trace-environmental")]
    #[test]
    fn environmental_labels() {
        let resp = EnvironmentalMsg::SampleResponse {
            temperature: 21.5,
            pressure: 101.3,
            humidity: 40.0,
        };
        assert_eq!(
            environmental(&EnvironmentalMsg::SampleRequest.into()).event(),
            "SENSOR_SAMPLE_REQUEST"
        );
        assert_eq!(environmental(&resp.into()).event(), "SENSOR_SAMPLE_RESPONSE");
    }

    #[cfg(feature = "trace-fota")]
    #[test]
    fn fota_labels() {
        assert_eq!(fota(&FotaMsg::DownloadTimedOut.into()).event(), "DOWNLOAD_TIMED_OUT");
        assert_eq!(fota(&FotaMsg::DownloadCancel.into()).event(), "DOWNLOAD_CANCEL");
        assert_eq!(fota(&FotaMsg::Unrecognized(0).into()).event(), UNKNOWN);
    }

    #[cfg(feature = "trace-led")]
    #[test]
    fn led_is_constant() {
        let msg = LedMsg {
            red: 255,
            repetitions: -1,
            ..Default::default()
        };
        assert_eq!(led(&msg.into()), TraceRecord::new(LED_CHAN, "LED_UPDATE"));
    }

    #[cfg(feature = "trace-location")]
    #[test]
    fn location_labels() {
        let gnss = LocationMsg::GnssData(GnssPosition::default());
        assert_eq!(location(&gnss.into()).event(), "GNSS_DATA");
        assert_eq!(
            location(&LocationMsg::CloudRequest(vec![CellInfo::default()]).into()).event(),
            "CLOUD_REQUEST"
        );
        assert_eq!(location(&LocationMsg::Unrecognized(7).into()).event(), UNKNOWN);
    }

    #[cfg(feature = "trace-network")]
    #[test]
    fn network_labels() {
        assert_eq!(network(&NetworkMsg::Connect.into()).event(), "CONNECT_REQ");
        assert_eq!(network(&NetworkMsg::ModemResetLoop.into()).event(), "RESET_LOOP");
        assert_eq!(network(&NetworkMsg::UiccFailure.into()).event(), "SIM_FAILURE");
        let quality = NetworkMsg::QualitySampleResponse { rsrp: -90, snr: 12 };
        assert_eq!(network(&quality.into()).event(), OTHER);
        assert_eq!(network(&NetworkMsg::Unrecognized(99).into()).event(), OTHER);
    }

    #[cfg(feature = "trace-power")]
    #[test]
    fn power_labels() {
        let resp = PowerMsg::SampleResponse {
            percentage: 80.0,
            charging: true,
            voltage: 4100,
        };
        assert_eq!(power(&PowerMsg::SampleRequest.into()).event(), "SAMPLE_REQUEST");
        assert_eq!(power(&resp.into()).event(), "SAMPLE_RESPONSE");
    }

    #[cfg(all(feature = "trace-cloud", feature = "trace-network"))]
    #[test]
    fn wrong_kind_uses_fallback() {
        let msg: Message = FotaMsg::PollRequest.into();
        assert_eq!(cloud(&msg).event(), UNKNOWN);
        assert_eq!(network(&msg).event(), OTHER);
    }

    #[cfg(all(feature = "trace-cloud", feature = "trace-power"))]
    #[test]
    fn constants_carry_their_kind() {
        assert_eq!(CLOUD.kind(), MessageKind::Cloud);
        assert_eq!(POWER.kind(), MessageKind::Power);
        let rec = CLOUD.decode(&CloudMsg::PollShadow.into());
        assert_eq!(rec, TraceRecord::new(CLOUD_CHAN, "POLL_SHADOW"));
    }

    #[cfg(feature = "trace-fota")]
    #[test]
    fn every_raw_discriminant_decodes() {
        for d in 0..=u8::MAX {
            let rec = fota(&FotaMsg::Unrecognized(d).into());
            assert!(!rec.event().is_empty());
        }
    }
}
