use std::borrow::Cow;

use crate::Label;

/// Serving cell information attached to a cloud location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellInfo {
    pub mcc: u16,
    pub mnc: u16,
    pub tac: u32,
    pub cell_id: u32,
}

/// A GNSS fix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GnssPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    pub accuracy: f32,
}

/// Location search lifecycle on `LOCATION_CHAN`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationMsg {
    SearchStarted,
    SearchDone,
    SearchTrigger,
    CloudRequest(Vec<CellInfo>),
    AgnssRequest,
    GnssData(GnssPosition),
    Unrecognized(u8),
}

impl LocationMsg {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            LocationMsg::SearchStarted => 1,
            LocationMsg::SearchDone => 2,
            LocationMsg::SearchTrigger => 3,
            LocationMsg::CloudRequest(_) => 4,
            LocationMsg::AgnssRequest => 5,
            LocationMsg::GnssData(_) => 6,
            LocationMsg::Unrecognized(d) => *d,
        }
    }
}

impl Label for LocationMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            LocationMsg::SearchStarted => "SEARCH_STARTED",
            LocationMsg::SearchDone => "SEARCH_DONE",
            LocationMsg::SearchTrigger => "SEARCH_TRIGGER",
            LocationMsg::CloudRequest(_) => "CLOUD_REQUEST",
            LocationMsg::AgnssRequest => "AGNSS_REQUEST",
            LocationMsg::GnssData(_) => "GNSS_DATA",
            LocationMsg::Unrecognized(_) => "UNKNOWN",
        })
    }
}
