use std::borrow::Cow;

use crate::Label;

/// Firmware-over-the-air progress and commands on `FOTA_CHAN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FotaMsg {
    DownloadFailed,
    DownloadTimedOut,
    DownloadingUpdate,
    NoAvailableUpdate,
    SuccessRebootNeeded,
    ImageApplyNeeded,
    DownloadCanceled,
    PollRequest,
    ImageApply,
    DownloadCancel,
    Unrecognized(u8),
}

impl FotaMsg {
    /// Raw discriminant of this message.
    pub fn discriminant(&self) -> u8 {
        match self {
            FotaMsg::DownloadFailed => 1,
            FotaMsg::DownloadTimedOut => 2,
            FotaMsg::DownloadingUpdate => 3,
            FotaMsg::NoAvailableUpdate => 4,
            FotaMsg::SuccessRebootNeeded => 5,
            FotaMsg::ImageApplyNeeded => 6,
            FotaMsg::DownloadCanceled => 7,
            FotaMsg::PollRequest => 8,
            FotaMsg::ImageApply => 9,
            FotaMsg::DownloadCancel => 10,
            FotaMsg::Unrecognized(d) => *d,
        }
    }
}

impl Label for FotaMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            FotaMsg::DownloadFailed => "DOWNLOAD_FAILED",
            FotaMsg::DownloadTimedOut => "DOWNLOAD_TIMED_OUT",
            FotaMsg::DownloadingUpdate => "DOWNLOADING_UPDATE",
            FotaMsg::NoAvailableUpdate => "NO_AVAILABLE_UPDATE",
            FotaMsg::SuccessRebootNeeded => "SUCCESS_REBOOT_NEEDED",
            FotaMsg::ImageApplyNeeded => "IMAGE_APPLY_NEEDED",
            FotaMsg::DownloadCanceled => "DOWNLOAD_CANCELED",
            FotaMsg::PollRequest => "POLL_REQUEST",
            FotaMsg::ImageApply => "IMAGE_APPLY",
            FotaMsg::DownloadCancel => "DOWNLOAD_CANCEL",
            FotaMsg::Unrecognized(_) => "UNKNOWN",
        })
    }
}
