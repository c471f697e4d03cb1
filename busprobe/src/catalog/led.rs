use std::borrow::Cow;

use crate::Label;

/// LED pattern update on `LED_CHAN`. Single shape, no discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedMsg {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub duration_on_msec: u32,
    pub duration_off_msec: u32,
    /// Number of on/off cycles, `-1` repeats forever.
    pub repetitions: i32,
}

impl Label for LedMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("LED_UPDATE")
    }
}
