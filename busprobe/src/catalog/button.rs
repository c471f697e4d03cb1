use std::borrow::Cow;

use crate::Label;

/// How long a button was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonPress {
    Short,
    Long,
    Unrecognized(u8),
}

impl ButtonPress {
    /// Raw discriminant of this press type.
    pub fn discriminant(&self) -> u8 {
        match self {
            ButtonPress::Short => 1,
            ButtonPress::Long => 2,
            ButtonPress::Unrecognized(d) => *d,
        }
    }
}

/// A button press on `BUTTON_CHANNEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonMsg {
    pub button_number: u8,
    pub press: ButtonPress,
}

impl ButtonMsg {
    pub fn new(button_number: u8, press: ButtonPress) -> Self {
        Self {
            button_number,
            press,
        }
    }
}

impl Label for ButtonMsg {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self.press {
            ButtonPress::Short => "SHORT_PRESS",
            ButtonPress::Long => "LONG_PRESS",
            ButtonPress::Unrecognized(_) => "UNKNOWN",
        })
    }
}
