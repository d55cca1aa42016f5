use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Truth flavor of a jet originating from a bottom quark.
pub const B_FLAVOR: i32 = 5;

/// Two-valued truth tag selecting which distribution grid a jet samples from.
#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    Signal,
    Background,
}

impl ClassLabel {
    pub const COUNT: usize = 2;

    /// Signal iff the truth flavor is exactly the target flavor.
    pub fn from_flavor(flavor: i32, signal_flavor: i32) -> Self {
        if flavor == signal_flavor {
            Self::Signal
        } else {
            Self::Background
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Self::Signal => 0,
            Self::Background => 1,
        }
    }
}
