//! Soundfield Group Value Object
//!
//! Channel layout descriptor for PCM track assets.

use std::fmt;

/// Channel configuration of an audio essence track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SoundfieldGroup {
    /// No layout assigned yet
    #[default]
    None,
    Mono,
    Stereo,
    FiveOne,
    SevenOne,
}

impl SoundfieldGroup {
    pub fn channel_count(&self) -> usize {
        match self {
            SoundfieldGroup::None => 0,
            SoundfieldGroup::Mono => 1,
            SoundfieldGroup::Stereo => 2,
            SoundfieldGroup::FiveOne => 6,
            SoundfieldGroup::SevenOne => 8,
        }
    }

    /// True once a concrete layout has been assigned
    pub fn is_complete(&self) -> bool {
        !matches!(self, SoundfieldGroup::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoundfieldGroup::None => "none",
            SoundfieldGroup::Mono => "1.0",
            SoundfieldGroup::Stereo => "2.0",
            SoundfieldGroup::FiveOne => "5.1",
            SoundfieldGroup::SevenOne => "7.1",
        }
    }
}

impl fmt::Display for SoundfieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
