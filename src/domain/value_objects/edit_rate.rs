//! Edit Rate and Duration Value Objects
//!
//! Essence timing parameters carried by track assets. An edit rate is a
//! rational (numerator/denominator) so NTSC-family rates like 24000/1001
//! survive without rounding; a duration counts edit units at that rate.

use std::fmt;

/// Rational edit rate (frames or samples per second)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditRate {
    numerator: u32,
    denominator: u32,
}

impl EditRate {
    pub const FPS_24: EditRate = EditRate::new(24, 1);
    pub const FPS_23_98: EditRate = EditRate::new(24000, 1001);
    pub const FPS_25: EditRate = EditRate::new(25, 1);
    pub const FPS_30: EditRate = EditRate::new(30, 1);
    pub const FPS_29_97: EditRate = EditRate::new(30000, 1001);

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// A rate is usable only when both terms are non-zero
    pub fn is_valid(&self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    pub fn as_f64(&self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl Default for EditRate {
    fn default() -> Self {
        // Zero rate marks "not yet known"; essence metadata fills it in.
        Self::new(0, 1)
    }
}

impl fmt::Display for EditRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Duration in edit units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration(u64);

impl Duration {
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_rates_display_without_denominator() {
        assert_eq!(EditRate::FPS_24.to_string(), "24");
        assert_eq!(EditRate::FPS_23_98.to_string(), "24000/1001");
    }

    #[test]
    fn default_rate_is_invalid() {
        assert!(!EditRate::default().is_valid());
        assert!(EditRate::FPS_25.is_valid());
    }

    #[test]
    fn as_f64_divides() {
        assert!((EditRate::FPS_23_98.as_f64() - 23.976).abs() < 0.001);
    }

    #[test]
    fn duration_units() {
        assert_eq!(Duration::new(1440).units(), 1440);
        assert!(Duration::default().is_zero());
    }
}
