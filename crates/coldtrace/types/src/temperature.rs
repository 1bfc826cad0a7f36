use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-point temperature in tenths of a degree Celsius.
///
/// Readings and thresholds share this representation so comparisons are exact
/// integer arithmetic; no floating point enters the state machine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Temperature(pub i32);

impl Temperature {
    pub const fn tenths(value: i32) -> Self {
        Self(value)
    }

    /// Whole-degree part, truncated toward zero.
    pub const fn degrees(&self) -> i32 {
        self.0 / 10
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}\u{b0}C", abs / 10, abs % 10)
    }
}

/// The acceptable temperature band a shipment must remain within.
/// Valid iff `min < max`; both bounds are inclusive on the compliant side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: Temperature,
    pub max: Temperature,
}

impl TemperatureRange {
    pub const fn new(min: Temperature, max: Temperature) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// True when the temperature sits inside the band, bounds included.
    pub fn contains(&self, temperature: Temperature) -> bool {
        self.min <= temperature && temperature <= self.max
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Standard cold-chain temperature zones. Each zone maps to a configured
/// range and severity policy in the compliance policy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureZone {
    Frozen,
    Refrigerated,
    Ambient,
}

impl fmt::Display for TemperatureZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemperatureZone::Frozen => "frozen",
            TemperatureZone::Refrigerated => "refrigerated",
            TemperatureZone::Ambient => "ambient",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_tenths() {
        assert_eq!(Temperature::tenths(255).to_string(), "25.5\u{b0}C");
        assert_eq!(Temperature::tenths(-31).to_string(), "-3.1\u{b0}C");
        assert_eq!(Temperature::tenths(0).to_string(), "0.0\u{b0}C");
        assert_eq!(Temperature::tenths(-205).to_string(), "-20.5\u{b0}C");
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = TemperatureRange::new(Temperature(20), Temperature(80));
        assert!(range.contains(Temperature(20)));
        assert!(range.contains(Temperature(80)));
        assert!(range.contains(Temperature(50)));
        assert!(!range.contains(Temperature(19)));
        assert!(!range.contains(Temperature(81)));
    }

    #[test]
    fn degenerate_range_is_invalid() {
        assert!(!TemperatureRange::new(Temperature(80), Temperature(20)).is_valid());
        assert!(!TemperatureRange::new(Temperature(20), Temperature(20)).is_valid());
        assert!(TemperatureRange::new(Temperature(-250), Temperature(-150)).is_valid());
    }
}
