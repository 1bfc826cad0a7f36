//! Compliance engine: threshold evaluation and severity policy.
//!
//! Evaluation is a pure function of (temperature, range, bands). The
//! severity cutoffs and per-zone ranges live in [`CompliancePolicy`] so
//! frozen, refrigerated, and ambient cargo can carry different policies
//! without touching the evaluation path.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use coldtrace_types::{BreachedBound, Severity, Temperature, TemperatureRange, TemperatureZone};

/// Deviation cutoffs (in tenths of a degree beyond the breached bound) that
/// promote a breach to `Major` or `Critical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBands {
    pub major_excess: u32,
    pub critical_excess: u32,
}

impl SeverityBands {
    pub const fn new(major_excess: u32, critical_excess: u32) -> Self {
        Self {
            major_excess,
            critical_excess,
        }
    }

    /// Two-tier policy: everything at or past `margin` is critical, the
    /// `Major` tier is unreachable.
    pub const fn fixed_margin(margin: u32) -> Self {
        Self {
            major_excess: margin,
            critical_excess: margin,
        }
    }

    pub fn classify(&self, deviation: u32) -> Severity {
        if deviation >= self.critical_excess {
            Severity::Critical
        } else if deviation >= self.major_excess {
            Severity::Major
        } else {
            Severity::Minor
        }
    }
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self::new(20, 50)
    }
}

/// Acceptable range and severity policy for one temperature zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePolicy {
    pub range: TemperatureRange,
    pub bands: SeverityBands,
}

/// Zone-keyed policy table plus the bands applied to shipments created with
/// an explicit range. Keyed by the closed zone enumeration rather than zone
/// names, so adding a zone is a compile-visible change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompliancePolicy {
    pub frozen: ZonePolicy,
    pub refrigerated: ZonePolicy,
    pub ambient: ZonePolicy,
    /// Bands for shipments whose range was given explicitly at creation.
    pub explicit_bands: SeverityBands,
}

impl CompliancePolicy {
    pub fn zone(&self, zone: TemperatureZone) -> &ZonePolicy {
        match zone {
            TemperatureZone::Frozen => &self.frozen,
            TemperatureZone::Refrigerated => &self.refrigerated,
            TemperatureZone::Ambient => &self.ambient,
        }
    }

    pub fn set_zone(&mut self, zone: TemperatureZone, policy: ZonePolicy) {
        match zone {
            TemperatureZone::Frozen => self.frozen = policy,
            TemperatureZone::Refrigerated => self.refrigerated = policy,
            TemperatureZone::Ambient => self.ambient = policy,
        }
    }

    /// Bands applicable to a shipment: its zone's bands, or the explicit
    /// range bands when it was created without a zone classification.
    pub fn bands_for(&self, zone: Option<TemperatureZone>) -> &SeverityBands {
        match zone {
            Some(zone) => &self.zone(zone).bands,
            None => &self.explicit_bands,
        }
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            // Frozen cargo degrades fastest, so its tiers promote sooner.
            frozen: ZonePolicy {
                range: TemperatureRange::new(Temperature(-250), Temperature(-150)),
                bands: SeverityBands::new(10, 30),
            },
            refrigerated: ZonePolicy {
                range: TemperatureRange::new(Temperature(20), Temperature(80)),
                bands: SeverityBands::default(),
            },
            ambient: ZonePolicy {
                range: TemperatureRange::new(Temperature(150), Temperature(250)),
                bands: SeverityBands::default(),
            },
            explicit_bands: SeverityBands::default(),
        }
    }
}

/// A detected threshold breach, ready to be recorded as a violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breach {
    pub bound: BreachedBound,
    /// Distance beyond the breached bound, in tenths of a degree.
    pub deviation: u32,
    pub severity: Severity,
}

/// Evaluate one reading against a range. A reading breaches iff it falls
/// strictly outside the band; the bounds themselves are compliant.
pub fn evaluate(
    temperature: Temperature,
    range: TemperatureRange,
    bands: &SeverityBands,
) -> Option<Breach> {
    if temperature < range.min {
        let deviation = range.min.0.abs_diff(temperature.0);
        Some(Breach {
            bound: BreachedBound::Below,
            deviation,
            severity: bands.classify(deviation),
        })
    } else if temperature > range.max {
        let deviation = temperature.0.abs_diff(range.max.0);
        Some(Breach {
            bound: BreachedBound::Above,
            deviation,
            severity: bands.classify(deviation),
        })
    } else {
        None
    }
}
