use std::fmt;

use serde::{Deserialize, Serialize};

/// Shipment lifecycle.
///
/// `Active -> Completed` and `Active -> Violated -> Claimed` are the only
/// forward paths. A violated shipment never returns to `Active`; `Completed`
/// and `Claimed` accept no further transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Active,
    Violated,
    Completed,
    Claimed,
}

impl ShipmentStatus {
    /// Shipments still moving through the chain accept sensor readings.
    /// A threshold breach marks the shipment `Violated` but does not stop
    /// telemetry; terminal states do.
    pub fn in_transit(&self) -> bool {
        matches!(self, ShipmentStatus::Active | ShipmentStatus::Violated)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Completed | ShipmentStatus::Claimed)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShipmentStatus::Active => "active",
            ShipmentStatus::Violated => "violated",
            ShipmentStatus::Completed => "completed",
            ShipmentStatus::Claimed => "claimed",
        };
        write!(f, "{name}")
    }
}

/// Insurance claim lifecycle: `Pending -> Approved -> Settled`, or
/// `Pending -> Rejected`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Settled,
}

impl ClaimStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Settled)
    }

    /// A claim still awaiting a decision or payout.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Settled => "settled",
        };
        write!(f, "{name}")
    }
}

/// Severity tier of a threshold breach. The deviation cutoffs between tiers
/// are compliance configuration, not constants.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Which side of the acceptable band a reading escaped through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreachedBound {
    Below,
    Above,
}

impl fmt::Display for BreachedBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreachedBound::Below => "below minimum",
            BreachedBound::Above => "above maximum",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_and_terminal_partition() {
        assert!(ShipmentStatus::Active.in_transit());
        assert!(ShipmentStatus::Violated.in_transit());
        assert!(!ShipmentStatus::Completed.in_transit());
        assert!(!ShipmentStatus::Claimed.in_transit());
        assert!(ShipmentStatus::Completed.is_terminal());
        assert!(ShipmentStatus::Claimed.is_terminal());
    }

    #[test]
    fn claim_terminality() {
        assert!(ClaimStatus::Pending.is_open());
        assert!(ClaimStatus::Approved.is_open());
        assert!(ClaimStatus::Rejected.is_terminal());
        assert!(ClaimStatus::Settled.is_terminal());
    }

    #[test]
    fn severity_tiers_are_ordered() {
        assert!(Severity::Minor < Severity::Major);
        assert!(Severity::Major < Severity::Critical);
    }
}
