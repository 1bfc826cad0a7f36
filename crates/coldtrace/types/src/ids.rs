use std::fmt;

use serde::{Deserialize, Serialize};

/// Authenticated caller identity, supplied by the hosting substrate for every
/// transition. Identity fields carried inside operation payloads are never a
/// substitute for this value when making authorization decisions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reporting sensor identity, as enrolled in the authorization registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub String);

impl SensorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically assigned shipment identifier. Creation order is id order;
/// ids are never reused and never reset.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ShipmentId(pub u64);

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shipment-{}", self.0)
    }
}

/// Monotonically assigned insurance claim identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ClaimId(pub u64);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "claim-{}", self.0)
    }
}

/// The external logical clock: a monotonically increasing ordering value
/// (block height or equivalent) stamped on every committed transition by the
/// hosting substrate. The core never reads wall-clock time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LedgerHeight(pub u64);

impl LedgerHeight {
    /// Height before all committed transitions.
    pub const fn genesis() -> Self {
        Self(0)
    }
}

impl fmt::Display for LedgerHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "height {}", self.0)
    }
}

/// Per-operation call envelope: who is acting, and at which ledger height the
/// transition commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: AccountId,
    pub height: LedgerHeight,
}

impl CallContext {
    pub fn new(caller: AccountId, height: LedgerHeight) -> Self {
        Self { caller, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_ordered_by_assignment() {
        assert!(ShipmentId(0) < ShipmentId(1));
        assert!(ClaimId(3) < ClaimId(7));
        assert!(LedgerHeight::genesis() < LedgerHeight(1));
    }

    #[test]
    fn display_forms() {
        assert_eq!(ShipmentId(4).to_string(), "shipment-4");
        assert_eq!(ClaimId(0).to_string(), "claim-0");
        assert_eq!(AccountId::new("dist-001").to_string(), "dist-001");
    }
}
