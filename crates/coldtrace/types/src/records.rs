use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceHash;
use crate::ids::{AccountId, ClaimId, LedgerHeight, SensorId, ShipmentId};
use crate::status::{BreachedBound, ClaimStatus, Severity, ShipmentStatus};
use crate::temperature::{Temperature, TemperatureRange, TemperatureZone};

/// Authorization grant held for a sensor identity. Absence of a grant means
/// the sensor is not authorized; revocation deletes the entry outright.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorGrant {
    pub granted_by: AccountId,
    pub granted_at: LedgerHeight,
}

/// Insurance terms configured at shipment creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceTerms {
    /// Maximum payable amount, in minor currency units.
    pub coverage_minor: u64,
    /// When set, filing a claim moves the shipment to `Claimed` and no
    /// further claims are accepted against it.
    pub exclusive_claim: bool,
}

impl InsuranceTerms {
    /// Terms with the given coverage and a single-claim policy.
    pub fn coverage(coverage_minor: u64) -> Self {
        Self {
            coverage_minor,
            exclusive_claim: true,
        }
    }

    pub fn with_multiple_claims(mut self) -> Self {
        self.exclusive_claim = false;
        self
    }
}

/// How a shipment's acceptable band is specified at creation: by standard
/// zone (range comes from the compliance policy table) or as an explicit
/// range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdSpec {
    Zone(TemperatureZone),
    Explicit(TemperatureRange),
}

/// Creation parameters for a shipment. The owning identity is the
/// authenticated caller, never a payload field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentSpec {
    pub carrier: AccountId,
    pub product: String,
    pub origin: String,
    pub destination: String,
    pub thresholds: ThresholdSpec,
    pub insurance: Option<InsuranceTerms>,
}

/// A tracked unit of cargo with its configured band and lifecycle status.
///
/// Identity and threshold fields are fixed at creation; only `status`,
/// `compliant`, `violation_count`, and `completed_at` ever change, and each
/// only through its owning component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub owner: AccountId,
    pub carrier: AccountId,
    pub product: String,
    pub origin: String,
    pub destination: String,
    /// Present when the band came from a standard zone classification.
    pub zone: Option<TemperatureZone>,
    pub range: TemperatureRange,
    pub status: ShipmentStatus,
    pub compliant: bool,
    pub violation_count: u32,
    pub insurance: Option<InsuranceTerms>,
    pub created_at: LedgerHeight,
    pub completed_at: Option<LedgerHeight>,
}

impl Shipment {
    /// Configured coverage, zero when the shipment carries no insurance.
    pub fn coverage_minor(&self) -> u64 {
        self.insurance.map_or(0, |terms| terms.coverage_minor)
    }
}

/// One sensor reading in a shipment's append-only telemetry log.
/// Keyed by (shipment, seq); immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub shipment: ShipmentId,
    /// Per-shipment sequence number, contiguous from zero.
    pub seq: u64,
    pub temperature: Temperature,
    pub sensor: SensorId,
    /// Authenticated identity that submitted the reading.
    pub recorded_by: AccountId,
    pub location: String,
    pub recorded_at: LedgerHeight,
}

/// A recorded threshold breach. The breach fact is immutable; only the alert
/// overlay (`resolved_at`, `resolution_note`) may be written, once, by the
/// contract owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub shipment: ShipmentId,
    /// Per-shipment sequence number, contiguous from zero.
    pub seq: u64,
    /// Sequence number of the triggering reading in the same shipment's log.
    pub reading_seq: u64,
    pub temperature: Temperature,
    pub bound: BreachedBound,
    /// Distance beyond the breached bound, in tenths of a degree.
    pub deviation: u32,
    pub severity: Severity,
    pub sensor: SensorId,
    pub recorded_at: LedgerHeight,
    pub resolved_at: Option<LedgerHeight>,
    pub resolution_note: Option<String>,
}

impl Violation {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// An insurance payout request tied to a non-compliant shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    pub id: ClaimId,
    pub shipment: ShipmentId,
    pub claimant: AccountId,
    pub amount_minor: u64,
    pub status: ClaimStatus,
    /// Content hash of the off-ledger evidence bundle.
    pub evidence: EvidenceHash,
    pub filed_at: LedgerHeight,
    pub decided_at: Option<LedgerHeight>,
    pub settled_at: Option<LedgerHeight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insurance_terms_default_to_exclusive() {
        let terms = InsuranceTerms::coverage(10_000);
        assert!(terms.exclusive_claim);
        assert!(!terms.with_multiple_claims().exclusive_claim);
    }

    #[test]
    fn uninsured_shipment_has_zero_coverage() {
        let shipment = Shipment {
            id: ShipmentId(0),
            owner: AccountId::new("owner"),
            carrier: AccountId::new("carrier"),
            product: "vaccine".into(),
            origin: "plant-a".into(),
            destination: "clinic-b".into(),
            zone: None,
            range: TemperatureRange::new(Temperature(20), Temperature(80)),
            status: ShipmentStatus::Active,
            compliant: true,
            violation_count: 0,
            insurance: None,
            created_at: LedgerHeight(1),
            completed_at: None,
        };
        assert_eq!(shipment.coverage_minor(), 0);
    }

    #[test]
    fn records_round_trip_through_serde() {
        let reading = TemperatureReading {
            shipment: ShipmentId(3),
            seq: 2,
            temperature: Temperature(55),
            sensor: SensorId::new("probe-7"),
            recorded_by: AccountId::new("gateway"),
            location: "dock 4".into(),
            recorded_at: LedgerHeight(42),
        };
        let encoded = serde_json::to_string(&reading).unwrap();
        let decoded: TemperatureReading = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, reading);
    }
}
