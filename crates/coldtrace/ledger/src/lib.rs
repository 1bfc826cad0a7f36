//! Shipment ledger: record creation, the lifecycle state machine, and the
//! per-shipment append-only reading and violation logs.
//!
//! The ledger owns every `Shipment` exclusively; readings, violations, and
//! claims reference shipments by id only. Logs are nested append-only
//! sequences (outer key = shipment id, inner = ordered `Vec`), so
//! per-shipment sequence numbers are contiguous from zero by construction.

#![deny(unsafe_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use coldtrace_compliance::{evaluate, CompliancePolicy};
use coldtrace_types::{
    AccountId, CallContext, SensorId, Shipment, ShipmentId, ShipmentSpec, ShipmentStatus,
    Temperature, TemperatureRange, TemperatureReading, TemperatureZone, ThresholdSpec,
    TransitionError, Violation,
};

/// Result of an accepted reading: its sequence number, and the violation the
/// reading produced, if it breached the shipment's band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedReading {
    pub seq: u64,
    pub violation: Option<Violation>,
}

/// Shipment records plus their telemetry logs and the process-wide shipment
/// id sequence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShipmentLedger {
    shipments: HashMap<ShipmentId, Shipment>,
    readings: HashMap<ShipmentId, Vec<TemperatureReading>>,
    violations: HashMap<ShipmentId, Vec<Violation>>,
    next_shipment: u64,
}

impl ShipmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shipment owned by the caller. Zone-classified shipments take
    /// their range from the policy table; explicit ranges must satisfy
    /// `min < max`.
    pub fn create_shipment(
        &mut self,
        ctx: &CallContext,
        spec: ShipmentSpec,
        policy: &CompliancePolicy,
    ) -> Result<ShipmentId, TransitionError> {
        let (zone, range) = resolve_thresholds(spec.thresholds, policy);
        if !range.is_valid() {
            return Err(TransitionError::InvalidThreshold {
                min: range.min,
                max: range.max,
            });
        }

        let id = ShipmentId(self.next_shipment);
        self.next_shipment += 1;

        info!(
            shipment = %id,
            owner = %ctx.caller,
            carrier = %spec.carrier,
            product = %spec.product,
            range = %range,
            "shipment created"
        );

        self.shipments.insert(
            id,
            Shipment {
                id,
                owner: ctx.caller.clone(),
                carrier: spec.carrier,
                product: spec.product,
                origin: spec.origin,
                destination: spec.destination,
                zone,
                range,
                status: ShipmentStatus::Active,
                compliant: true,
                violation_count: 0,
                insurance: spec.insurance,
                created_at: ctx.height,
                completed_at: None,
            },
        );
        Ok(id)
    }

    /// Close out an active shipment. Terminal: no further readings or claims
    /// are accepted afterward.
    pub fn complete_shipment(
        &mut self,
        ctx: &CallContext,
        id: ShipmentId,
    ) -> Result<(), TransitionError> {
        let shipment = self
            .shipments
            .get_mut(&id)
            .ok_or(TransitionError::ShipmentNotFound(id))?;

        if ctx.caller != shipment.owner && ctx.caller != shipment.carrier {
            warn!(shipment = %id, caller = %ctx.caller, "rejected: completion by third party");
            return Err(TransitionError::Unauthorized);
        }
        if shipment.status != ShipmentStatus::Active {
            return Err(TransitionError::InvalidShipmentState {
                id,
                status: shipment.status,
                requires: "an active shipment",
            });
        }

        shipment.status = ShipmentStatus::Completed;
        shipment.completed_at = Some(ctx.height);
        info!(shipment = %id, height = %ctx.height, "shipment completed");
        Ok(())
    }

    /// Append a reading and evaluate it against the shipment's band.
    ///
    /// Sensor authorization is the registry's concern and is checked by the
    /// transition surface before this call. The reading is persisted
    /// unconditionally once accepted; a breach additionally appends a
    /// violation, drops the compliance flag, and marks the shipment
    /// `Violated`, but never rejects or rolls back the reading itself.
    pub fn record_reading(
        &mut self,
        ctx: &CallContext,
        id: ShipmentId,
        temperature: Temperature,
        sensor: SensorId,
        location: String,
        policy: &CompliancePolicy,
    ) -> Result<RecordedReading, TransitionError> {
        let shipment = self
            .shipments
            .get_mut(&id)
            .ok_or(TransitionError::ShipmentNotFound(id))?;

        if !shipment.status.in_transit() {
            return Err(TransitionError::InvalidShipmentState {
                id,
                status: shipment.status,
                requires: "an in-transit shipment",
            });
        }

        let log = self.readings.entry(id).or_default();
        let seq = log.len() as u64;
        log.push(TemperatureReading {
            shipment: id,
            seq,
            temperature,
            sensor: sensor.clone(),
            recorded_by: ctx.caller.clone(),
            location,
            recorded_at: ctx.height,
        });

        let bands = policy.bands_for(shipment.zone);
        let Some(breach) = evaluate(temperature, shipment.range, bands) else {
            debug!(shipment = %id, seq, temperature = %temperature, "reading in band");
            return Ok(RecordedReading {
                seq,
                violation: None,
            });
        };

        let violation_log = self.violations.entry(id).or_default();
        let violation = Violation {
            shipment: id,
            seq: violation_log.len() as u64,
            reading_seq: seq,
            temperature,
            bound: breach.bound,
            deviation: breach.deviation,
            severity: breach.severity,
            sensor,
            recorded_at: ctx.height,
            resolved_at: None,
            resolution_note: None,
        };
        violation_log.push(violation.clone());

        shipment.compliant = false;
        shipment.violation_count += 1;
        shipment.status = ShipmentStatus::Violated;

        warn!(
            shipment = %id,
            violation = violation.seq,
            temperature = %temperature,
            bound = %violation.bound,
            deviation = violation.deviation,
            severity = %violation.severity,
            "threshold violation recorded"
        );

        Ok(RecordedReading {
            seq,
            violation: Some(violation),
        })
    }

    /// Mark a violation's alert resolved, with an optional note. The breach
    /// fact stays in the log and the shipment stays non-compliant; this only
    /// closes the alert. Owner gating happens at the transition surface.
    pub fn resolve_violation(
        &mut self,
        ctx: &CallContext,
        id: ShipmentId,
        seq: u64,
        note: Option<String>,
    ) -> Result<(), TransitionError> {
        if !self.shipments.contains_key(&id) {
            return Err(TransitionError::ShipmentNotFound(id));
        }

        let violation = self
            .violations
            .get_mut(&id)
            .and_then(|log| log.get_mut(seq as usize))
            .ok_or(TransitionError::ViolationNotFound { shipment: id, seq })?;

        if violation.is_resolved() {
            return Err(TransitionError::AlreadyResolved { shipment: id, seq });
        }

        violation.resolved_at = Some(ctx.height);
        violation.resolution_note = note;
        info!(shipment = %id, violation = seq, "violation alert resolved");
        Ok(())
    }

    /// Move a violated shipment to `Claimed`. Invoked by the claim workflow
    /// when the shipment's insurance terms demand an exclusive claim.
    pub fn mark_claimed(&mut self, id: ShipmentId) -> Result<(), TransitionError> {
        let shipment = self
            .shipments
            .get_mut(&id)
            .ok_or(TransitionError::ShipmentNotFound(id))?;

        if shipment.status != ShipmentStatus::Violated {
            return Err(TransitionError::InvalidShipmentState {
                id,
                status: shipment.status,
                requires: "a violated shipment",
            });
        }

        shipment.status = ShipmentStatus::Claimed;
        info!(shipment = %id, "shipment claimed");
        Ok(())
    }

    // ── Read-only queries ───────────────────────────────────────────

    pub fn shipment(&self, id: ShipmentId) -> Option<&Shipment> {
        self.shipments.get(&id)
    }

    pub fn reading(&self, id: ShipmentId, seq: u64) -> Option<&TemperatureReading> {
        self.readings.get(&id).and_then(|log| log.get(seq as usize))
    }

    pub fn readings(&self, id: ShipmentId) -> &[TemperatureReading] {
        self.readings.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn violation(&self, id: ShipmentId, seq: u64) -> Option<&Violation> {
        self.violations
            .get(&id)
            .and_then(|log| log.get(seq as usize))
    }

    pub fn violations(&self, id: ShipmentId) -> &[Violation] {
        self.violations.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Total shipments ever created; also the next id to be assigned.
    pub fn shipment_count(&self) -> u64 {
        self.next_shipment
    }

    pub fn reading_count(&self, id: ShipmentId) -> u64 {
        self.readings.get(&id).map_or(0, |log| log.len() as u64)
    }

    pub fn violation_count(&self, id: ShipmentId) -> u64 {
        self.violations.get(&id).map_or(0, |log| log.len() as u64)
    }

    /// Compliance flag for a shipment, `None` when unknown.
    pub fn is_compliant(&self, id: ShipmentId) -> Option<bool> {
        self.shipments.get(&id).map(|shipment| shipment.compliant)
    }

    /// All shipments owned by an identity, in creation order.
    pub fn shipments_for(&self, owner: &AccountId) -> Vec<&Shipment> {
        let mut owned: Vec<_> = self
            .shipments
            .values()
            .filter(|shipment| &shipment.owner == owner)
            .collect();
        owned.sort_by_key(|shipment| shipment.id);
        owned
    }
}

fn resolve_thresholds(
    spec: ThresholdSpec,
    policy: &CompliancePolicy,
) -> (Option<TemperatureZone>, TemperatureRange) {
    match spec {
        ThresholdSpec::Zone(zone) => (Some(zone), policy.zone(zone).range),
        ThresholdSpec::Explicit(range) => (None, range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coldtrace_types::{BreachedBound, InsuranceTerms, LedgerHeight, Severity};
    use proptest::prelude::*;

    fn ctx(caller: &str, height: u64) -> CallContext {
        CallContext::new(AccountId::new(caller), LedgerHeight(height))
    }

    fn refrigerated_spec() -> ShipmentSpec {
        ShipmentSpec {
            carrier: AccountId::new("carrier"),
            product: "insulin".into(),
            origin: "plant-a".into(),
            destination: "clinic-b".into(),
            thresholds: ThresholdSpec::Explicit(TemperatureRange::new(
                Temperature(20),
                Temperature(80),
            )),
            insurance: Some(InsuranceTerms::coverage(50_000)),
        }
    }

    fn ledger_with_shipment() -> (ShipmentLedger, ShipmentId, CompliancePolicy) {
        let policy = CompliancePolicy::default();
        let mut ledger = ShipmentLedger::new();
        let id = ledger
            .create_shipment(&ctx("owner", 1), refrigerated_spec(), &policy)
            .unwrap();
        (ledger, id, policy)
    }

    #[test]
    fn creation_assigns_contiguous_ids() {
        let policy = CompliancePolicy::default();
        let mut ledger = ShipmentLedger::new();

        let first = ledger
            .create_shipment(&ctx("owner", 1), refrigerated_spec(), &policy)
            .unwrap();
        let second = ledger
            .create_shipment(&ctx("owner", 2), refrigerated_spec(), &policy)
            .unwrap();

        assert_eq!(first, ShipmentId(0));
        assert_eq!(second, ShipmentId(1));
        assert_eq!(ledger.shipment_count(), 2);

        let shipment = ledger.shipment(first).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Active);
        assert!(shipment.compliant);
        assert_eq!(shipment.created_at, LedgerHeight(1));
    }

    #[test]
    fn degenerate_thresholds_are_rejected() {
        let policy = CompliancePolicy::default();
        let mut ledger = ShipmentLedger::new();
        let spec = ShipmentSpec {
            thresholds: ThresholdSpec::Explicit(TemperatureRange::new(
                Temperature(80),
                Temperature(20),
            )),
            ..refrigerated_spec()
        };

        let err = ledger
            .create_shipment(&ctx("owner", 1), spec, &policy)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidThreshold {
                min: Temperature(80),
                max: Temperature(20),
            }
        );
        // A rejected creation burns nothing.
        assert_eq!(ledger.shipment_count(), 0);
    }

    #[test]
    fn zone_spec_takes_range_from_policy() {
        let policy = CompliancePolicy::default();
        let mut ledger = ShipmentLedger::new();
        let spec = ShipmentSpec {
            thresholds: ThresholdSpec::Zone(TemperatureZone::Frozen),
            ..refrigerated_spec()
        };

        let id = ledger
            .create_shipment(&ctx("owner", 1), spec, &policy)
            .unwrap();
        let shipment = ledger.shipment(id).unwrap();
        assert_eq!(shipment.zone, Some(TemperatureZone::Frozen));
        assert_eq!(shipment.range, policy.frozen.range);
    }

    #[test]
    fn in_band_reading_keeps_shipment_active() {
        let (mut ledger, id, policy) = ledger_with_shipment();

        let recorded = ledger
            .record_reading(
                &ctx("gateway", 5),
                id,
                Temperature(50),
                SensorId::new("probe-1"),
                "dock 4".into(),
                &policy,
            )
            .unwrap();

        assert_eq!(recorded.seq, 0);
        assert!(recorded.violation.is_none());

        let shipment = ledger.shipment(id).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Active);
        assert!(shipment.compliant);
        assert_eq!(ledger.reading_count(id), 1);
        assert_eq!(ledger.violation_count(id), 0);

        let reading = ledger.reading(id, 0).unwrap();
        assert_eq!(reading.temperature, Temperature(50));
        assert_eq!(reading.recorded_by, AccountId::new("gateway"));
        assert_eq!(reading.recorded_at, LedgerHeight(5));
    }

    #[test]
    fn breach_records_violation_and_flips_status() {
        let (mut ledger, id, policy) = ledger_with_shipment();

        let recorded = ledger
            .record_reading(
                &ctx("gateway", 6),
                id,
                Temperature(90),
                SensorId::new("probe-1"),
                "truck 12".into(),
                &policy,
            )
            .unwrap();

        let violation = recorded.violation.expect("reading breached the band");
        assert_eq!(violation.seq, 0);
        assert_eq!(violation.reading_seq, 0);
        assert_eq!(violation.bound, BreachedBound::Above);
        assert_eq!(violation.deviation, 10);
        assert_eq!(violation.severity, Severity::Minor);

        let shipment = ledger.shipment(id).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Violated);
        assert!(!shipment.compliant);
        assert_eq!(shipment.violation_count, 1);

        // The triggering reading was persisted, not rolled back.
        assert_eq!(ledger.reading_count(id), 1);
        assert_eq!(ledger.violation(id, 0), Some(&violation));
    }

    #[test]
    fn violated_shipments_keep_accepting_readings() {
        let (mut ledger, id, policy) = ledger_with_shipment();
        let probe = SensorId::new("probe-1");

        ledger
            .record_reading(&ctx("gw", 6), id, Temperature(90), probe.clone(), "a".into(), &policy)
            .unwrap();
        let recorded = ledger
            .record_reading(&ctx("gw", 7), id, Temperature(140), probe, "b".into(), &policy)
            .unwrap();

        assert_eq!(recorded.seq, 1);
        let violation = recorded.violation.unwrap();
        assert_eq!(violation.seq, 1);
        assert_eq!(violation.severity, Severity::Critical);
        assert_eq!(ledger.shipment(id).unwrap().violation_count, 2);
    }

    #[test]
    fn compliance_never_returns_once_lost() {
        let (mut ledger, id, policy) = ledger_with_shipment();
        let probe = SensorId::new("probe-1");

        ledger
            .record_reading(&ctx("gw", 6), id, Temperature(90), probe.clone(), "a".into(), &policy)
            .unwrap();
        ledger
            .record_reading(&ctx("gw", 7), id, Temperature(50), probe, "b".into(), &policy)
            .unwrap();

        let shipment = ledger.shipment(id).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Violated);
        assert!(!shipment.compliant);
    }

    #[test]
    fn readings_on_unknown_or_terminal_shipments_are_rejected() {
        let (mut ledger, id, policy) = ledger_with_shipment();
        let probe = SensorId::new("probe-1");

        let err = ledger
            .record_reading(
                &ctx("gw", 5),
                ShipmentId(99),
                Temperature(50),
                probe.clone(),
                "x".into(),
                &policy,
            )
            .unwrap_err();
        assert_eq!(err, TransitionError::ShipmentNotFound(ShipmentId(99)));

        ledger.complete_shipment(&ctx("owner", 8), id).unwrap();
        let err = ledger
            .record_reading(&ctx("gw", 9), id, Temperature(50), probe, "x".into(), &policy)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidShipmentState {
                id,
                status: ShipmentStatus::Completed,
                requires: "an in-transit shipment",
            }
        );
        assert_eq!(ledger.reading_count(id), 0);
    }

    #[test]
    fn completion_is_gated_and_terminal() {
        let (mut ledger, id, _) = ledger_with_shipment();

        let err = ledger
            .complete_shipment(&ctx("mallory", 8), id)
            .unwrap_err();
        assert_eq!(err, TransitionError::Unauthorized);

        // The carrier may complete, not only the owner.
        ledger.complete_shipment(&ctx("carrier", 9), id).unwrap();
        let shipment = ledger.shipment(id).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Completed);
        assert_eq!(shipment.completed_at, Some(LedgerHeight(9)));

        let err = ledger.complete_shipment(&ctx("owner", 10), id).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidShipmentState {
                id,
                status: ShipmentStatus::Completed,
                requires: "an active shipment",
            }
        );
    }

    #[test]
    fn violated_shipments_cannot_be_completed() {
        let (mut ledger, id, policy) = ledger_with_shipment();
        ledger
            .record_reading(
                &ctx("gw", 6),
                id,
                Temperature(90),
                SensorId::new("probe-1"),
                "a".into(),
                &policy,
            )
            .unwrap();

        let err = ledger.complete_shipment(&ctx("owner", 7), id).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidShipmentState {
                id,
                status: ShipmentStatus::Violated,
                requires: "an active shipment",
            }
        );
    }

    #[test]
    fn alert_resolution_keeps_the_breach_fact() {
        let (mut ledger, id, policy) = ledger_with_shipment();
        ledger
            .record_reading(
                &ctx("gw", 6),
                id,
                Temperature(90),
                SensorId::new("probe-1"),
                "a".into(),
                &policy,
            )
            .unwrap();

        ledger
            .resolve_violation(&ctx("owner", 12), id, 0, Some("reefer unit swapped".into()))
            .unwrap();

        let violation = ledger.violation(id, 0).unwrap();
        assert!(violation.is_resolved());
        assert_eq!(violation.resolved_at, Some(LedgerHeight(12)));
        assert_eq!(
            violation.resolution_note.as_deref(),
            Some("reefer unit swapped")
        );
        // Resolution closes the alert only; compliance stays lost.
        assert_eq!(ledger.is_compliant(id), Some(false));
        assert_eq!(ledger.shipment(id).unwrap().status, ShipmentStatus::Violated);

        let err = ledger
            .resolve_violation(&ctx("owner", 13), id, 0, None)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::AlreadyResolved {
                shipment: id,
                seq: 0
            }
        );

        let err = ledger
            .resolve_violation(&ctx("owner", 13), id, 7, None)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::ViolationNotFound {
                shipment: id,
                seq: 7
            }
        );
    }

    #[test]
    fn mark_claimed_requires_a_violated_shipment() {
        let (mut ledger, id, policy) = ledger_with_shipment();

        let err = ledger.mark_claimed(id).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidShipmentState {
                id,
                status: ShipmentStatus::Active,
                requires: "a violated shipment",
            }
        );

        ledger
            .record_reading(
                &ctx("gw", 6),
                id,
                Temperature(90),
                SensorId::new("probe-1"),
                "a".into(),
                &policy,
            )
            .unwrap();
        ledger.mark_claimed(id).unwrap();
        assert_eq!(ledger.shipment(id).unwrap().status, ShipmentStatus::Claimed);
    }

    #[test]
    fn queries_return_none_or_empty_for_unknown_ids() {
        let ledger = ShipmentLedger::new();
        assert!(ledger.shipment(ShipmentId(0)).is_none());
        assert!(ledger.reading(ShipmentId(0), 0).is_none());
        assert!(ledger.violation(ShipmentId(0), 0).is_none());
        assert!(ledger.readings(ShipmentId(0)).is_empty());
        assert!(ledger.violations(ShipmentId(0)).is_empty());
        assert_eq!(ledger.reading_count(ShipmentId(0)), 0);
        assert!(ledger.is_compliant(ShipmentId(0)).is_none());
    }

    #[test]
    fn shipments_for_lists_owned_in_creation_order() {
        let policy = CompliancePolicy::default();
        let mut ledger = ShipmentLedger::new();
        ledger
            .create_shipment(&ctx("alice", 1), refrigerated_spec(), &policy)
            .unwrap();
        ledger
            .create_shipment(&ctx("bob", 2), refrigerated_spec(), &policy)
            .unwrap();
        ledger
            .create_shipment(&ctx("alice", 3), refrigerated_spec(), &policy)
            .unwrap();

        let owned = ledger.shipments_for(&AccountId::new("alice"));
        let ids: Vec<_> = owned.iter().map(|shipment| shipment.id).collect();
        assert_eq!(ids, vec![ShipmentId(0), ShipmentId(2)]);
    }

    #[test]
    fn snapshot_round_trips_through_serde() {
        let (mut ledger, id, policy) = ledger_with_shipment();
        ledger
            .record_reading(
                &ctx("gw", 6),
                id,
                Temperature(90),
                SensorId::new("probe-1"),
                "a".into(),
                &policy,
            )
            .unwrap();

        let encoded = serde_json::to_string(&ledger).unwrap();
        let restored: ShipmentLedger = serde_json::from_str(&encoded).unwrap();
        assert_eq!(restored.shipment(id), ledger.shipment(id));
        assert_eq!(restored.readings(id), ledger.readings(id));
        assert_eq!(restored.violations(id), ledger.violations(id));
        assert_eq!(restored.shipment_count(), ledger.shipment_count());
    }

    proptest! {
        /// Interleaving readings across shipments never perturbs any single
        /// shipment's sequence numbering: each log stays contiguous from
        /// zero with one entry per accepted reading.
        #[test]
        fn sequence_numbers_stay_contiguous(schedule in proptest::collection::vec(0usize..3, 0..40)) {
            let policy = CompliancePolicy::default();
            let mut ledger = ShipmentLedger::new();
            let ids: Vec<_> = (0..3u64)
                .map(|i| {
                    ledger
                        .create_shipment(&ctx("owner", i), refrigerated_spec(), &policy)
                        .unwrap()
                })
                .collect();

            for (step, pick) in schedule.iter().enumerate() {
                ledger
                    .record_reading(
                        &ctx("gw", 10 + step as u64),
                        ids[*pick],
                        Temperature(50),
                        SensorId::new("probe-1"),
                        "en route".into(),
                        &policy,
                    )
                    .unwrap();
            }

            for id in ids {
                let log = ledger.readings(id);
                for (index, reading) in log.iter().enumerate() {
                    prop_assert_eq!(reading.seq, index as u64);
                    prop_assert_eq!(reading.shipment, id);
                }
                prop_assert_eq!(ledger.reading_count(id), log.len() as u64);
            }
        }

        /// Once any reading breaches the band, the shipment never reports
        /// compliant again, whatever readings follow.
        #[test]
        fn non_compliance_is_monotone(temps in proptest::collection::vec(-100i32..200, 1..30)) {
            let policy = CompliancePolicy::default();
            let mut ledger = ShipmentLedger::new();
            let id = ledger
                .create_shipment(&ctx("owner", 1), refrigerated_spec(), &policy)
                .unwrap();

            let range = TemperatureRange::new(Temperature(20), Temperature(80));
            let mut breached = false;
            for (step, temp) in temps.iter().enumerate() {
                breached |= !range.contains(Temperature(*temp));
                ledger
                    .record_reading(
                        &ctx("gw", 10 + step as u64),
                        id,
                        Temperature(*temp),
                        SensorId::new("probe-1"),
                        "en route".into(),
                        &policy,
                    )
                    .unwrap();
                prop_assert_eq!(ledger.is_compliant(id), Some(!breached));
            }

            let shipment = ledger.shipment(id).unwrap();
            prop_assert_eq!(shipment.violation_count as usize, ledger.violations(id).len());
            if breached {
                prop_assert_eq!(shipment.status, ShipmentStatus::Violated);
            } else {
                prop_assert_eq!(shipment.status, ShipmentStatus::Active);
            }
        }
    }
}
