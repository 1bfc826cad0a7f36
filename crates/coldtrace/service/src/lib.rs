//! The Coldtrace transition surface.
//!
//! [`ColdChainCore`] owns one instance of each component and exposes the
//! authoritative operation set the hosting substrate applies, one committed
//! transition at a time. Every operation takes a [`CallContext`] carrying the
//! authenticated caller and the commit height; every precondition chain is
//! evaluated in a fixed order with first-failure-wins semantics, and a failed
//! operation leaves all component state untouched.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use tracing::warn;

use coldtrace_claims::ClaimBook;
use coldtrace_compliance::CompliancePolicy;
use coldtrace_ledger::ShipmentLedger;
use coldtrace_registry::SensorRegistry;
use coldtrace_types::{
    AccountId, CallContext, ClaimId, EvidenceHash, InsuranceClaim, SensorId, Shipment, ShipmentId,
    ShipmentSpec, ShipmentStatus, Temperature, TemperatureReading, TransitionError, Violation,
};

/// The application state machine: authorization registry, shipment ledger,
/// claim book, and the compliance policy they share.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColdChainCore {
    registry: SensorRegistry,
    ledger: ShipmentLedger,
    claims: ClaimBook,
    policy: CompliancePolicy,
}

impl ColdChainCore {
    /// Deploy with the default compliance policy. The deploying identity
    /// becomes the contract owner.
    pub fn new(owner: AccountId) -> Self {
        Self::with_policy(owner, CompliancePolicy::default())
    }

    pub fn with_policy(owner: AccountId, policy: CompliancePolicy) -> Self {
        Self {
            registry: SensorRegistry::new(owner),
            ledger: ShipmentLedger::new(),
            claims: ClaimBook::new(),
            policy,
        }
    }

    pub fn owner(&self) -> &AccountId {
        self.registry.owner()
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    // ── Identity & authorization ────────────────────────────────────

    /// Enroll a sensor identity. Owner-only.
    pub fn authorize_sensor(
        &mut self,
        ctx: &CallContext,
        sensor: SensorId,
    ) -> Result<(), TransitionError> {
        self.registry.authorize(ctx, sensor)
    }

    /// Remove a sensor's authorization. Owner-only.
    pub fn revoke_sensor(
        &mut self,
        ctx: &CallContext,
        sensor: &SensorId,
    ) -> Result<(), TransitionError> {
        self.registry.revoke(ctx, sensor)
    }

    // ── Shipments and telemetry ─────────────────────────────────────

    /// Create a shipment owned by the caller.
    pub fn create_shipment(
        &mut self,
        ctx: &CallContext,
        spec: ShipmentSpec,
    ) -> Result<ShipmentId, TransitionError> {
        self.ledger.create_shipment(ctx, spec, &self.policy)
    }

    /// Close out an active shipment. Owner or carrier only.
    pub fn complete_shipment(
        &mut self,
        ctx: &CallContext,
        shipment: ShipmentId,
    ) -> Result<(), TransitionError> {
        self.ledger.complete_shipment(ctx, shipment)
    }

    /// Submit a sensor reading for a shipment.
    ///
    /// Preconditions, first failure wins: the shipment exists, the sensor is
    /// authorized, the shipment is still in transit. An accepted reading is
    /// appended unconditionally and evaluated synchronously; a breach is
    /// recorded as a violation but never rejects the reading.
    pub fn record_temperature(
        &mut self,
        ctx: &CallContext,
        shipment: ShipmentId,
        temperature: Temperature,
        sensor: SensorId,
        location: String,
    ) -> Result<u64, TransitionError> {
        if self.ledger.shipment(shipment).is_none() {
            return Err(TransitionError::ShipmentNotFound(shipment));
        }
        if !self.registry.is_authorized(&sensor) {
            warn!(shipment = %shipment, sensor = %sensor, "rejected: reading from unauthorized sensor");
            return Err(TransitionError::Unauthorized);
        }

        let recorded =
            self.ledger
                .record_reading(ctx, shipment, temperature, sensor, location, &self.policy)?;
        Ok(recorded.seq)
    }

    /// Close a violation's alert with an optional note. Owner-only; the
    /// breach fact and the shipment's non-compliance are untouched.
    pub fn resolve_violation(
        &mut self,
        ctx: &CallContext,
        shipment: ShipmentId,
        seq: u64,
        note: Option<String>,
    ) -> Result<(), TransitionError> {
        self.require_owner(ctx, "resolve violation")?;
        self.ledger.resolve_violation(ctx, shipment, seq, note)
    }

    // ── Insurance claims ────────────────────────────────────────────

    /// File a claim against a violated shipment.
    ///
    /// Preconditions, first failure wins: the shipment exists, the caller is
    /// its owner or carrier, the shipment is in the violated state, and the
    /// amount is within configured coverage (an uninsured shipment has
    /// coverage zero). Under exclusive terms the shipment moves to `Claimed`,
    /// shutting the filing window behind the first claim.
    pub fn file_insurance_claim(
        &mut self,
        ctx: &CallContext,
        shipment: ShipmentId,
        amount_minor: u64,
        evidence: EvidenceHash,
    ) -> Result<ClaimId, TransitionError> {
        let record = self
            .ledger
            .shipment(shipment)
            .ok_or(TransitionError::ShipmentNotFound(shipment))?;

        if ctx.caller != record.owner && ctx.caller != record.carrier {
            warn!(shipment = %shipment, caller = %ctx.caller, "rejected: claim by third party");
            return Err(TransitionError::Unauthorized);
        }
        if record.status != ShipmentStatus::Violated {
            return Err(TransitionError::InvalidShipmentState {
                id: shipment,
                status: record.status,
                requires: "a violated shipment",
            });
        }
        let coverage_minor = record.coverage_minor();
        if record.insurance.is_none() || amount_minor > coverage_minor {
            return Err(TransitionError::InvalidAmount {
                requested_minor: amount_minor,
                coverage_minor,
            });
        }
        let exclusive = record
            .insurance
            .map_or(true, |terms| terms.exclusive_claim);

        if exclusive {
            self.ledger.mark_claimed(shipment)?;
        }
        Ok(self.claims.file(ctx, shipment, amount_minor, evidence))
    }

    /// Approve a pending claim. Owner-only.
    pub fn approve_claim(&mut self, ctx: &CallContext, claim: ClaimId) -> Result<(), TransitionError> {
        self.require_owner(ctx, "approve claim")?;
        self.claims.approve(ctx, claim)
    }

    /// Reject a pending claim. Owner-only; terminal.
    pub fn reject_claim(&mut self, ctx: &CallContext, claim: ClaimId) -> Result<(), TransitionError> {
        self.require_owner(ctx, "reject claim")?;
        self.claims.reject(ctx, claim)
    }

    /// Pay out an approved claim. Owner-only; terminal.
    pub fn settle_claim(&mut self, ctx: &CallContext, claim: ClaimId) -> Result<(), TransitionError> {
        self.require_owner(ctx, "settle claim")?;
        self.claims.settle(ctx, claim)
    }

    // ── Read-only queries ───────────────────────────────────────────

    pub fn shipment(&self, id: ShipmentId) -> Option<&Shipment> {
        self.ledger.shipment(id)
    }

    pub fn reading(&self, id: ShipmentId, seq: u64) -> Option<&TemperatureReading> {
        self.ledger.reading(id, seq)
    }

    pub fn readings(&self, id: ShipmentId) -> &[TemperatureReading] {
        self.ledger.readings(id)
    }

    pub fn violation(&self, id: ShipmentId, seq: u64) -> Option<&Violation> {
        self.ledger.violation(id, seq)
    }

    pub fn violations(&self, id: ShipmentId) -> &[Violation] {
        self.ledger.violations(id)
    }

    pub fn claim(&self, id: ClaimId) -> Option<&InsuranceClaim> {
        self.claims.claim(id)
    }

    pub fn claims_for_shipment(&self, id: ShipmentId) -> Vec<&InsuranceClaim> {
        self.claims.claims_for_shipment(id)
    }

    pub fn open_claim_for_shipment(&self, id: ShipmentId) -> Option<&InsuranceClaim> {
        self.claims.open_claim_for_shipment(id)
    }

    pub fn shipment_count(&self) -> u64 {
        self.ledger.shipment_count()
    }

    pub fn reading_count(&self, id: ShipmentId) -> u64 {
        self.ledger.reading_count(id)
    }

    pub fn violation_count(&self, id: ShipmentId) -> u64 {
        self.ledger.violation_count(id)
    }

    pub fn claim_count(&self) -> u64 {
        self.claims.claim_count()
    }

    pub fn is_compliant(&self, id: ShipmentId) -> Option<bool> {
        self.ledger.is_compliant(id)
    }

    pub fn is_sensor_authorized(&self, sensor: &SensorId) -> bool {
        self.registry.is_authorized(sensor)
    }

    pub fn shipments_for(&self, owner: &AccountId) -> Vec<&Shipment> {
        self.ledger.shipments_for(owner)
    }

    fn require_owner(&self, ctx: &CallContext, action: &str) -> Result<(), TransitionError> {
        if ctx.caller != *self.registry.owner() {
            warn!(caller = %ctx.caller, action, "rejected: caller is not the contract owner");
            return Err(TransitionError::Unauthorized);
        }
        Ok(())
    }
}
