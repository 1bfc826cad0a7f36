//! Insurance claim workflow.
//!
//! Claims are created against violated shipments and then move through
//! `Pending -> Approved -> Settled` or `Pending -> Rejected`. Records are
//! never deleted; terminal claims simply accept no further transitions.
//! Whether the claimant and amount are acceptable is decided at the
//! transition surface, which can see the shipment; this crate owns the claim
//! records and their lifecycle.

#![deny(unsafe_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use coldtrace_types::{
    CallContext, ClaimId, ClaimStatus, EvidenceHash, InsuranceClaim, ShipmentId, TransitionError,
};

/// Claim records plus the process-wide claim id sequence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClaimBook {
    claims: HashMap<ClaimId, InsuranceClaim>,
    by_shipment: HashMap<ShipmentId, Vec<ClaimId>>,
    next_claim: u64,
}

impl ClaimBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new claim in `Pending`. Preconditions (violated shipment,
    /// claimant standing, amount within coverage) are checked by the caller
    /// before this point.
    pub fn file(
        &mut self,
        ctx: &CallContext,
        shipment: ShipmentId,
        amount_minor: u64,
        evidence: EvidenceHash,
    ) -> ClaimId {
        let id = ClaimId(self.next_claim);
        self.next_claim += 1;

        info!(
            claim = %id,
            shipment = %shipment,
            claimant = %ctx.caller,
            amount_minor,
            "claim filed"
        );

        self.claims.insert(
            id,
            InsuranceClaim {
                id,
                shipment,
                claimant: ctx.caller.clone(),
                amount_minor,
                status: ClaimStatus::Pending,
                evidence,
                filed_at: ctx.height,
                decided_at: None,
                settled_at: None,
            },
        );
        self.by_shipment.entry(shipment).or_default().push(id);
        id
    }

    /// Approve a pending claim.
    pub fn approve(&mut self, ctx: &CallContext, id: ClaimId) -> Result<(), TransitionError> {
        self.decide(ctx, id, ClaimStatus::Approved)
    }

    /// Reject a pending claim. Terminal.
    pub fn reject(&mut self, ctx: &CallContext, id: ClaimId) -> Result<(), TransitionError> {
        self.decide(ctx, id, ClaimStatus::Rejected)
    }

    /// Pay out an approved claim. Terminal.
    pub fn settle(&mut self, ctx: &CallContext, id: ClaimId) -> Result<(), TransitionError> {
        let claim = self
            .claims
            .get_mut(&id)
            .ok_or(TransitionError::ClaimNotFound(id))?;

        match claim.status {
            ClaimStatus::Approved => {}
            ClaimStatus::Settled => return Err(TransitionError::AlreadySettled(id)),
            status => {
                warn!(claim = %id, status = %status, "rejected: settlement of an unapproved claim");
                return Err(TransitionError::InvalidClaimState {
                    id,
                    status,
                    requires: "an approved claim",
                });
            }
        }

        claim.status = ClaimStatus::Settled;
        claim.settled_at = Some(ctx.height);
        info!(claim = %id, shipment = %claim.shipment, "claim settled");
        Ok(())
    }

    fn decide(
        &mut self,
        ctx: &CallContext,
        id: ClaimId,
        decision: ClaimStatus,
    ) -> Result<(), TransitionError> {
        let claim = self
            .claims
            .get_mut(&id)
            .ok_or(TransitionError::ClaimNotFound(id))?;

        match claim.status {
            ClaimStatus::Pending => {}
            status if status.is_terminal() => return Err(TransitionError::AlreadySettled(id)),
            status => {
                return Err(TransitionError::InvalidClaimState {
                    id,
                    status,
                    requires: "a pending claim",
                })
            }
        }

        claim.status = decision;
        claim.decided_at = Some(ctx.height);
        info!(claim = %id, decision = %decision, "claim decided");
        Ok(())
    }

    // ── Read-only queries ───────────────────────────────────────────

    pub fn claim(&self, id: ClaimId) -> Option<&InsuranceClaim> {
        self.claims.get(&id)
    }

    /// Total claims ever filed; also the next id to be assigned.
    pub fn claim_count(&self) -> u64 {
        self.next_claim
    }

    /// All claims filed against a shipment, in filing order.
    pub fn claims_for_shipment(&self, shipment: ShipmentId) -> Vec<&InsuranceClaim> {
        self.by_shipment
            .get(&shipment)
            .map(|ids| ids.iter().filter_map(|id| self.claims.get(id)).collect())
            .unwrap_or_default()
    }

    /// The shipment's claim still awaiting decision or payout, if any.
    pub fn open_claim_for_shipment(&self, shipment: ShipmentId) -> Option<&InsuranceClaim> {
        self.claims_for_shipment(shipment)
            .into_iter()
            .find(|claim| claim.status.is_open())
    }
}
