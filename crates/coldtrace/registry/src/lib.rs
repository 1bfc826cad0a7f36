//! Identity & authorization registry.
//!
//! Tracks the contract owner fixed at deployment and the set of sensor
//! identities allowed to report readings. Every privileged operation in the
//! workspace gates on this registry; authorization state is mutated only by
//! the owner.

#![deny(unsafe_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use coldtrace_types::{AccountId, CallContext, SensorGrant, SensorId, TransitionError};

/// Owner identity plus the authorized-sensor set.
///
/// Revoking a sensor deletes its grant; there are no tombstones, so an
/// absent entry and a never-enrolled sensor are indistinguishable, both
/// unauthorized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorRegistry {
    owner: AccountId,
    grants: HashMap<SensorId, SensorGrant>,
}

impl SensorRegistry {
    /// Create a registry owned by the deploying identity.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            grants: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Enroll a sensor identity. Owner-only.
    pub fn authorize(
        &mut self,
        ctx: &CallContext,
        sensor: SensorId,
    ) -> Result<(), TransitionError> {
        self.require_owner(ctx, "authorize sensor")?;
        if self.grants.contains_key(&sensor) {
            return Err(TransitionError::AlreadyAuthorized(sensor));
        }

        info!(sensor = %sensor, granted_by = %ctx.caller, "sensor authorized");
        self.grants.insert(
            sensor,
            SensorGrant {
                granted_by: ctx.caller.clone(),
                granted_at: ctx.height,
            },
        );
        Ok(())
    }

    /// Remove a sensor's grant. Owner-only.
    pub fn revoke(&mut self, ctx: &CallContext, sensor: &SensorId) -> Result<(), TransitionError> {
        self.require_owner(ctx, "revoke sensor")?;
        if self.grants.remove(sensor).is_none() {
            return Err(TransitionError::SensorNotFound(sensor.clone()));
        }

        info!(sensor = %sensor, revoked_by = %ctx.caller, "sensor revoked");
        Ok(())
    }

    /// Pure lookup; unknown identities are unauthorized.
    pub fn is_authorized(&self, sensor: &SensorId) -> bool {
        self.grants.contains_key(sensor)
    }

    pub fn grant(&self, sensor: &SensorId) -> Option<&SensorGrant> {
        self.grants.get(sensor)
    }

    pub fn authorized_count(&self) -> usize {
        self.grants.len()
    }

    fn require_owner(&self, ctx: &CallContext, action: &str) -> Result<(), TransitionError> {
        if ctx.caller != self.owner {
            warn!(caller = %ctx.caller, action, "rejected: caller is not the contract owner");
            return Err(TransitionError::Unauthorized);
        }
        Ok(())
    }
}
