use thiserror::Error;

use crate::ids::{ClaimId, SensorId, ShipmentId};
use crate::status::{ClaimStatus, ShipmentStatus};
use crate::temperature::Temperature;

/// The closed set of precondition failures a transition can report.
///
/// Every failure is deterministic and leaves state untouched: resubmitting
/// the same operation against the same state fails the same way. There is no
/// retry policy and no silent recovery; the specific variant is the caller's
/// whole diagnosis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("{0} not found")]
    ShipmentNotFound(ShipmentId),

    #[error("{0} not found")]
    ClaimNotFound(ClaimId),

    #[error("sensor {0} has no authorization entry")]
    SensorNotFound(SensorId),

    #[error("violation {seq} of {shipment} not found")]
    ViolationNotFound { shipment: ShipmentId, seq: u64 },

    #[error("{id} is {status}, operation requires {requires}")]
    InvalidShipmentState {
        id: ShipmentId,
        status: ShipmentStatus,
        requires: &'static str,
    },

    #[error("{id} is {status}, operation requires {requires}")]
    InvalidClaimState {
        id: ClaimId,
        status: ClaimStatus,
        requires: &'static str,
    },

    #[error("invalid threshold range: min {min} must be below max {max}")]
    InvalidThreshold { min: Temperature, max: Temperature },

    #[error("claim amount {requested_minor} exceeds configured coverage {coverage_minor}")]
    InvalidAmount {
        requested_minor: u64,
        coverage_minor: u64,
    },

    #[error("sensor {0} is already authorized")]
    AlreadyAuthorized(SensorId),

    #[error("violation {seq} of {shipment} is already resolved")]
    AlreadyResolved { shipment: ShipmentId, seq: u64 },

    #[error("{0} already reached a terminal status")]
    AlreadySettled(ClaimId),
}
