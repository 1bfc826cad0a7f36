//! Core type definitions shared across the Coldtrace workspace.
//!
//! This crate provides the identifiers, persisted record types, status
//! enumerations, and the closed transition error taxonomy. Nothing here
//! performs a state transition; the component crates do.

#![deny(unsafe_code)]

pub mod error;
pub mod evidence;
pub mod ids;
pub mod records;
pub mod status;
pub mod temperature;

// Re-export primary types at crate root for ergonomic use.
pub use error::TransitionError;
pub use evidence::EvidenceHash;
pub use ids::{AccountId, CallContext, ClaimId, LedgerHeight, SensorId, ShipmentId};
pub use records::{
    InsuranceClaim, InsuranceTerms, SensorGrant, Shipment, ShipmentSpec, TemperatureReading,
    ThresholdSpec, Violation,
};
pub use status::{BreachedBound, ClaimStatus, Severity, ShipmentStatus};
pub use temperature::{Temperature, TemperatureRange, TemperatureZone};
