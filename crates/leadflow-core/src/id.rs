//! Identifier validation.
//!
//! Records are keyed by UUIDs. Every caller-supplied identifier goes
//! through [`parse_id`] before any lookup so that a malformed value is
//! reported as [`LeadflowError::InvalidId`] rather than "not found".

use uuid::Uuid;

use crate::error::{LeadflowError, LeadflowResult};

/// Pure syntactic check; performs no existence lookup.
pub fn is_well_formed(id: &str) -> bool {
    Uuid::try_parse(id).is_ok()
}

/// Parse a caller-supplied identifier for the given entity.
pub fn parse_id(entity: &str, id: &str) -> LeadflowResult<Uuid> {
    Uuid::try_parse(id).map_err(|_| LeadflowError::InvalidId {
        entity: entity.into(),
        id: id.into(),
    })
}

/// Allocate a fresh, time-ordered identifier.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}
