//! Pure scheduling-domain logic for the shiftboard workspace.
//!
//! Calendar grid generation, shift aggregation, staffing reconciliation,
//! and the entity/filter types every other crate shares. This crate has
//! no internal dependencies and performs no I/O; everything here is
//! synchronous and cheap enough to run once per render.

pub mod aggregate;
pub mod calendar;
pub mod filters;
pub mod roles;
pub mod shift;
pub mod staffing;
pub mod types;
