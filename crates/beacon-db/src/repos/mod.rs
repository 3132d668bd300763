//! Repository modules implementing store operations for every Beacon entity.
//!
//! Each module adds methods to `BeaconStore` via `impl BeaconStore` blocks.
//! Every statement is scoped by the caller's `user_id`.

pub mod alert;
pub mod citation;
pub mod competitor;
pub mod settings;
