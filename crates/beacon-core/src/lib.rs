//! # beacon-core
//!
//! Core types, ID generation, and error types for Beacon.
//!
//! This crate provides the foundational types shared across all Beacon crates:
//! - Entity structs for stored records (citations, drift alerts, settings, competitors)
//! - Engine, trend, and severity enums, plus the alert lifecycle state machine
//! - ID prefix constants
//! - Derived report types (engine shares, citation gaps)
//! - The citation store gateway contract and its cancellable insert subscriptions
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod gateway;
pub mod identity;
pub mod ids;
pub mod reports;
pub mod subscription;
