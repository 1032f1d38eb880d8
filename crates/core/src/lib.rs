//! Nexu Core - Shared types library.
//!
//! This crate provides common types used across all Nexu components:
//! - `checkout` - Cart and checkout core
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no network
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and user roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
