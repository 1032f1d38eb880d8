//! Nexu checkout core.
//!
//! This crate implements the client-side cart and checkout engine for the
//! Nexu marketplace:
//!
//! - [`cart`] - durable cart store with change notifications
//! - [`regional`] - cascading province/regency/district/village resolver
//!   backed by an external geographic directory service
//! - [`catalog`] - static shipping courier and payment method catalogs
//! - [`flow`] - the address/shipping/payment/completion checkout wizard
//! - [`pricing`] - price breakdown calculator
//! - [`recommend`] - related-product suggestions for the cart page
//!
//! # Persistence
//!
//! The only persistence layer is client-local storage, abstracted behind
//! [`storage::ClientStorage`]. UI layers must never touch the storage medium
//! directly; a future server-side backend can be substituted behind the same
//! trait without changing callers.
//!
//! # Known limitation
//!
//! Completing a checkout produces an in-memory order snapshot and a display
//! order number only. No durable order record is created anywhere, and order
//! history is therefore always empty. See [`flow::order_history`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod pricing;
pub mod recommend;
pub mod regional;
pub mod storage;

pub use error::CheckoutError;
