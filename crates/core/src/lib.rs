//! RocketShoes Core - Shared types library.
//!
//! This crate provides common types used across all RocketShoes components:
//! - `cart` - Cart store library (state, persistence, stock checks)
//! - `cli` - Command-line front end for driving the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
