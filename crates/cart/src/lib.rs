//! RocketShoes cart store library.
//!
//! Owns the canonical in-memory cart state, mirrors it to a pluggable
//! key-value storage slot on every successful mutation, and gates every
//! quantity increase through a remote stock check before committing.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - the state container; one writer by convention,
//!   consumers subscribe to published snapshots via a watch channel
//! - [`catalog`] - REST client for the remote stock/product endpoints
//! - [`storage`] - injected get/set-by-key persistence capability
//! - [`notify`] - typed user-facing notices; mutators never return errors
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocket_shoes_cart::catalog::HttpCatalog;
//! use rocket_shoes_cart::config::CartConfig;
//! use rocket_shoes_cart::notify::TracingNotifier;
//! use rocket_shoes_cart::storage::FileStorage;
//! use rocket_shoes_cart::store::CartStore;
//! use rocket_shoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::new(
//!     HttpCatalog::new(&config.catalog)?,
//!     FileStorage::new(&config.storage_dir),
//!     Arc::new(TracingNotifier),
//!     &config.storage_key,
//! );
//!
//! store.add_product(ProductId::new(1)).await;
//! let cart = store.cart();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod storage;
pub mod store;

pub use store::{CartStore, UpdateProductAmount};
