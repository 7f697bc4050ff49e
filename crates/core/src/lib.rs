//! LARQ Core - Shared types library.
//!
//! This crate provides the value types used across the LARQ storefront:
//! - `storefront` - Catalog, cart, identity and checkout logic
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, prices, colours and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
