//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Local identity store (signup, login, logout, session)

pub mod auth;
