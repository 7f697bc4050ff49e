//! LARQ storefront library.
//!
//! Catalog browsing, an in-memory cart, a local identity store and a mock
//! checkout. [`state::Storefront`] ties them together; front ends such as the
//! `larq` CLI drive it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod services;
pub mod sets;
pub mod state;
pub mod storage;
pub mod views;
