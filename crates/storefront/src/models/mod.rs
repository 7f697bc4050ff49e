//! Domain models for the storefront.
//!
//! - [`cart`] - cart lines and the descriptors used to add them
//! - [`session`] - the current-session record and its storage keys
//! - [`user`] - registered identity records

pub mod cart;
pub mod session;
pub mod user;

pub use cart::{CartLine, LineDescriptor};
pub use session::{Session, keys as storage_keys};
pub use user::IdentityRecord;
