//! Integration tests for the LARQ storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p larq-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart merging, totals and session independence
//! - `account_scenarios` - Signup, login and persisted sessions
//! - `checkout_scenarios` - The mock checkout end to end
//!
//! Every test builds its own [`TestContext`], so tests never share storage.

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use larq_storefront::config::StorefrontConfig;
use larq_storefront::state::Storefront;
use larq_storefront::storage::FileStorage;

/// Simulated payment delay used by every scenario.
pub const TEST_CHECKOUT_DELAY: Duration = Duration::from_millis(500);

/// A storage file in a private temporary directory.
///
/// Each call to [`open`](Self::open) is a fresh "page load": the stored
/// session comes back, the cart starts empty.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of the JSON file standing in for local storage.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            storage_path: self.storage_path(),
            checkout_delay: TEST_CHECKOUT_DELAY,
            ..StorefrontConfig::default()
        }
    }

    /// Open a storefront over this context's storage file.
    #[must_use]
    pub fn open(&self) -> Storefront<FileStorage> {
        Storefront::new(self.config(), FileStorage::new(self.storage_path()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
