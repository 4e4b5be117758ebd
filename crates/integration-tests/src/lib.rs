//! Integration tests for Citropoth.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p citropoth-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart, totals and order recording through the controller
//! - `auth_gate` - Registration, login, admin gating and navigation
//! - `persistence` - File-backed hydration, corrupt blobs and failed writes
//! - `properties` - Property tests for cart and registration invariants
//! - `advisor` - Craft advisor fallbacks, timeout, cancellation and caching
//!
//! Everything runs against temporary directories or in-memory stores; no
//! network access is needed.

use std::path::Path;

use tempfile::TempDir;

use citropoth_core::{Category, Price, ProductId};
use citropoth_storefront::config::AdminIdentity;
use citropoth_storefront::db::{BlobStore, FileStore, MemoryStore, StoreError};
use citropoth_storefront::models::Product;
use citropoth_storefront::services::auth::hash_password;
use citropoth_storefront::{Storefront, StorefrontConfig};

/// Configured administrator email.
pub const ADMIN_EMAIL: &str = "curator@citropoth.com";

/// Configured administrator password.
pub const ADMIN_PASSWORD: &str = "kiln-fired-2024";

/// Configuration with an administrator identity and default shipping.
#[must_use]
pub fn admin_config(data_dir: &Path) -> StorefrontConfig {
    let mut config = StorefrontConfig::local(data_dir);
    config.admin = Some(AdminIdentity {
        email: ADMIN_EMAIL.parse().expect("valid admin email"),
        password_hash: hash_password(ADMIN_PASSWORD)
            .expect("hash admin password")
            .into(),
    });
    config
}

/// A data directory that is removed when dropped.
pub struct TestDataDir {
    dir: TempDir,
    config: StorefrontConfig,
}

impl TestDataDir {
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = admin_config(dir.path());
        Self { dir, config }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Open a fresh controller over the directory, as a new process would.
    #[must_use]
    pub fn open(&self) -> Storefront<FileStore> {
        let store = FileStore::open(self.path()).expect("open file store");
        Storefront::open(store, &self.config)
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

/// A store that reads normally but rejects every write.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    #[must_use]
    pub const fn new(inner: MemoryStore) -> Self {
        Self { inner }
    }
}

impl BlobStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("read-only store")))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("read-only store")))
    }
}

/// A plain product at a whole-dollar price.
#[must_use]
pub fn product(id: &str, dollars: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Test piece {id}"),
        price: Price::from_dollars(dollars),
        category: Category::Ceramics,
        image: String::new(),
        description: String::new(),
        rating: 5.0,
        reviews: Vec::new(),
        is_limited: false,
    }
}
