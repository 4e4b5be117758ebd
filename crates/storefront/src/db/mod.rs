//! Persistence adapter for storefront state.
//!
//! # Storage: key-value blobs
//!
//! Each top-level entity is stored as one JSON document under its own key:
//!
//! ## Keys
//!
//! - `products` - Catalog, including reviews
//! - `blogs` - Blog posts
//! - `cart` - Cart lines
//! - `user` - Current session record
//! - `registeredUsers` - Customer accounts (Argon2 hashes only)
//! - `orders` - Order history
//!
//! A missing key means "use the compiled-in default". A value that cannot be
//! read or parsed is logged and also replaced by the default. Every mutation
//! rewrites the whole entity.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage keys, one per persisted entity.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const BLOGS: &str = "blogs";
    pub const CART: &str = "cart";
    pub const USER: &str = "user";
    pub const REGISTERED_USERS: &str = "registeredUsers";
    pub const ORDERS: &str = "orders";

    /// Every key the storefront reads at startup.
    pub const ALL: [&str; 6] = [PRODUCTS, BLOGS, CART, USER, REGISTERED_USERS, ORDERS];
}

/// Errors from blob store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entity could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used by this store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Key-value text storage.
///
/// Mirrors the browser storage contract: string keys, whole-value reads and
/// writes, no transactions.
pub trait BlobStore {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Read and decode an entity.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the stored text is not a valid
/// encoding of `T`, or any read error from the store.
pub fn load_entity<T: DeserializeOwned>(
    store: &impl BlobStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(key)?
        .map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(StoreError::from)
}

/// Read an entity, falling back to `default` when it is absent or unusable.
///
/// Unusable values are logged; they are left in place and will be
/// overwritten by the next save of this entity.
pub fn load_or_default<T: DeserializeOwned>(
    store: &impl BlobStore,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    match load_entity(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "No stored value, using default");
            default()
        }
        Err(e) => {
            warn!(key, error = %e, "Stored value unusable, using default");
            default()
        }
    }
}

/// Encode and write an entity.
///
/// # Errors
///
/// Returns `StoreError` if encoding or writing fails.
pub fn save_entity<T: Serialize + ?Sized>(
    store: &impl BlobStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let text = serde_json::to_string(value)?;
    store.set(key, &text)
}
