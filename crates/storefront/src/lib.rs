//! Citropoth Storefront library.
//!
//! Catalog, cart, checkout, reviews, journal and admin operations for the
//! Citropoth handcrafted-goods store. All state lives in a key-value
//! [`db::BlobStore`]; [`state::Storefront`] hydrates it and writes back
//! whatever each command touches.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod navigation;
pub mod seed;
pub mod services;
pub mod state;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use navigation::Page;
pub use state::Storefront;
