//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Products and their reviews
//! - `blog` - Journal posts
//! - `cart` - Cart lines and shipping-adjusted totals
//! - `auth` - Registration, login and admin gating
//! - `orders` - Checkout and order history
//! - `advisor` - AI-written recommendations and product stories

pub mod advisor;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod catalog;
pub mod orders;

pub use advisor::{CraftAdvisor, GeminiClient, GenerationError, TextGenerator};
pub use auth::{AuthError, AuthGate};
pub use blog::BlogShelf;
pub use cart::{Cart, ShippingPolicy};
pub use catalog::{Catalog, CatalogError};
pub use orders::{CheckoutError, OrderBook};
