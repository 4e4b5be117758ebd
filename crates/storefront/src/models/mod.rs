//! Domain models for the storefront.
//!
//! These are the entities persisted in the blob store. Field names serialize
//! in camelCase so stored blobs keep the storefront's established shape.

pub mod blog;
pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use blog::{BlogPost, NewBlogPost};
pub use cart::{CartItem, CartTotals};
pub use order::Order;
pub use product::{NewProduct, NewReview, Product, Review};
pub use session::{Session, SessionUser};
pub use user::RegisteredUser;
