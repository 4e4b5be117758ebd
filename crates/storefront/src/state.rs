//! Application state: the storefront controller.
//!
//! [`Storefront`] owns every entity, hydrates them from a [`BlobStore`] at
//! startup and writes back the entity a command touched. Writes happen after
//! the in-memory change is committed; a failed write is logged and reported
//! but never rolls anything back.

use std::num::NonZeroU32;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use citropoth_core::{BlogPostId, ProductId, ReviewRating};

use crate::config::StorefrontConfig;
use crate::db::{BlobStore, keys, load_or_default, save_entity};
use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::models::blog::DEFAULT_AUTHOR;
use crate::models::{
    BlogPost, CartTotals, NewBlogPost, NewProduct, NewReview, Order, Product, RegisteredUser,
    Review, Session, SessionUser,
};
use crate::navigation::{self, Page};
use crate::seed;
use crate::services::{AuthGate, BlogShelf, Cart, Catalog, OrderBook, ShippingPolicy};

/// The storefront controller.
///
/// Commands take `&mut self` and run to completion; there is no locking.
#[derive(Debug)]
pub struct Storefront<S> {
    store: S,
    shipping: ShippingPolicy,
    catalog: Catalog,
    blog: BlogShelf,
    cart: Cart,
    auth: AuthGate,
    orders: OrderBook,
}

impl<S: BlobStore> Storefront<S> {
    /// Hydrate every entity from `store`.
    ///
    /// Missing or unreadable entities fall back to their defaults (the seed
    /// catalog and journal, an empty cart, no users, no orders). The stored
    /// session is re-validated against the configured admin and the
    /// registered users.
    #[instrument(skip_all)]
    pub fn open(store: S, config: &StorefrontConfig) -> Self {
        let products: Vec<Product> =
            load_or_default(&store, keys::PRODUCTS, seed::default_products);
        let posts: Vec<BlogPost> = load_or_default(&store, keys::BLOGS, seed::default_blog_posts);
        let cart: Cart = load_or_default(&store, keys::CART, Cart::new);
        let users: Vec<RegisteredUser> =
            load_or_default(&store, keys::REGISTERED_USERS, Vec::new);
        let orders: Vec<Order> = load_or_default(&store, keys::ORDERS, Vec::new);
        let session: Session = load_or_default(&store, keys::USER, Session::default);

        let mut auth = AuthGate::new(config.admin.clone(), users);
        let restored = auth.restore(session);

        let storefront = Self {
            store,
            shipping: config.shipping,
            catalog: Catalog::new(products),
            blog: BlogShelf::new(posts),
            cart,
            auth,
            orders: OrderBook::new(orders),
        };

        if restored {
            if let Some(user) = storefront.session().user() {
                set_sentry_user(user.email.as_str(), &user.role.to_string());
            }
        } else {
            warn!("Stored session no longer valid, signing out");
            storefront.save_session();
        }

        info!(
            products = storefront.catalog.products().len(),
            posts = storefront.blog.posts().len(),
            cart_lines = storefront.cart.items().len(),
            users = storefront.auth.users().len(),
            orders = storefront.orders.len(),
            "Storefront hydrated"
        );

        storefront
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn shipping(&self) -> &ShippingPolicy {
        &self.shipping
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn blog(&self) -> &BlogShelf {
        &self.blog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        self.auth.session()
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderBook {
        &self.orders
    }

    /// Cart subtotal, shipping and total under the configured policy.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(&self.shipping)
    }

    /// The page the current session lands on when asking for `requested`.
    #[must_use]
    pub const fn navigate(&self, requested: Page) -> Page {
        navigation::resolve(requested, self.auth.session())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one of a product to the cart.
    ///
    /// Returns the line's new quantity, or `None` if the product is not in
    /// the catalog.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn add_to_cart(&mut self, id: &ProductId) -> Option<NonZeroU32> {
        let product = self.catalog.get(id)?;
        let quantity = self.cart.add(product);
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
        self.save_cart();
        Some(quantity)
    }

    /// Change a line's quantity by `delta`, never going below one.
    ///
    /// Unknown IDs are ignored.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> Option<NonZeroU32> {
        let quantity = self.cart.update_quantity(id, delta)?;
        self.save_cart();
        Some(quantity)
    }

    /// Remove a line. Returns whether it was present.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove(id);
        if removed {
            self.save_cart();
        }
        removed
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.save_cart();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Turn the cart into an order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when there is nothing to buy.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Order> {
        let order = self.orders.complete_checkout(
            &mut self.cart,
            self.auth.session(),
            &self.shipping,
            Utc::now(),
        )?;

        info!(
            order_id = %order.id,
            total = %order.total,
            items = order.item_count(),
            "Order recorded"
        );
        add_breadcrumb("checkout", "Order recorded", Some(&[("order_id", order.id.as_str())]));

        self.save_orders();
        self.save_cart();
        Ok(order)
    }

    /// Orders belonging to the signed-in user; empty when signed out.
    #[must_use]
    pub fn my_orders(&self) -> Vec<&Order> {
        self.auth
            .session()
            .email()
            .map(|email| self.orders.orders_for(email).collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Create a customer account. The session is not changed.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` describing why the account was refused.
    #[instrument(skip(self, password))]
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<RegisteredUser> {
        let user = self.auth.register(name, email, password)?;
        info!(email = %user.email, "Customer registered");
        self.save_users();
        Ok(user)
    }

    /// Sign in as the administrator or a registered customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any mismatch.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser> {
        let user = self.auth.login(email, password)?;
        info!(email = %user.email, role = %user.role, "Signed in");
        set_sentry_user(user.email.as_str(), &user.role.to_string());
        self.save_session();
        Ok(user)
    }

    /// Sign out. Returns the page to show next.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Page {
        self.auth.logout();
        clear_sentry_user();
        self.save_session();
        Page::Home
    }

    /// Registered customer accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` unless signed in as the administrator.
    pub fn users(&self) -> Result<&[RegisteredUser]> {
        self.auth.require_admin()?;
        Ok(self.auth.users())
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Post a review under the signed-in name, or the guest name.
    ///
    /// Returns `None`, leaving the catalog unchanged, for an unknown product.
    #[instrument(skip(self, comment), fields(product_id = %id))]
    pub fn add_review(
        &mut self,
        id: &ProductId,
        rating: ReviewRating,
        comment: &str,
    ) -> Option<Review> {
        let user = match self.auth.session().user() {
            Some(user) => user.name.clone(),
            None => NewReview::GUEST_NAME.to_owned(),
        };
        let review = NewReview {
            user,
            rating,
            comment: comment.trim().to_owned(),
        };

        let review = self
            .catalog
            .add_review(id, review, Utc::now().date_naive())?;
        self.save_products();
        Some(review)
    }

    // =========================================================================
    // Admin: Products
    // =========================================================================

    /// Catalog a new product.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn add_product(&mut self, draft: NewProduct) -> Result<Product> {
        self.auth.require_admin()?;
        let product = draft.into_product();
        self.catalog.add_product(product.clone())?;
        info!(product_id = %product.id, "Product added");
        self.save_products();
        Ok(product)
    }

    /// Replace a product by ID. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn update_product(&mut self, product: Product) -> Result<bool> {
        self.auth.require_admin()?;
        let updated = self.catalog.update_product(product);
        if updated {
            self.save_products();
        }
        Ok(updated)
    }

    /// Delete a product by ID. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn delete_product(&mut self, id: &ProductId) -> Result<bool> {
        self.auth.require_admin()?;
        let deleted = self.catalog.delete_product(id);
        if deleted {
            self.save_products();
        }
        Ok(deleted)
    }

    // =========================================================================
    // Admin: Journal
    // =========================================================================

    /// Publish a journal post dated today.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn add_blog_post(&mut self, draft: NewBlogPost) -> Result<BlogPost> {
        self.auth.require_admin()?;
        let post = draft.into_post(DEFAULT_AUTHOR, Utc::now().date_naive());
        self.blog.add_post(post.clone())?;
        info!(post_id = %post.id, "Journal post published");
        self.save_blog();
        Ok(post)
    }

    /// Replace a journal post by ID. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    #[instrument(skip(self, post), fields(post_id = %post.id))]
    pub fn update_blog_post(&mut self, post: BlogPost) -> Result<bool> {
        self.auth.require_admin()?;
        let updated = self.blog.update_post(post);
        if updated {
            self.save_blog();
        }
        Ok(updated)
    }

    /// Delete a journal post by ID. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    #[instrument(skip(self), fields(post_id = %id))]
    pub fn delete_blog_post(&mut self, id: &BlogPostId) -> Result<bool> {
        self.auth.require_admin()?;
        let deleted = self.blog.delete_post(id);
        if deleted {
            self.save_blog();
        }
        Ok(deleted)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn save_cart(&self) {
        self.persist(keys::CART, &self.cart);
    }

    fn save_orders(&self) {
        self.persist(keys::ORDERS, self.orders.orders());
    }

    fn save_products(&self) {
        self.persist(keys::PRODUCTS, self.catalog.products());
    }

    fn save_blog(&self) {
        self.persist(keys::BLOGS, self.blog.posts());
    }

    fn save_users(&self) {
        self.persist(keys::REGISTERED_USERS, self.auth.users());
    }

    fn save_session(&self) {
        self.persist(keys::USER, self.auth.session());
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = save_entity(&self.store, key, value) {
            let event_id = sentry::capture_error(&e);
            error!(
                key,
                error = %e,
                sentry_event_id = %event_id,
                "Failed to save entity"
            );
        }
    }
}
