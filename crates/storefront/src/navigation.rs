//! Page routing with admin gating.
//!
//! Rendering is out of scope; this only decides which page a session is
//! allowed to land on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Session;

/// Every storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Home,
    Shop,
    ProductDetail,
    Blog,
    BlogPost,
    Cart,
    Checkout,
    Auth,
    Admin,
    Profile,
    Privacy,
    Terms,
    Masters,
    LimitedReleases,
    EthicalSourcing,
    ContactCurator,
    JourneyLogistics,
    StudioReturns,
}

impl Page {
    pub const ALL: [Self; 18] = [
        Self::Home,
        Self::Shop,
        Self::ProductDetail,
        Self::Blog,
        Self::BlogPost,
        Self::Cart,
        Self::Checkout,
        Self::Auth,
        Self::Admin,
        Self::Profile,
        Self::Privacy,
        Self::Terms,
        Self::Masters,
        Self::LimitedReleases,
        Self::EthicalSourcing,
        Self::ContactCurator,
        Self::JourneyLogistics,
        Self::StudioReturns,
    ];

    /// URL slug (e.g., `limited-releases`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Shop => "shop",
            Self::ProductDetail => "product-detail",
            Self::Blog => "blog",
            Self::BlogPost => "blog-post",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Auth => "auth",
            Self::Admin => "admin",
            Self::Profile => "profile",
            Self::Privacy => "privacy",
            Self::Terms => "terms",
            Self::Masters => "masters",
            Self::LimitedReleases => "limited-releases",
            Self::EthicalSourcing => "ethical-sourcing",
            Self::ContactCurator => "contact-curator",
            Self::JourneyLogistics => "journey-logistics",
            Self::StudioReturns => "studio-returns",
        }
    }

    /// Whether only the administrator may view this page.
    #[must_use]
    pub const fn requires_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|page| page.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown page: {s}"))
    }
}

/// The page a session actually lands on when it asks for `requested`.
///
/// Admin-only pages silently resolve to [`Page::Home`] for anyone who is not
/// signed in as the administrator.
#[must_use]
pub const fn resolve(requested: Page, session: &Session) -> Page {
    if requested.requires_admin() && !session.is_admin() {
        Page::Home
    } else {
        requested
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use citropoth_core::{Email, Role};

    use crate::models::SessionUser;

    use super::*;

    fn session(role: Role) -> Session {
        Session::Authenticated(SessionUser {
            name: "Someone".to_string(),
            email: Email::parse("someone@example.com").unwrap(),
            role,
        })
    }

    #[test]
    fn test_admin_page_gated() {
        assert_eq!(resolve(Page::Admin, &Session::Anonymous), Page::Home);
        assert_eq!(resolve(Page::Admin, &session(Role::Member)), Page::Home);
        assert_eq!(resolve(Page::Admin, &session(Role::Admin)), Page::Admin);
    }

    #[test]
    fn test_other_pages_pass_through() {
        for page in Page::ALL.into_iter().filter(|p| !p.requires_admin()) {
            assert_eq!(resolve(page, &Session::Anonymous), page);
        }
    }

    #[test]
    fn test_slug_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>().unwrap(), page);
            assert_eq!(
                serde_json::to_value(page).unwrap(),
                serde_json::Value::String(page.slug().to_string())
            );
        }
        assert!("dashboard".parse::<Page>().is_err());
    }
}
