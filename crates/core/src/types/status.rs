//! Status and classification enums for storefront entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Every order starts as [`OrderStatus::Initiated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Initiated,
    Processing,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initiated => write!(f, "Initiated"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

/// Product department. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ceramics,
    Textiles,
    Paintings,
    #[serde(rename = "DIY Kits")]
    DiyKits,
    Jewelry,
}

impl Category {
    /// All departments, in storefront display order.
    pub const ALL: [Self; 5] = [
        Self::Ceramics,
        Self::Textiles,
        Self::Paintings,
        Self::DiyKits,
        Self::Jewelry,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ceramics => "Ceramics",
            Self::Textiles => "Textiles",
            Self::Paintings => "Paintings",
            Self::DiyKits => "DIY Kits",
            Self::Jewelry => "Jewelry",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted)
                    || c.label().replace(' ', "-").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// Role of an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The reserved operator account.
    Admin,
    /// A registered customer.
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Member => write!(f, "member"),
        }
    }
}
