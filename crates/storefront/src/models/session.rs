//! Session-related types.
//!
//! The session is a closed enum in memory but is persisted as a flat record
//! (`name`, `email`, `isLoggedIn`, `isAdmin`) so the signed-out state is an
//! empty record rather than `null`.

use serde::{Deserialize, Serialize};

use citropoth_core::{Email, Role};

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Display name.
    pub name: String,
    /// Account email (identity key).
    pub email: Email,
    /// Admin or member.
    pub role: Role,
}

/// The current browser-profile session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SessionRecord", into = "SessionRecord")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl Session {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Whether the session belongs to the reserved administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Authenticated(SessionUser {
                role: Role::Admin,
                ..
            })
        )
    }

    /// Email of the signed-in user.
    #[must_use]
    pub fn email(&self) -> Option<&Email> {
        self.user().map(|user| &user.email)
    }

    /// Display name, empty when anonymous.
    #[must_use]
    pub fn name(&self) -> &str {
        self.user().map_or("", |user| user.name.as_str())
    }
}

/// Persisted shape of a [`Session`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    is_logged_in: bool,
    #[serde(default)]
    is_admin: bool,
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        match session {
            Session::Anonymous => Self::default(),
            Session::Authenticated(user) => Self {
                name: user.name,
                email: user.email.into_inner(),
                is_logged_in: true,
                is_admin: user.role == Role::Admin,
            },
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        if !record.is_logged_in {
            return Self::Anonymous;
        }

        // A signed-in record without a usable email cannot name an account
        let Ok(email) = Email::parse(&record.email) else {
            return Self::Anonymous;
        };

        Self::Authenticated(SessionUser {
            name: record.name,
            email,
            role: if record.is_admin {
                Role::Admin
            } else {
                Role::Member
            },
        })
    }
}
