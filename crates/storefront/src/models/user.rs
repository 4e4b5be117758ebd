//! User domain types.

use serde::{Deserialize, Serialize};

use citropoth_core::Email;

/// A customer account created through registration.
///
/// Only an Argon2id PHC hash of the password is stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    /// Display name.
    pub name: String,
    /// Unique (case-insensitive) account email.
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for RegisteredUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_hash() {
        let user = RegisteredUser {
            name: "Elena".to_string(),
            email: Email::parse("elena@example.com").unwrap(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        };

        let debug_output = format!("{user:?}");
        assert!(debug_output.contains("elena@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }

    #[test]
    fn test_camel_case_fields() {
        let user = RegisteredUser {
            name: "Elena".to_string(),
            email: Email::parse("elena@example.com").unwrap(),
            password_hash: "hash".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["passwordHash"], "hash");
    }
}
