//! Authentication service.
//!
//! Validates credentials against the reserved administrator identity and the
//! registered-user list, and owns the current session.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;

use citropoth_core::{Email, Role};

use crate::config::AdminIdentity;
use crate::models::{RegisteredUser, Session, SessionUser};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Display name given to the administrator session.
pub const ADMIN_DISPLAY_NAME: &str = "Chief Artisan (Admin)";

const UNKNOWN_ACCOUNT_SECRET: &str = "no-such-account";

/// Hash verified against when no account matches, so a miss costs the same
/// Argon2 work as a wrong password.
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password(UNKNOWN_ACCOUNT_SECRET).ok());

/// Authentication gate.
///
/// Handles registration, login and logout. Admin status is granted only by
/// authenticating as the configured administrator identity.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    admin: Option<AdminIdentity>,
    users: Vec<RegisteredUser>,
    session: Session,
}

impl AuthGate {
    /// Create a gate with no session.
    #[must_use]
    pub const fn new(admin: Option<AdminIdentity>, users: Vec<RegisteredUser>) -> Self {
        Self {
            admin,
            users,
            session: Session::Anonymous,
        }
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Registered customer accounts, oldest first.
    #[must_use]
    pub fn users(&self) -> &[RegisteredUser] {
        &self.users
    }

    /// Whether an administrator identity is configured.
    #[must_use]
    pub const fn has_admin(&self) -> bool {
        self.admin.is_some()
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new customer account.
    ///
    /// The session is left unchanged; the new customer must log in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyName` if the name is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::DuplicateEmail` if the email is taken, including by
    /// the administrator.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }

        let email = Email::parse(email)?;
        validate_password(password)?;

        if self.is_taken(&email) {
            return Err(AuthError::DuplicateEmail);
        }

        let user = RegisteredUser {
            name: name.to_owned(),
            email,
            password_hash: hash_password(password)?,
        };
        self.users.push(user.clone());

        Ok(user)
    }

    /// Log in with email and password.
    ///
    /// The administrator identity is checked first; a matching admin email
    /// with a wrong password fails without consulting the registered users.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any failure, including a
    /// malformed email.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = if let Some(admin) = self
            .admin
            .as_ref()
            .filter(|admin| admin.email.same_identity(&email))
        {
            verify_password(password, admin.password_hash.expose_secret())?;
            SessionUser {
                name: ADMIN_DISPLAY_NAME.to_owned(),
                email: admin.email.clone(),
                role: Role::Admin,
            }
        } else {
            let Some(account) = self.find_user(&email) else {
                if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
                    let _ = verify_password(password, hash);
                }
                return Err(AuthError::InvalidCredentials);
            };
            verify_password(password, &account.password_hash)?;
            SessionUser {
                name: account.name.clone(),
                email: account.email.clone(),
                role: Role::Member,
            }
        };

        self.session = Session::Authenticated(user.clone());
        Ok(user)
    }

    /// End the session unconditionally.
    pub fn logout(&mut self) {
        self.session = Session::Anonymous;
    }

    /// Adopt a stored session after re-validating it.
    ///
    /// An admin session survives only if its email is the configured admin
    /// email; a member session only if the account is still registered.
    /// Anything else becomes anonymous. Returns whether the stored session
    /// was kept.
    pub fn restore(&mut self, stored: Session) -> bool {
        let valid = match stored.user() {
            None => true,
            Some(user) => match user.role {
                Role::Admin => self
                    .admin
                    .as_ref()
                    .is_some_and(|admin| admin.email.same_identity(&user.email)),
                Role::Member => self.find_user(&user.email).is_some(),
            },
        };

        self.session = if valid { stored } else { Session::Anonymous };
        valid
    }

    /// Fail with `Forbidden` unless the session is an admin session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for anonymous and member sessions.
    pub const fn require_admin(&self) -> Result<(), AuthError> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    fn find_user(&self, email: &Email) -> Option<&RegisteredUser> {
        self.users
            .iter()
            .find(|user| user.email.same_identity(email))
    }

    fn is_taken(&self, email: &Email) -> bool {
        self.admin
            .as_ref()
            .is_some_and(|admin| admin.email.same_identity(email))
            || self.find_user(email).is_some()
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// Also used to produce the administrator hash for configuration.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    const ADMIN_PASSWORD: &str = "kiln-fired-curator";

    fn gate() -> AuthGate {
        let admin = AdminIdentity {
            email: Email::parse("curator@citropoth.com").unwrap(),
            password_hash: SecretString::from(hash_password(ADMIN_PASSWORD).unwrap()),
        };
        AuthGate::new(Some(admin), Vec::new())
    }

    #[test]
    fn test_register_does_not_log_in() {
        let mut gate = gate();
        let user = gate
            .register("Maya Chen", "maya@example.com", "glazed-pots")
            .unwrap();

        assert_eq!(user.name, "Maya Chen");
        assert_ne!(user.password_hash, "glazed-pots");
        assert!(!gate.session().is_logged_in());
        assert_eq!(gate.users().len(), 1);
    }

    #[test]
    fn test_register_duplicate_case_insensitive() {
        let mut gate = gate();
        gate.register("Maya", "maya@example.com", "glazed-pots")
            .unwrap();

        let err = gate
            .register("Other", "MAYA@Example.com", "different-pass")
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
        assert_eq!(gate.users().len(), 1);
    }

    #[test]
    fn test_register_admin_email_rejected() {
        let mut gate = gate();
        let err = gate
            .register("Impostor", "Curator@Citropoth.com", "glazed-pots")
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
    }

    #[test]
    fn test_register_validation() {
        let mut gate = gate();
        assert_eq!(
            gate.register("  ", "a@b.c", "glazed-pots").unwrap_err(),
            AuthError::EmptyName
        );
        assert!(matches!(
            gate.register("Maya", "not-an-email", "glazed-pots"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            gate.register("Maya", "maya@example.com", "short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_member_login() {
        let mut gate = gate();
        gate.register("Maya", "maya@example.com", "glazed-pots")
            .unwrap();

        let user = gate.login("MAYA@example.com", "glazed-pots").unwrap();
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.name, "Maya");
        assert!(gate.session().is_logged_in());
        assert!(!gate.session().is_admin());
    }

    #[test]
    fn test_admin_login() {
        let mut gate = gate();
        let user = gate.login("curator@citropoth.com", ADMIN_PASSWORD).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(gate.session().is_admin());
        assert!(gate.require_admin().is_ok());
    }

    #[test]
    fn test_admin_wrong_password_fails() {
        let mut gate = gate();
        let err = gate
            .login("curator@citropoth.com", "glazed-pots")
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!gate.session().is_logged_in());
    }

    #[test]
    fn test_login_failures_are_generic() {
        let mut gate = gate();
        gate.register("Maya", "maya@example.com", "glazed-pots")
            .unwrap();

        for (email, password) in [
            ("maya@example.com", "wrong-password"),
            ("nobody@example.com", "glazed-pots"),
            ("not-an-email", "glazed-pots"),
        ] {
            assert_eq!(
                gate.login(email, password).unwrap_err(),
                AuthError::InvalidCredentials
            );
        }
    }

    #[test]
    fn test_unknown_account_runs_full_verify() {
        let hash = UNKNOWN_ACCOUNT_HASH.as_deref().unwrap();
        assert!(PasswordHash::new(hash).is_ok());
        assert!(verify_password(UNKNOWN_ACCOUNT_SECRET, hash).is_ok());

        // Even the placeholder's own secret never signs anyone in
        let mut gate = gate();
        assert_eq!(
            gate.login("nobody@example.com", UNKNOWN_ACCOUNT_SECRET)
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(!gate.session().is_logged_in());
    }

    #[test]
    fn test_no_admin_configured() {
        let mut gate = AuthGate::default();
        assert!(!gate.has_admin());
        assert_eq!(
            gate.login("curator@citropoth.com", ADMIN_PASSWORD)
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_logout() {
        let mut gate = gate();
        gate.login("curator@citropoth.com", ADMIN_PASSWORD).unwrap();
        gate.logout();
        assert_eq!(gate.session(), &Session::Anonymous);
        assert_eq!(gate.require_admin(), Err(AuthError::Forbidden));
    }

    #[test]
    fn test_restore_revalidates() {
        let mut gate = gate();
        gate.register("Maya", "maya@example.com", "glazed-pots")
            .unwrap();

        let forged_admin = Session::Authenticated(SessionUser {
            name: "Mallory".to_string(),
            email: Email::parse("mallory@example.com").unwrap(),
            role: Role::Admin,
        });
        assert!(!gate.restore(forged_admin));
        assert_eq!(gate.session(), &Session::Anonymous);

        let member = Session::Authenticated(SessionUser {
            name: "Maya".to_string(),
            email: Email::parse("maya@example.com").unwrap(),
            role: Role::Member,
        });
        assert!(gate.restore(member.clone()));
        assert_eq!(gate.session(), &member);

        let stranger = Session::Authenticated(SessionUser {
            name: "Ghost".to_string(),
            email: Email::parse("ghost@example.com").unwrap(),
            role: Role::Member,
        });
        assert!(!gate.restore(stranger));
        assert!(!gate.session().is_logged_in());
    }

    #[test]
    fn test_hash_password_unique_salts() {
        let first = hash_password("glazed-pots").unwrap();
        let second = hash_password("glazed-pots").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("glazed-pots", &first).is_ok());
        assert!(verify_password("glazed-pots", "not-a-phc-string").is_err());
    }
}
