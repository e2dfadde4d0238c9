//! Password gate for the user and admin screens.
//!
//! Passwords are compared in constant time to mitigate timing attacks.

use subtle::ConstantTimeEq;

use crate::errors::AppError;

pub const USER_LOGIN_ERROR: &str = "Wrong password, try again.";
pub const ADMIN_LOGIN_ERROR: &str = "Wrong admin password.";

/// Which password gate is being passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    fn error_message(&self) -> &'static str {
        match self {
            Role::User => USER_LOGIN_ERROR,
            Role::Admin => ADMIN_LOGIN_ERROR,
        }
    }
}

/// Login state plus the inline error shown under each password field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_logged_in: bool,
    pub admin_logged_in: bool,
    pub login_error: Option<String>,
    pub admin_login_error: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self, role: Role) -> bool {
        match role {
            Role::User => self.user_logged_in,
            Role::Admin => self.admin_logged_in,
        }
    }

    /// Compare `input` with `expected` and record the result for `role`.
    ///
    /// A mismatch only sets the inline error; the login flags are left as they were.
    pub fn attempt(&mut self, role: Role, input: &str, expected: &str) -> Result<(), AppError> {
        let ok = constant_time_compare(input, expected);
        let (flag, error) = match role {
            Role::User => (&mut self.user_logged_in, &mut self.login_error),
            Role::Admin => (&mut self.admin_logged_in, &mut self.admin_login_error),
        };

        if ok {
            *flag = true;
            *error = None;
            Ok(())
        } else {
            *error = Some(role.error_message().to_string());
            Err(AppError::AuthenticationFailure(
                role.error_message().to_string(),
            ))
        }
    }

    /// Clear both logins and any inline errors.
    pub fn clear(&mut self) {
        *self = Session::default();
    }

    /// Fail unless `role` is logged in.
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.is_logged_in(role) {
            Ok(())
        } else {
            Err(AppError::AuthenticationFailure(match role {
                Role::User => "Login required".to_string(),
                Role::Admin => "Admin login required".to_string(),
            }))
        }
    }
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("EPZArmy", "EPZArmy"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("EPZArmy", "EPZArmx"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-password"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }

    #[test]
    fn test_failed_attempt_only_sets_error() {
        let mut session = Session::default();

        let err = session.attempt(Role::User, "wrong", "EPZArmy").unwrap_err();

        assert!(matches!(err, AppError::AuthenticationFailure(_)));
        assert!(!session.user_logged_in);
        assert!(!session.admin_logged_in);
        assert_eq!(session.login_error.as_deref(), Some(USER_LOGIN_ERROR));
        assert!(session.admin_login_error.is_none());
    }

    #[test]
    fn test_successful_attempt_clears_error() {
        let mut session = Session::default();
        let _ = session.attempt(Role::Admin, "nope", "admin123");

        session.attempt(Role::Admin, "admin123", "admin123").unwrap();

        assert!(session.admin_logged_in);
        assert!(session.admin_login_error.is_none());
        assert!(session.require(Role::Admin).is_ok());
        assert!(session.require(Role::User).is_err());
    }
}
