//! Login and signup forms.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use larq_core::{Email, EmailError};

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validation failures for the login and signup forms.
///
/// `Display` renders the message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Veuillez remplir tous les champs")]
    MissingFields,

    #[error("Adresse email invalide")]
    InvalidEmail(#[source] EmailError),

    #[error("Les mots de passe ne correspondent pas")]
    PasswordMismatch,

    #[error("Le mot de passe doit contenir au moins {min} caractères")]
    PasswordTooShort { min: usize },

    #[error("Le nom est requis")]
    NameRequired,
}

/// Login form data.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Check both fields are filled in.
    ///
    /// The email shape is not checked here: a malformed address simply fails
    /// to match any account.
    ///
    /// # Errors
    ///
    /// Returns `FormError::MissingFields` if either field is empty.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.expose_secret().is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

/// Signup form data.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

impl SignupForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            password_confirm: SecretString::from(password_confirm.into()),
        }
    }

    /// Validate in the order the storefront reports problems: presence,
    /// email shape, confirmation, length, then a blank name.
    ///
    /// # Errors
    ///
    /// Returns the first `FormError` that applies.
    pub fn validate(&self) -> Result<(), FormError> {
        let password = self.password.expose_secret();

        if self.name.is_empty()
            || self.email.is_empty()
            || password.is_empty()
            || self.password_confirm.expose_secret().is_empty()
        {
            return Err(FormError::MissingFields);
        }

        Email::parse(&self.email).map_err(FormError::InvalidEmail)?;

        if password != self.password_confirm.expose_secret() {
            return Err(FormError::PasswordMismatch);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("", "secret1").validate(),
            Err(FormError::MissingFields)
        );
        assert_eq!(
            LoginForm::new("a@x.com", "").validate(),
            Err(FormError::MissingFields)
        );
        assert_eq!(LoginForm::new("a@x.com", "secret1").validate(), Ok(()));
    }

    #[test]
    fn test_signup_valid() {
        let form = SignupForm::new("Jean Dupont", "a@x.com", "secret1", "secret1");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_signup_missing_fields() {
        let form = SignupForm::new("", "a@x.com", "secret1", "secret1");
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_signup_invalid_email() {
        let form = SignupForm::new("Jo", "not-an-email", "secret1", "secret1");
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidEmail(EmailError::MissingAtSymbol))
        );
    }

    #[test]
    fn test_signup_mismatch_reported_before_length() {
        let form = SignupForm::new("Jo", "a@x.com", "abc", "abd");
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
    }

    #[test]
    fn test_signup_password_too_short() {
        let form = SignupForm::new("Jo", "a@x.com", "abcde", "abcde");
        let err = form.validate().unwrap_err();
        assert_eq!(err, FormError::PasswordTooShort { min: 6 });
        assert_eq!(
            err.to_string(),
            "Le mot de passe doit contenir au moins 6 caractères"
        );
    }

    #[test]
    fn test_signup_password_length_counts_characters() {
        // Six characters, more than six bytes
        let form = SignupForm::new("Jo", "a@x.com", "éééééé", "éééééé");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_signup_blank_name() {
        let form = SignupForm::new("   ", "a@x.com", "secret1", "secret1");
        assert_eq!(form.validate(), Err(FormError::NameRequired));
    }

    #[test]
    fn test_debug_hides_passwords() {
        let form = SignupForm::new("Jo", "a@x.com", "hunter22", "hunter22");
        assert!(!format!("{form:?}").contains("hunter22"));
    }
}
