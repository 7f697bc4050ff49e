//! Unified error handling with Sentry integration.
//!
//! Every fallible storefront operation returns `Result<T, StorefrontError>`.
//! Nothing is ever thrown at the shopper: [`StorefrontError::user_message`]
//! turns any variant into the copy shown next to the form.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::forms::FormError;
use crate::services::auth::AuthError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Login or signup was refused by the identity store.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A login or signup form failed validation.
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// A checkout step was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// No product with this id, or no such colour or size.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorefrontError {
    /// The message shown to the shopper.
    ///
    /// Configuration faults and a missing runtime are reported to Sentry and
    /// shown as a generic message. Storage faults never reach this type: the
    /// identity store logs them and keeps its in-memory state.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) => self.report_internal(),
            Self::Auth(AuthError::InvalidCredentials) => {
                "Email ou mot de passe incorrect".to_string()
            }
            Self::Auth(AuthError::UserAlreadyExists) => "Cet email est déjà utilisé".to_string(),
            Self::Form(err) => err.to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Votre panier est vide".to_string(),
                CheckoutError::NotAuthenticated => {
                    "Veuillez vous connecter ou créer un compte".to_string()
                }
                CheckoutError::InvalidPayment(errors) => errors
                    .iter()
                    .map(|(_, message)| message)
                    .collect::<Vec<_>>()
                    .join(", "),
                CheckoutError::AlreadyProcessing => "Traitement en cours...".to_string(),
                CheckoutError::AlreadyComplete => "Commande déjà confirmée".to_string(),
                CheckoutError::NotProcessing | CheckoutError::Cancelled => {
                    "Paiement annulé".to_string()
                }
                CheckoutError::NoRuntime => self.report_internal(),
            },
            Self::NotFound(_) => "Produit introuvable".to_string(),
        }
    }

    fn report_internal(&self) -> String {
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Internal error"
        );
        "Une erreur est survenue, veuillez réessayer".to_string()
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Set the Sentry user context.
///
/// Call this after login or signup to associate errors with the shopper.
pub fn set_sentry_user(email: &str, name: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(email.to_string()),
            email: Some(email.to_string()),
            username: name.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the shopper.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "bottle-purevis")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::PaymentForm;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::NotFound("bottle-123".to_string());
        assert_eq!(err.to_string(), "Not found: bottle-123");

        let err = StorefrontError::from(AuthError::UserAlreadyExists);
        assert_eq!(err.to_string(), "Auth error: user already exists");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            StorefrontError::from(AuthError::InvalidCredentials).user_message(),
            "Email ou mot de passe incorrect"
        );
        assert_eq!(
            StorefrontError::from(AuthError::UserAlreadyExists).user_message(),
            "Cet email est déjà utilisé"
        );
        assert_eq!(
            StorefrontError::from(FormError::PasswordMismatch).user_message(),
            "Les mots de passe ne correspondent pas"
        );
        assert_eq!(
            StorefrontError::from(CheckoutError::EmptyCart).user_message(),
            "Votre panier est vide"
        );
        assert_eq!(
            StorefrontError::from(CheckoutError::NotAuthenticated).user_message(),
            "Veuillez vous connecter ou créer un compte"
        );
    }

    #[test]
    fn test_payment_errors_joined() {
        let Err(errors) = PaymentForm::new("", "Jo", "12/27", "1").validate() else {
            panic!("expected invalid payment");
        };
        let err = StorefrontError::from(CheckoutError::InvalidPayment(errors));
        assert_eq!(err.user_message(), "Numéro de carte requis, CVV invalide");
    }

    #[test]
    fn test_internal_errors_are_generic() {
        let err = StorefrontError::from(ConfigError::InvalidEnvVar(
            "LARQ_CHECKOUT_DELAY_MS".to_string(),
            "soon".to_string(),
        ));
        assert_eq!(
            err.user_message(),
            "Une erreur est survenue, veuillez réessayer"
        );
        assert_eq!(
            StorefrontError::from(CheckoutError::NoRuntime).user_message(),
            "Une erreur est survenue, veuillez réessayer"
        );
    }
}
