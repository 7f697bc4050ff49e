//! Client-side form validation and input formatting.
//!
//! Every failure here is a value to show next to the form, never a panic.
//! Messages are the French copy shown on the storefront.

pub mod auth;
pub mod payment;

pub use auth::{FormError, LoginForm, MIN_PASSWORD_LENGTH, SignupForm};
pub use payment::{
    PaymentDetails, PaymentErrors, PaymentField, PaymentForm, format_card_number, format_cvv,
    format_expiry,
};
