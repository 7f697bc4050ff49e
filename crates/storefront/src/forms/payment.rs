//! Payment form validation and input formatting.
//!
//! Nothing is charged: the validated [`PaymentDetails`] only keep what an
//! order summary may show.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 16;
/// Minimum number of digits in a CVV.
pub const MIN_CVV_DIGITS: usize = 3;

/// Payment form data, as typed.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub card_number: SecretString,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: SecretString,
}

/// A payment form field, keyed the way the storefront form names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentField {
    CardNumber,
    CardName,
    ExpiryDate,
    Cvv,
}

impl PaymentField {
    /// Form field name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardName => "cardName",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentErrors {
    errors: BTreeMap<PaymentField, &'static str>,
}

impl PaymentErrors {
    /// The message for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: PaymentField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Failed fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (PaymentField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn insert(&mut self, field: PaymentField, message: &'static str) {
        self.errors.insert(field, message);
    }
}

impl fmt::Display for PaymentErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.key())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for PaymentErrors {}

/// What survives validation: enough to label the order, nothing chargeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub card_last4: String,
    pub card_name: String,
    pub expiry_date: String,
}

impl PaymentDetails {
    /// Card number masked for display, e.g. `•••• 4242`.
    #[must_use]
    pub fn masked_card(&self) -> String {
        format!("•••• {}", self.card_last4)
    }
}

impl PaymentForm {
    #[must_use]
    pub fn new(
        card_number: impl Into<String>,
        card_name: impl Into<String>,
        expiry_date: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: SecretString::from(card_number.into()),
            card_name: card_name.into(),
            expiry_date: expiry_date.into(),
            cvv: SecretString::from(cvv.into()),
        }
    }

    /// Check every field.
    ///
    /// - card number: at least 16 digits once spaces and dashes are removed
    /// - card name: not blank
    /// - expiry: present
    /// - CVV: at least 3 digits
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<PaymentDetails, PaymentErrors> {
        let mut errors = PaymentErrors::default();

        let card_number = self.card_number.expose_secret();
        let card_digits = strip_separators(card_number);
        if card_number.trim().is_empty() {
            errors.insert(PaymentField::CardNumber, "Numéro de carte requis");
        } else if !is_digits(&card_digits) || card_digits.len() < MIN_CARD_DIGITS {
            errors.insert(PaymentField::CardNumber, "Numéro de carte invalide");
        }

        if self.card_name.trim().is_empty() {
            errors.insert(PaymentField::CardName, "Nom sur la carte requis");
        }

        if self.expiry_date.trim().is_empty() {
            errors.insert(PaymentField::ExpiryDate, "Date d'expiration requise");
        }

        let cvv = self.cvv.expose_secret().trim();
        if cvv.is_empty() {
            errors.insert(PaymentField::Cvv, "CVV requis");
        } else if !is_digits(cvv) || cvv.len() < MIN_CVV_DIGITS {
            errors.insert(PaymentField::Cvv, "CVV invalide");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let card_last4 = card_digits
            .get(card_digits.len().saturating_sub(4)..)
            .unwrap_or_default()
            .to_owned();

        Ok(PaymentDetails {
            card_last4,
            card_name: self.card_name.trim().to_owned(),
            expiry_date: self.expiry_date.trim().to_owned(),
        })
    }
}

fn strip_separators(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

fn is_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

fn digits(input: &str) -> impl Iterator<Item = char> + '_ {
    input.chars().filter(char::is_ascii_digit)
}

/// Format card number input as the shopper types: digits only, grouped in
/// fours, at most 16 digits (`4242 4242 4242 4242`).
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let mut out = String::with_capacity(19);
    for (i, c) in digits(input).take(MIN_CARD_DIGITS).enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Format expiry input as `MM/YY`: digits only, a slash once there are more
/// than two.
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits: String = digits(input).take(4).collect();
    match (digits.get(..2), digits.get(2..)) {
        (Some(month), Some(year)) if !year.is_empty() => format!("{month}/{year}"),
        _ => digits,
    }
}

/// Format CVV input: at most three digits.
#[must_use]
pub fn format_cvv(input: &str) -> String {
    digits(input).take(MIN_CVV_DIGITS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> PaymentForm {
        PaymentForm::new("4242 4242 4242 4242", "Jean Dupont", "12/27", "123")
    }

    #[test]
    fn test_valid_form() {
        let details = valid().validate().unwrap();
        assert_eq!(details.card_last4, "4242");
        assert_eq!(details.masked_card(), "•••• 4242");
        assert_eq!(details.card_name, "Jean Dupont");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = PaymentForm::new("", "", "", "").validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(PaymentField::CardNumber),
            Some("Numéro de carte requis")
        );
        assert_eq!(
            errors.get(PaymentField::CardName),
            Some("Nom sur la carte requis")
        );
        assert_eq!(
            errors.get(PaymentField::ExpiryDate),
            Some("Date d'expiration requise")
        );
        assert_eq!(errors.get(PaymentField::Cvv), Some("CVV requis"));
    }

    #[test]
    fn test_short_card_number() {
        let mut form = valid();
        form.card_number = SecretString::from("4242 4242 4242 424");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(PaymentField::CardNumber),
            Some("Numéro de carte invalide")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_card_number_separators_are_ignored() {
        let mut form = valid();
        form.card_number = SecretString::from("4242-4242-4242-4242");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_card_number_letters_are_invalid() {
        let mut form = valid();
        form.card_number = SecretString::from("4242 4242 4242 424x");
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_short_cvv() {
        let mut form = valid();
        form.cvv = SecretString::from("12");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(PaymentField::Cvv), Some("CVV invalide"));
    }

    #[test]
    fn test_blank_card_name() {
        let mut form = valid();
        form.card_name = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(PaymentField::CardName),
            Some("Nom sur la carte requis")
        );
    }

    #[test]
    fn test_errors_display_in_form_order() {
        let errors = PaymentForm::new("", "Jo", "12/27", "").validate().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "cardNumber: Numéro de carte requis; cvv: CVV requis"
        );
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("42 42-4a2"), "4242 42");
        assert_eq!(format_card_number("42424242424242429999"), "4242 4242 4242 4242");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("122"), "12/2");
        assert_eq!(format_expiry("12/27"), "12/27");
        assert_eq!(format_expiry("122799"), "12/27");
    }

    #[test]
    fn test_format_cvv() {
        assert_eq!(format_cvv("1a2b3c4"), "123");
        assert_eq!(format_cvv("12"), "12");
    }
}
