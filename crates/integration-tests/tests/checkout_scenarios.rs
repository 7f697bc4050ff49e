//! Mock checkout scenarios.

#![allow(clippy::unwrap_used)]

use larq_core::{CurrencyCode, Price};
use larq_integration_tests::{TEST_CHECKOUT_DELAY, TestContext};
use larq_storefront::checkout::{CheckoutError, CheckoutStage};
use larq_storefront::error::StorefrontError;
use larq_storefront::forms::{LoginForm, PaymentForm, SignupForm};

fn payment() -> PaymentForm {
    PaymentForm::new("4242 4242 4242 4242", "Jean Dupont", "12/27", "123")
}

#[tokio::test(start_paused = true)]
async fn valid_checkout_completes_exactly_once() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.signup(&SignupForm::new("Jo", "jo@example.com", "secret1", "secret1"))
        .unwrap();
    shop.add_to_cart("bottle-swig-top", None, None).unwrap();
    shop.add_to_cart("bottle-swig-top", None, None).unwrap();
    shop.add_to_cart("bottle-purevis", None, None).unwrap();

    assert_eq!(shop.begin_checkout(), CheckoutStage::NeedsPayment);
    shop.submit_payment(&payment()).unwrap();

    // Repeated clicks while processing are refused
    for _ in 0..3 {
        assert!(matches!(
            shop.submit_payment(&payment()),
            Err(StorefrontError::Checkout(CheckoutError::AlreadyProcessing))
        ));
    }

    let started = tokio::time::Instant::now();
    let order = shop.complete_checkout().await.unwrap();
    assert!(started.elapsed() >= TEST_CHECKOUT_DELAY);

    assert!(shop.cart().is_empty());
    assert_eq!(shop.checkout_stage(), Some(CheckoutStage::Complete));
    assert_eq!(order.total, Price::whole(300, CurrencyCode::EUR));
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.customer_email, "jo@example.com");

    assert!(shop.complete_checkout().await.is_err());
    assert!(shop.submit_payment(&payment()).is_err());
}

#[tokio::test(start_paused = true)]
async fn checkout_waits_for_login() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.signup(&SignupForm::new("Jo", "jo@example.com", "secret1", "secret1"))
        .unwrap();
    shop.logout();

    shop.add_to_cart("bottle-filtered-flip-top", None, None).unwrap();
    assert_eq!(shop.begin_checkout(), CheckoutStage::NeedsAuth);

    let err = shop.submit_payment(&payment()).unwrap_err();
    assert_eq!(err.user_message(), "Veuillez vous connecter ou créer un compte");

    assert!(shop.login(&LoginForm::new("jo@example.com", "nope123")).is_err());
    assert_eq!(shop.checkout_stage(), Some(CheckoutStage::NeedsAuth));

    shop.login(&LoginForm::new("jo@example.com", "secret1")).unwrap();
    assert_eq!(shop.checkout_stage(), Some(CheckoutStage::NeedsPayment));

    shop.submit_payment(&payment()).unwrap();
    assert!(shop.complete_checkout().await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn invalid_payment_keeps_cart_and_stage() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.signup(&SignupForm::new("Jo", "jo@example.com", "secret1", "secret1"))
        .unwrap();
    shop.add_to_cart("bottle-purevis", None, None).unwrap();
    shop.begin_checkout();

    let err = shop
        .submit_payment(&PaymentForm::new("4242 4242", "", "", "12"))
        .unwrap_err();
    let StorefrontError::Checkout(CheckoutError::InvalidPayment(errors)) = &err else {
        panic!("expected invalid payment, got {err:?}");
    };
    assert_eq!(errors.len(), 4);
    assert_eq!(shop.checkout_stage(), Some(CheckoutStage::NeedsPayment));
    assert_eq!(shop.cart().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_cart_short_circuits() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.signup(&SignupForm::new("Jo", "jo@example.com", "secret1", "secret1"))
        .unwrap();

    assert_eq!(shop.begin_checkout(), CheckoutStage::CartEmpty);
    let err = shop.submit_payment(&payment()).unwrap_err();
    assert_eq!(err.user_message(), "Votre panier est vide");
}

#[tokio::test(start_paused = true)]
async fn leaving_checkout_abandons_payment() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.signup(&SignupForm::new("Jo", "jo@example.com", "secret1", "secret1"))
        .unwrap();
    shop.add_to_cart("bottle-swig-top", None, None).unwrap();
    shop.submit_payment(&payment()).unwrap();

    shop.leave_checkout();
    tokio::time::sleep(TEST_CHECKOUT_DELAY * 4).await;

    assert_eq!(shop.cart().count(), 1);
    assert!(shop.complete_checkout().await.is_err());

    // Coming back starts a fresh checkout
    assert_eq!(shop.begin_checkout(), CheckoutStage::NeedsPayment);
    shop.submit_payment(&payment()).unwrap();
    assert!(shop.complete_checkout().await.is_ok());
    assert!(shop.cart().is_empty());
}
