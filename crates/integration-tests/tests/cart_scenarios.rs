//! Cart scenarios across the storefront facade.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use proptest::prelude::*;

use larq_core::{CurrencyCode, Price, ProductId};
use larq_integration_tests::TestContext;
use larq_storefront::forms::SignupForm;
use larq_storefront::sets::SetSelection;

#[test]
fn same_variant_merges_and_keeps_first_line() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();

    let first = shop.add_to_cart("bottle-swig-top", Some("Black"), None).unwrap();
    let second = shop.add_to_cart("bottle-swig-top", Some("Black"), Some("2L")).unwrap();
    let other = shop.add_to_cart("bottle-swig-top", Some("White"), None).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(shop.cart().lines().len(), 2);
    assert_eq!(shop.cart().line(&first).unwrap().quantity, 2);
    assert_eq!(shop.cart().count(), 3);
    assert_eq!(shop.cart().total(), Price::whole(300, CurrencyCode::EUR));
}

#[test]
fn quantity_updates_and_removal() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();

    let id = shop.add_to_cart("bottle-purevis", None, None).unwrap();
    shop.update_quantity(&id, 4);
    assert_eq!(shop.cart_view().subtotal, "€400.00");

    shop.update_quantity(&id, 0);
    assert!(shop.cart().is_empty());
    assert!(!shop.remove_line(&id));
}

#[test]
fn set_and_single_bottles_share_the_cart() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();

    let mut set = SetSelection::new();
    set.toggle(ProductId::new("bottle-filtered-swig-top"));
    set.toggle(ProductId::new("bottle-filtered-flip-top"));
    shop.add_set(&set).unwrap();
    shop.add_set(&set).unwrap();
    shop.add_to_cart("bottle-filtered-flip-top", None, None).unwrap();

    let view = shop.cart_view();
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].quantity, 2);
    assert_eq!(view.items[0].variant_title, "Eucalyptus Green / Granite White / Set");
    assert_eq!(view.item_count, 3);
    assert_eq!(view.subtotal, "€500.00");
}

#[test]
fn logout_leaves_cart_untouched() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.signup(&SignupForm::new("Jo", "jo@example.com", "secret1", "secret1"))
        .unwrap();

    shop.add_to_cart("bottle-swig-top", None, None).unwrap();
    shop.add_to_cart("bottle-purevis", None, None).unwrap();
    let before = shop.cart().lines().to_vec();

    shop.logout();

    assert!(shop.session().is_none());
    assert_eq!(shop.cart().lines(), before.as_slice());
}

#[test]
fn cart_is_not_persisted() {
    let ctx = TestContext::new();
    {
        let mut shop = ctx.open();
        shop.add_to_cart("bottle-swig-top", None, None).unwrap();
    }

    let shop = ctx.open();
    assert!(shop.cart().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: one line per distinct variant, and the count and total
    /// match the adds made through the facade.
    #[test]
    fn adds_group_by_variant(picks in prop::collection::vec((0usize..8, 0usize..8), 0..20)) {
        let ctx = TestContext::new();
        let mut shop = ctx.open();

        let mut variants = HashSet::new();
        let mut expected = Price::zero(CurrencyCode::EUR);
        for (p, c) in picks.iter().copied() {
            let product = &shop.catalog().products()[p % shop.catalog().products().len()];
            let color = product.colors[c % product.colors.len()].name.clone();
            let id = product.id.clone();
            let price = product.sizes[0].price;

            shop.add_to_cart(id.as_str(), Some(&color), None).unwrap();
            variants.insert((id, color));
            expected = expected + price;
        }

        prop_assert_eq!(shop.cart().lines().len(), variants.len());
        prop_assert_eq!(shop.cart().count() as usize, picks.len());
        prop_assert_eq!(shop.cart().total(), expected);
    }
}
