//! Storefront state passed to every front end.
//!
//! [`Storefront`] owns the catalog, cart, identity store and any checkout in
//! progress. It is an explicit value rather than a global, so each test can
//! build an isolated instance over [`MemoryStorage`](crate::storage::MemoryStorage).

use secrecy::ExposeSecret;
use tracing::{info, instrument};

use larq_core::LineId;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutError, CheckoutFlow, CheckoutStage, OrderConfirmation};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::forms::{LoginForm, PaymentForm, SignupForm};
use crate::models::Session;
use crate::services::auth::IdentityStore;
use crate::sets::SetSelection;
use crate::storage::KeyValueStore;
use crate::views::CartView;

/// The storefront for one shopper.
#[derive(Debug)]
pub struct Storefront<S> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
    identity: IdentityStore<S>,
    checkout: Option<CheckoutFlow>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open the storefront over `storage`, restoring any stored session.
    /// The cart always starts empty.
    pub fn new(config: StorefrontConfig, storage: S) -> Self {
        let catalog = Catalog::larq(config.currency);
        let cart = CartStore::new(config.currency);
        let identity = IdentityStore::open(storage);

        if let Some(session) = identity.current_session() {
            set_sentry_user(&session.email, Some(&session.name));
        }

        Self {
            config,
            catalog,
            cart,
            identity,
            checkout: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.identity.current_session()
    }

    #[must_use]
    pub const fn identity(&self) -> &IdentityStore<S> {
        &self.identity
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product. Colour and size default to the product's
    /// first variant.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` for an unknown product, colour or
    /// size.
    #[instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<LineId> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| StorefrontError::NotFound(product_id.to_string()))?;

        let color = match color {
            Some(color) => color,
            None => product.default_color().map_or("", |c| c.name.as_str()),
        };
        let size = match size {
            Some(size) => size,
            None => product.default_size().map_or("", |s| s.volume.as_str()),
        };

        let descriptor = product.descriptor(color, size).ok_or_else(|| {
            StorefrontError::NotFound(format!("{product_id} ({color}, {size})"))
        })?;

        add_breadcrumb(
            "cart",
            "Added item",
            Some(&[("product_id", product_id), ("color", color), ("size", size)]),
        );
        Ok(self.cart.add_item(descriptor))
    }

    /// Add a complete two-bottle set as one line.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` if the set is incomplete or names
    /// a product missing from the catalog.
    #[instrument(skip(self, set))]
    pub fn add_set(&mut self, set: &SetSelection) -> Result<LineId> {
        let descriptor = set
            .descriptor(&self.catalog)
            .ok_or_else(|| StorefrontError::NotFound("set".to_string()))?;

        add_breadcrumb(
            "cart",
            "Added set",
            Some(&[("product_id", descriptor.product_id.as_str())]),
        );
        Ok(self.cart.add_item(descriptor))
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove_line(&mut self, id: &LineId) -> bool {
        add_breadcrumb("cart", "Removed line", Some(&[("line_id", id.as_str())]));
        self.cart.remove_item(id)
    }

    /// Set a line's quantity; zero or below removes it.
    pub fn update_quantity(&mut self, id: &LineId, quantity: i64) {
        self.cart.update_quantity(id, quantity);
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Validate the login form and sign in.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Form` for missing fields and
    /// `StorefrontError::Auth` if the credentials do not match.
    #[instrument(skip_all, fields(email = %form.email))]
    pub fn login(&mut self, form: &LoginForm) -> Result<Session> {
        form.validate()?;
        let session = self
            .identity
            .login(&form.email, form.password.expose_secret())?;
        self.signed_in(&session);
        Ok(session)
    }

    /// Validate the signup form, register and sign in.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Form` if validation fails and
    /// `StorefrontError::Auth` if the email is already registered.
    #[instrument(skip_all, fields(email = %form.email))]
    pub fn signup(&mut self, form: &SignupForm) -> Result<Session> {
        form.validate()?;
        let session = self.identity.signup(
            &form.email,
            form.password.expose_secret(),
            form.name.trim(),
        )?;
        self.signed_in(&session);
        Ok(session)
    }

    /// Sign out. The cart is left as it is.
    pub fn logout(&mut self) {
        self.identity.logout();
        clear_sentry_user();
        add_breadcrumb("auth", "Signed out", None);
    }

    fn signed_in(&mut self, session: &Session) {
        set_sentry_user(&session.email, Some(&session.name));
        add_breadcrumb("auth", "Signed in", None);
        if let Some(flow) = self.checkout.as_mut() {
            flow.authenticated(session);
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Enter checkout, replacing (and cancelling) any checkout in progress.
    pub fn begin_checkout(&mut self) -> CheckoutStage {
        if let Some(mut previous) = self.checkout.take() {
            previous.cancel();
        }

        let flow = CheckoutFlow::enter(
            &self.cart,
            self.identity.current_session(),
            self.config.checkout_delay,
        );
        let stage = flow.stage();
        self.checkout = Some(flow);
        add_breadcrumb("checkout", "Entered checkout", None);
        stage
    }

    /// The current checkout stage, if checkout was entered.
    #[must_use]
    pub fn checkout_stage(&self) -> Option<CheckoutStage> {
        self.checkout.as_ref().map(CheckoutFlow::stage)
    }

    /// Submit the payment form. Enters checkout first if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` if the step is refused, including
    /// `CheckoutError::NoRuntime` when called outside a Tokio runtime.
    #[instrument(skip_all)]
    pub fn submit_payment(&mut self, form: &PaymentForm) -> Result<()> {
        if self.checkout.is_none() {
            self.begin_checkout();
        }

        let session = self.identity.current_session();
        let Some(flow) = self.checkout.as_mut() else {
            return Err(CheckoutError::NotProcessing.into());
        };

        flow.submit(&self.cart, session, form)?;
        add_breadcrumb("checkout", "Payment submitted", None);
        Ok(())
    }

    /// Wait for the pending payment and place the order, clearing the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` if no payment is pending or the
    /// order was already placed.
    #[instrument(skip_all)]
    pub async fn complete_checkout(&mut self) -> Result<OrderConfirmation> {
        let Some(flow) = self.checkout.as_mut() else {
            return Err(CheckoutError::NotProcessing.into());
        };

        let order = flow.wait_for_completion(&mut self.cart).await?;
        let reference = order.reference.to_string();
        add_breadcrumb(
            "checkout",
            "Order placed",
            Some(&[("reference", reference.as_str())]),
        );
        info!(reference = %order.reference, "Checkout complete");
        Ok(order)
    }

    /// Leave checkout, abandoning any pending payment. The cart is kept.
    pub fn leave_checkout(&mut self) {
        if let Some(mut flow) = self.checkout.take()
            && flow.cancel()
        {
            add_breadcrumb("checkout", "Left checkout with payment pending", None);
        }
    }
}
