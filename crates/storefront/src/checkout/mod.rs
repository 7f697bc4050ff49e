//! Mock checkout flow.
//!
//! The flow moves through [`CheckoutStage`]s:
//!
//! ```text
//! CartEmpty                       (entered with nothing to buy)
//! NeedsAuth ──login/signup──▶ NeedsPayment ──valid form──▶ Processing ──delay──▶ Complete
//!                                  ▲                           │
//!                                  └─────────cancel────────────┘
//! ```
//!
//! Nothing is charged. `Processing` is a [`PaymentTimer`] that always
//! completes; once it does, the cart is cleared and an
//! [`OrderConfirmation`] is returned.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut flow = CheckoutFlow::enter(&cart, identity.current_session(), delay);
//! flow.submit(&cart, identity.current_session(), &form)?;
//! let order = flow.wait_for_completion(&mut cart).await?;
//! ```

mod order;
mod timer;

pub use order::OrderConfirmation;
pub use timer::PaymentTimer;

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use larq_core::Price;

use crate::cart::CartStore;
use crate::forms::{PaymentDetails, PaymentErrors, PaymentForm};
use crate::models::{CartLine, Session};

/// Default simulated payment delay.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// Where the shopper is in the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Entered with an empty cart; nothing to do.
    CartEmpty,
    /// No session yet.
    NeedsAuth,
    /// Signed in, payment form not yet accepted.
    NeedsPayment,
    /// Payment accepted, waiting out the simulated delay.
    Processing,
    /// Order placed and cart cleared.
    Complete,
}

/// Why a checkout step was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("sign in to continue")]
    NotAuthenticated,

    #[error("invalid payment details: {0}")]
    InvalidPayment(#[source] PaymentErrors),

    /// A payment was already submitted and is still processing.
    #[error("payment already processing")]
    AlreadyProcessing,

    #[error("order already placed")]
    AlreadyComplete,

    #[error("no payment is processing")]
    NotProcessing,

    /// The pending payment was abandoned before it completed.
    #[error("checkout cancelled")]
    Cancelled,

    /// The payment delay needs a Tokio runtime and none is running.
    #[error("no async runtime to process the payment")]
    NoRuntime,
}

/// Snapshot taken when the payment form is accepted.
#[derive(Debug)]
struct PendingOrder {
    session: Session,
    payment: PaymentDetails,
    lines: Vec<CartLine>,
    total: Price,
    timer: PaymentTimer,
}

/// One pass through checkout.
///
/// The flow never holds the cart or the identity store; callers pass them
/// in at each step. Completion only touches the cart inside
/// [`wait_for_completion`](Self::wait_for_completion), so dropping or
/// cancelling the flow before then leaves the cart as it was.
#[derive(Debug)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    delay: Duration,
    pending: Option<PendingOrder>,
}

impl CheckoutFlow {
    /// Enter checkout.
    #[must_use]
    pub fn enter(cart: &CartStore, session: Option<&Session>, delay: Duration) -> Self {
        let stage = if cart.is_empty() {
            CheckoutStage::CartEmpty
        } else if session.is_some() {
            CheckoutStage::NeedsPayment
        } else {
            CheckoutStage::NeedsAuth
        };

        info!(?stage, items = cart.count(), "Entered checkout");
        Self {
            stage,
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        self.stage
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a successful login or signup. Only moves `NeedsAuth` forward.
    pub fn authenticated(&mut self, session: &Session) {
        if self.stage == CheckoutStage::NeedsAuth {
            self.stage = CheckoutStage::NeedsPayment;
            info!(email = %session.email, "Checkout authenticated");
        }
    }

    /// Submit the payment form and start the simulated payment.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `AlreadyProcessing` / `AlreadyComplete` if a payment was already
    ///   accepted; the pending payment is untouched
    /// - `NotAuthenticated` if there is no session, or the flow is still
    ///   waiting for [`authenticated`](Self::authenticated)
    /// - `InvalidPayment` with every failing field
    /// - `EmptyCart` if the cart emptied since checkout was entered
    /// - `NoRuntime` outside a Tokio runtime; the stage is unchanged
    pub fn submit(
        &mut self,
        cart: &CartStore,
        session: Option<&Session>,
        form: &PaymentForm,
    ) -> Result<(), CheckoutError> {
        match self.stage {
            CheckoutStage::Processing => {
                warn!("Duplicate payment submission ignored");
                return Err(CheckoutError::AlreadyProcessing);
            }
            CheckoutStage::Complete => return Err(CheckoutError::AlreadyComplete),
            CheckoutStage::NeedsAuth => return Err(CheckoutError::NotAuthenticated),
            CheckoutStage::CartEmpty | CheckoutStage::NeedsPayment => {}
        }

        let Some(session) = session else {
            self.stage = CheckoutStage::NeedsAuth;
            return Err(CheckoutError::NotAuthenticated);
        };

        let payment = form.validate().map_err(CheckoutError::InvalidPayment)?;

        if cart.is_empty() {
            self.stage = CheckoutStage::CartEmpty;
            return Err(CheckoutError::EmptyCart);
        }

        let timer = PaymentTimer::start(self.delay).map_err(|e| {
            warn!(error = %e, "Payment submitted outside a runtime");
            CheckoutError::NoRuntime
        })?;

        let total = cart.total();
        info!(
            email = %session.email,
            total = %total,
            card = %payment.masked_card(),
            "Payment submitted"
        );

        self.pending = Some(PendingOrder {
            session: session.clone(),
            payment,
            lines: cart.lines().to_vec(),
            total,
            timer,
        });
        self.stage = CheckoutStage::Processing;
        Ok(())
    }

    /// Wait for the simulated payment, then clear `cart` and place the order.
    ///
    /// The cart is cleared at most once per flow. Dropping the returned
    /// future before it resolves changes nothing; the payment stays pending.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyComplete` after the order was placed, `NotProcessing`
    /// if no payment was submitted, and `Cancelled` if the timer was aborted.
    pub async fn wait_for_completion(
        &mut self,
        cart: &mut CartStore,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if self.stage == CheckoutStage::Complete {
            return Err(CheckoutError::AlreadyComplete);
        }

        let Some(pending) = self.pending.as_mut() else {
            return Err(CheckoutError::NotProcessing);
        };

        if !pending.timer.wait().await {
            self.pending = None;
            self.stage = CheckoutStage::NeedsPayment;
            return Err(CheckoutError::Cancelled);
        }

        let Some(pending) = self.pending.take() else {
            return Err(CheckoutError::NotProcessing);
        };

        cart.clear();
        self.stage = CheckoutStage::Complete;

        let order = OrderConfirmation {
            reference: Uuid::new_v4(),
            customer_email: pending.session.email,
            customer_name: pending.session.name,
            lines: pending.lines,
            total: pending.total,
            card: pending.payment.masked_card(),
            placed_at: Utc::now(),
        };

        info!(
            reference = %order.reference,
            email = %order.customer_email,
            items = order.item_count(),
            total = %order.total,
            card = %order.card,
            "Order placed"
        );
        info!(
            email = %order.customer_email,
            reference = %order.short_reference(),
            "Confirmation email sent"
        );

        Ok(order)
    }

    /// Abandon a pending payment and return to the payment form.
    ///
    /// Returns whether a payment was pending.
    pub fn cancel(&mut self) -> bool {
        let Some(mut pending) = self.pending.take() else {
            return false;
        };

        pending.timer.cancel();
        self.stage = CheckoutStage::NeedsPayment;
        info!(email = %pending.session.email, "Checkout cancelled");
        true
    }
}
