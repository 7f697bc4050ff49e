//! Checkout command.
//!
//! The cart only lives for one invocation: items are added from the
//! arguments, paid for and cleared.

use tracing::info;

use larq_core::ProductId;
use larq_storefront::checkout::OrderConfirmation;
use larq_storefront::forms::{
    LoginForm, PaymentForm, format_card_number, format_cvv, format_expiry,
};
use larq_storefront::sets::SetSelection;
use larq_storefront::state::Storefront;
use larq_storefront::storage::KeyValueStore;

use super::CommandError;

/// Everything `larq checkout` was given.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    /// `id[:colour[:size]]` specs.
    pub items: Vec<String>,
    /// Product ids for a two-bottle set; empty for none.
    pub set: Vec<String>,
    /// Email and password to sign in with first.
    pub credentials: Option<(String, String)>,
    pub card_number: String,
    pub card_name: String,
    pub expiry: String,
    pub cvv: String,
}

/// An `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec<'a> {
    pub product_id: &'a str,
    pub color: Option<&'a str>,
    pub size: Option<&'a str>,
}

impl<'a> ItemSpec<'a> {
    /// Parse `id[:colour[:size]]`. Empty parts fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidItem` if the id is empty.
    pub fn parse(spec: &'a str) -> Result<Self, CommandError> {
        let mut parts = spec.splitn(3, ':').map(str::trim);
        let non_empty = |part: Option<&'a str>| part.filter(|p| !p.is_empty());

        let product_id =
            non_empty(parts.next()).ok_or_else(|| CommandError::InvalidItem(spec.to_string()))?;

        Ok(Self {
            product_id,
            color: non_empty(parts.next()),
            size: non_empty(parts.next()),
        })
    }
}

/// Fill the cart, pay and wait for the order.
///
/// # Errors
///
/// Returns an error if an item is unknown, sign-in fails or a checkout step
/// is refused. Nothing is charged either way.
pub async fn run<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    request: CheckoutRequest,
) -> Result<String, CommandError> {
    for spec in &request.items {
        let item = ItemSpec::parse(spec)?;
        shop.add_to_cart(item.product_id, item.color, item.size)?;
    }

    if !request.set.is_empty() {
        let mut set = SetSelection::new();
        for id in &request.set {
            set.toggle(ProductId::new(id.trim()));
        }
        shop.add_set(&set)?;
    }

    if let Some((email, password)) = &request.credentials {
        shop.login(&LoginForm::new(email.as_str(), password.as_str()))?;
    }

    let stage = shop.begin_checkout();
    info!(?stage, "Checkout started");

    // Arguments are masked the way the payment inputs mask keystrokes
    let form = PaymentForm::new(
        format_card_number(&request.card_number),
        request.card_name,
        format_expiry(&request.expiry),
        format_cvv(&request.cvv),
    );
    shop.submit_payment(&form)?;
    info!("Traitement en cours...");

    let order = shop.complete_checkout().await?;
    Ok(confirmation(&order))
}

fn confirmation(order: &OrderConfirmation) -> String {
    let mut lines = vec![
        "Commande confirmée !".to_string(),
        format!("Référence : {}", order.short_reference()),
        String::new(),
    ];
    lines.extend(order.lines.iter().map(|line| {
        format!(
            "  {} x {} ({} / {})  {}",
            line.quantity,
            line.product_name,
            line.color,
            line.size,
            line.line_total()
        )
    }));
    lines.push(String::new());
    lines.push(format!("Total : {}", order.total));
    lines.push(format!("Carte : {}", order.card));
    lines.push(format!(
        "Un email de confirmation a été envoyé à {}",
        order.customer_email
    ));
    lines.join("\n")
}
