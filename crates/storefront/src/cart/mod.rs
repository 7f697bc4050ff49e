//! In-memory shopping cart.
//!
//! The cart is not persisted: it lives as long as the [`CartStore`] value.
//! None of its operations can fail - removing a missing line is a no-op and
//! a quantity of zero or below removes the line.

mod merge;

pub use merge::merge_line;

use chrono::{DateTime, Utc};
use tracing::debug;

use larq_core::{CurrencyCode, LineId, Price};

use crate::models::{CartLine, LineDescriptor};

/// The authoritative list of cart lines for one browsing session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    currency: CurrencyCode,
}

impl CartStore {
    /// Create an empty cart totalling in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Add one unit of a variant, merging with an existing line when the
    /// `(product, color, size)` triple matches.
    ///
    /// Returns the id of the line holding the variant.
    pub fn add_item(&mut self, descriptor: LineDescriptor) -> LineId {
        self.add_item_at(descriptor, Utc::now())
    }

    /// [`add_item`](Self::add_item) with an explicit creation time for the
    /// line id.
    pub fn add_item_at(&mut self, descriptor: LineDescriptor, added_at: DateTime<Utc>) -> LineId {
        let product_id = descriptor.product_id.clone();
        let (lines, id) = merge_line(std::mem::take(&mut self.lines), descriptor, added_at);
        self.lines = lines;

        debug!(
            product_id = %product_id,
            line_id = %id,
            item_count = self.count(),
            "Added item to cart"
        );
        id
    }

    /// Delete a line outright. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        let removed = self.lines.len() != before;

        if removed {
            debug!(line_id = %id, "Removed line from cart");
        }
        removed
    }

    /// Set a line's quantity. Zero or below removes the line; there is no
    /// upper bound beyond `u32::MAX`.
    pub fn update_quantity(&mut self, id: &LineId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
            debug!(line_id = %id, quantity, "Updated cart line quantity");
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        debug!("Cleared cart");
    }

    /// Sum of unit price times quantity. Original prices are display only and
    /// never enter the total.
    #[must_use]
    pub fn total(&self) -> Price {
        let amount = self
            .lines
            .iter()
            .map(|line| line.line_total().amount)
            .sum();
        Price::new(amount, self.currency)
    }

    /// Total number of units, for the cart badge.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}
