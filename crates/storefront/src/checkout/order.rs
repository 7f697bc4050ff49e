//! Order confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larq_core::Price;

use crate::models::CartLine;

/// What the shopper sees once the simulated payment completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Order reference (UUID v4).
    pub reference: Uuid,
    pub customer_email: String,
    pub customer_name: String,
    /// Lines as they were when payment was submitted.
    pub lines: Vec<CartLine>,
    pub total: Price,
    /// Card number masked to its last four digits.
    pub card: String,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Total number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Short reference printed on the confirmation page, e.g. `LARQ-1A2B3C4D`.
    #[must_use]
    pub fn short_reference(&self) -> String {
        let simple = self.reference.simple().to_string().to_uppercase();
        format!("LARQ-{}", simple.get(..8).unwrap_or(&simple))
    }
}
