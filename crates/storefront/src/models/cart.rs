//! Cart line types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larq_core::{LineId, Price, ProductId};

/// What the shopper asked to add: a product variant with its prices copied
/// from the catalog at the moment of the click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDescriptor {
    pub product_id: ProductId,
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub price: Price,
    /// Pre-discount price, display only.
    pub original_price: Option<Price>,
    pub image_path: Option<String>,
}

/// A line in the cart.
///
/// Product fields are denormalised copies taken when the line was first
/// added; later adds of the same variant only bump `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub product_id: ProductId,
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub image_path: Option<String>,
    /// Always at least 1; lines reaching zero are removed.
    pub quantity: u32,
}

impl CartLine {
    /// Build a fresh line with quantity 1 from a descriptor.
    ///
    /// The id is `{product}-{color}-{size}-{millis}`.
    #[must_use]
    pub fn from_descriptor(descriptor: LineDescriptor, added_at: DateTime<Utc>) -> Self {
        let id = LineId::new(format!(
            "{}-{}-{}-{}",
            descriptor.product_id,
            descriptor.color,
            descriptor.size,
            added_at.timestamp_millis()
        ));

        Self {
            id,
            product_id: descriptor.product_id,
            product_name: descriptor.product_name,
            color: descriptor.color,
            size: descriptor.size,
            price: descriptor.price,
            original_price: descriptor.original_price,
            image_path: descriptor.image_path,
            quantity: 1,
        }
    }

    /// Whether this line holds the same `(product, color, size)` variant.
    #[must_use]
    pub fn same_variant(&self, descriptor: &LineDescriptor) -> bool {
        self.product_id == descriptor.product_id
            && self.color == descriptor.color
            && self.size == descriptor.size
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Original price times quantity, when the line is discounted.
    #[must_use]
    pub fn line_original_total(&self) -> Option<Price> {
        self.original_price.map(|original| original.times(self.quantity))
    }
}
