//! Display data for the catalog and cart.
//!
//! Views are plain, pre-formatted snapshots: prices are rendered strings and
//! nothing here holds a reference back into the stores.

use crate::cart::CartStore;
use crate::catalog::{Product, ProductColor};
use crate::models::CartLine;

// =============================================================================
// Cart
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub product_id: String,
    pub title: String,
    /// `{colour} / {size}`.
    pub variant_title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Struck-through line total, when the line is discounted.
    pub original_line_price: Option<String>,
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.total().display(),
            item_count: cart.count(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_id: line.product_id.to_string(),
            title: line.product_name.clone(),
            variant_title: format!("{} / {}", line.color, line.size),
            quantity: line.quantity,
            price: line.price.display(),
            line_price: line.line_total().display(),
            original_line_price: line
                .line_original_total()
                .filter(|original| original.amount > line.line_total().amount)
                .map(|original| original.display()),
            image: line.image_path.clone(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Colour swatch display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchView {
    pub name: String,
    pub hex: String,
    /// Light swatches get a border so they stay visible on white.
    pub needs_border: bool,
}

impl From<&ProductColor> for SwatchView {
    fn from(color: &ProductColor) -> Self {
        Self {
            name: color.name.clone(),
            hex: color.hex.to_string(),
            needs_border: color.hex.is_light(),
        }
    }
}

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub name: String,
    /// `Nouveau` for new products.
    pub badge: Option<&'static str>,
    pub price: Option<String>,
    pub original_price: Option<String>,
    /// Rendered as `-29%`.
    pub discount: Option<String>,
    pub swatches: Vec<SwatchView>,
    pub features: Vec<String>,
    pub image: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let size = product.default_size();
        let discount = size.and_then(|size| {
            size.original_price
                .and_then(|original| size.price.discount_percent(&original))
        });

        Self {
            id: product.id.to_string(),
            title: product.display_title(),
            name: product.name.clone(),
            badge: product.is_new.then_some("Nouveau"),
            price: size.map(|size| size.price.display()),
            original_price: size
                .and_then(|size| size.original_price)
                .map(|original| original.display()),
            discount: discount.map(|percent| format!("-{percent}%")),
            swatches: product.colors.iter().map(SwatchView::from).collect(),
            features: product.features.clone(),
            image: product.image_path.clone(),
        }
    }
}
