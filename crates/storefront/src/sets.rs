//! Two-bottle set builder.
//!
//! The shopper ticks up to two products; a complete pair is added to the
//! cart as a single line priced at the sum of both bottles.

use larq_core::ProductId;

use crate::catalog::Catalog;
use crate::models::LineDescriptor;

/// Number of bottles in a set.
pub const SET_SIZE: usize = 2;

/// Size label used on set lines.
pub const SET_SIZE_LABEL: &str = "Set";

/// Products ticked in the set builder, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetSelection {
    selected: Vec<ProductId>,
}

impl SetSelection {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: Vec::new(),
        }
    }

    /// Tick or untick a product.
    ///
    /// Unticking always works. Ticking a third product is ignored and
    /// returns `false`.
    pub fn toggle(&mut self, product: ProductId) -> bool {
        if let Some(index) = self.selected.iter().position(|id| *id == product) {
            self.selected.remove(index);
            return true;
        }

        if self.selected.len() >= SET_SIZE {
            return false;
        }

        self.selected.push(product);
        true
    }

    #[must_use]
    pub fn selected(&self) -> &[ProductId] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, product: &ProductId) -> bool {
        self.selected.contains(product)
    }

    /// Whether exactly two products are ticked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selected.len() == SET_SIZE
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The cart line for a complete set, combining both products' default
    /// variants. The line is named after the catalog names, not the
    /// marketing display names. `None` until two products are ticked, or if either is not
    /// in `catalog`.
    #[must_use]
    pub fn descriptor(&self, catalog: &Catalog) -> Option<LineDescriptor> {
        let [first, second] = self.selected.as_slice() else {
            return None;
        };

        let first = catalog.find(first.as_str())?;
        let second = catalog.find(second.as_str())?;
        let a = first.default_descriptor()?;
        let b = second.default_descriptor()?;

        let original_price = match (a.original_price, b.original_price) {
            (Some(x), Some(y)) => Some(x + y),
            _ => None,
        };

        Some(LineDescriptor {
            product_id: ProductId::new(format!("set-{}-{}", first.id, second.id)),
            product_name: format!(
                "Set {SET_SIZE} bouteilles - {} + {}",
                first.name, second.name
            ),
            color: format!("{} / {}", a.color, b.color),
            size: SET_SIZE_LABEL.to_string(),
            price: a.price + b.price,
            original_price,
            image_path: a.image_path,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use larq_core::{CurrencyCode, Price};

    use super::*;

    #[test]
    fn test_toggle_caps_at_two() {
        let mut set = SetSelection::new();
        assert!(set.toggle(ProductId::new("bottle-swig-top")));
        assert!(set.toggle(ProductId::new("bottle-purevis")));
        assert!(!set.toggle(ProductId::new("bottle-filtered-flip-top")));

        assert!(set.is_complete());
        assert!(!set.is_selected(&ProductId::new("bottle-filtered-flip-top")));
    }

    #[test]
    fn test_toggle_untick() {
        let mut set = SetSelection::new();
        set.toggle(ProductId::new("bottle-swig-top"));
        set.toggle(ProductId::new("bottle-purevis"));
        assert!(set.toggle(ProductId::new("bottle-swig-top")));

        assert_eq!(set.selected(), &[ProductId::new("bottle-purevis")]);
        assert!(!set.is_complete());
    }

    #[test]
    fn test_incomplete_set_has_no_descriptor() {
        let catalog = Catalog::larq(CurrencyCode::EUR);
        let mut set = SetSelection::new();
        assert!(set.descriptor(&catalog).is_none());

        set.toggle(ProductId::new("bottle-swig-top"));
        assert!(set.descriptor(&catalog).is_none());
    }

    #[test]
    fn test_complete_set_descriptor() {
        let catalog = Catalog::larq(CurrencyCode::EUR);
        let mut set = SetSelection::new();
        set.toggle(ProductId::new("bottle-swig-top"));
        set.toggle(ProductId::new("bottle-purevis"));

        let descriptor = set.descriptor(&catalog).unwrap();
        assert_eq!(descriptor.product_id.as_str(), "set-bottle-swig-top-bottle-purevis");
        assert_eq!(
            descriptor.product_name,
            "Set 2 bouteilles - LARQ Bottle Swig Top + LARQ Bottle PureVis™"
        );
        assert_eq!(descriptor.color, "Amalfi Blue / Granite White");
        assert_eq!(descriptor.size, "Set");
        assert_eq!(descriptor.price, Price::whole(200, CurrencyCode::EUR));
        assert_eq!(
            descriptor.original_price,
            Some(Price::whole(280, CurrencyCode::EUR))
        );
        assert_eq!(
            descriptor.image_path.as_deref(),
            Some("/images/generated-image.png")
        );
    }

    #[test]
    fn test_unknown_product_has_no_descriptor() {
        let catalog = Catalog::larq(CurrencyCode::EUR);
        let mut set = SetSelection::new();
        set.toggle(ProductId::new("bottle-swig-top"));
        set.toggle(ProductId::new("pitcher"));
        assert!(set.descriptor(&catalog).is_none());
    }
}
