//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! larq catalog
//! larq catalog --category filtration
//! larq product bottle-purevis
//! ```

use larq_storefront::catalog::Product;
use larq_storefront::error::StorefrontError;
use larq_storefront::state::Storefront;
use larq_storefront::storage::KeyValueStore;
use larq_storefront::views::ProductCardView;

use super::CommandError;

/// List products, optionally for one category tab.
pub fn list<S: KeyValueStore>(shop: &Storefront<S>, category: Option<&str>) -> String {
    let catalog = shop.catalog();
    let products: Vec<&Product> = match category {
        Some(category) => catalog.products_in(category),
        None => catalog.products().iter().collect(),
    };

    if products.is_empty() {
        let tabs: Vec<&str> = catalog
            .categories()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        return format!(
            "Aucun produit dans cette catégorie.\nCatégories : {}",
            tabs.join(", ")
        );
    }

    products
        .into_iter()
        .map(|product| card(&ProductCardView::from(product)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Show one product with every variant.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` for an unknown product id.
pub fn show<S: KeyValueStore>(shop: &Storefront<S>, id: &str) -> Result<String, CommandError> {
    let product = shop
        .catalog()
        .find(id)
        .ok_or_else(|| StorefrontError::NotFound(id.to_string()))?;

    let view = ProductCardView::from(product);
    let mut lines = vec![card(&view), String::new(), "Couleurs :".to_string()];
    lines.extend(
        view.swatches
            .iter()
            .map(|swatch| format!("  {} ({})", swatch.name, swatch.hex)),
    );
    lines.push("Tailles :".to_string());
    lines.extend(
        product
            .sizes
            .iter()
            .map(|size| format!("  {} - {}", size.volume, size.price)),
    );
    if !view.features.is_empty() {
        lines.push(format!("Caractéristiques : {}", view.features.join(", ")));
    }

    Ok(lines.join("\n"))
}

fn card(view: &ProductCardView) -> String {
    let mut header = view.title.clone();
    if let Some(badge) = view.badge {
        header.push_str(&format!("  [{badge}]"));
    }
    header.push_str(&format!("  ({})", view.id));

    let mut price = view.price.clone().unwrap_or_default();
    if let (Some(original), Some(discount)) = (&view.original_price, &view.discount) {
        price.push_str(&format!("  au lieu de {original} ({discount})"));
    }

    format!(
        "{header}\n  {}\n  {price}\n  {} couleurs",
        view.name,
        view.swatches.len()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use larq_storefront::config::StorefrontConfig;
    use larq_storefront::storage::MemoryStorage;

    use super::*;

    fn shop() -> Storefront<MemoryStorage> {
        Storefront::new(StorefrontConfig::default(), MemoryStorage::new())
    }

    #[test]
    fn test_list_featured() {
        let output = list(&shop(), Some("featured"));
        assert!(output.contains("LARQ BLEU  [Nouveau]  (bottle-swig-top)"));
        assert!(output.contains("LARQ VIOLETTE"));
        assert!(!output.contains("LARQ DORE"));
        assert!(output.contains("€100.00  au lieu de €140.00 (-29%)"));
    }

    #[test]
    fn test_list_empty_category() {
        let output = list(&shop(), Some("pitchers"));
        assert!(output.starts_with("Aucun produit"));
        assert!(output.contains("featured, smart, filtration, everyday, pitchers"));
    }

    #[test]
    fn test_show_product() {
        let output = show(&shop(), "bottle-filtered-flip-top").unwrap();
        assert!(output.contains("LARQ ROSE"));
        assert!(output.contains("  Granite White (#F5F5DC)"));
        assert!(output.contains("  2L - €100.00"));
        assert!(output.contains("Caractéristiques : Filtration"));
    }

    #[test]
    fn test_show_unknown_product() {
        let err = show(&shop(), "bottle-unknown").unwrap_err();
        assert_eq!(err.user_message(), "Produit introuvable");
    }
}
