//! Static product catalog.
//!
//! Products are loaded once and never mutated. Filtering is category-tag
//! equality, with one twist: the `featured` tab also shows every product
//! flagged as new.

use larq_core::{CategoryId, CurrencyCode, HexColor, Price, ProductId};

use crate::models::LineDescriptor;

/// Category tag whose listing also includes new products.
pub const FEATURED: &str = "featured";

/// A colour variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductColor {
    pub name: String,
    pub hex: HexColor,
    pub image: Option<String>,
}

/// A size variant with its price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSize {
    /// Volume label, e.g. `2L`.
    pub volume: String,
    pub price: Price,
    /// Pre-discount price shown struck through.
    pub original_price: Option<Price>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Marketing name shown on cards, e.g. `LARQ DORE`.
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub is_new: bool,
    pub colors: Vec<ProductColor>,
    pub sizes: Vec<ProductSize>,
    pub features: Vec<String>,
    pub category: CategoryId,
    pub image_path: Option<String>,
}

impl Product {
    /// The colour preselected on product cards.
    #[must_use]
    pub fn default_color(&self) -> Option<&ProductColor> {
        self.colors.first()
    }

    /// The size preselected on product cards.
    #[must_use]
    pub fn default_size(&self) -> Option<&ProductSize> {
        self.sizes.first()
    }

    #[must_use]
    pub fn color(&self, name: &str) -> Option<&ProductColor> {
        self.colors.iter().find(|color| color.name == name)
    }

    #[must_use]
    pub fn size(&self, volume: &str) -> Option<&ProductSize> {
        self.sizes.iter().find(|size| size.volume == volume)
    }

    /// Card title: the marketing name, or `LARQ BOTTLE {COLOUR}` built from
    /// the default colour.
    #[must_use]
    pub fn display_title(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }

        self.default_color().map_or_else(
            || self.name.clone(),
            |color| format!("LARQ BOTTLE {}", color.name.to_uppercase()),
        )
    }

    /// Build the add-to-cart descriptor for a variant, copying the current
    /// prices. `None` if the product has no such colour or size.
    #[must_use]
    pub fn descriptor(&self, color: &str, size: &str) -> Option<LineDescriptor> {
        let color = self.color(color)?;
        let size = self.size(size)?;

        Some(LineDescriptor {
            product_id: self.id.clone(),
            product_name: self.name.clone(),
            color: color.name.clone(),
            size: size.volume.clone(),
            price: size.price,
            original_price: size.original_price,
            image_path: self.image_path.clone(),
        })
    }

    /// Descriptor for the default colour and size, as the one-click
    /// "Ajouter au panier" button sends it.
    #[must_use]
    pub fn default_descriptor(&self) -> Option<LineDescriptor> {
        let color = self.default_color()?;
        let size = self.default_size()?;
        self.descriptor(&color.name, &size.volume)
    }
}

/// A filter tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

/// An immutable, ordered product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    currency: CurrencyCode,
}

impl Catalog {
    /// Build a catalog from explicit data.
    #[must_use]
    pub const fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            products,
            categories,
            currency,
        }
    }

    /// The LARQ bottle range, priced in `currency`.
    #[must_use]
    pub fn larq(currency: CurrencyCode) -> Self {
        let two_litre = || ProductSize {
            volume: "2L".to_string(),
            price: Price::whole(100, currency),
            original_price: Some(Price::whole(140, currency)),
        };

        let products = vec![
            Product {
                id: ProductId::new("bottle-swig-top"),
                name: "LARQ Bottle Swig Top".to_string(),
                display_name: Some("LARQ BLEU".to_string()),
                description: None,
                is_new: true,
                colors: swatches(&[
                    ("Amalfi Blue", "#4A90E2"),
                    ("Black", "#000000"),
                    ("Eucalyptus Green", "#2D5016"),
                    ("White", "#FFFFFF"),
                    ("Yellow", "#FFD700"),
                    ("Orange", "#FF8C00"),
                    ("Light Brown", "#D2B48C"),
                    ("Light Purple", "#DDA0DD"),
                    ("Light Blue", "#87CEEB"),
                ]),
                sizes: vec![two_litre()],
                features: vec!["À utiliser tous les jours".to_string()],
                category: CategoryId::new(FEATURED),
                image_path: Some("/images/generated-image.png".to_string()),
            },
            Product {
                id: ProductId::new("bottle-filtered-swig-top"),
                name: "LARQ Bottle Filtered Swig Top".to_string(),
                display_name: Some("LARQ VIOLETTE".to_string()),
                description: None,
                is_new: true,
                colors: swatches(&[
                    ("Eucalyptus Green", "#2D5016"),
                    ("Black", "#000000"),
                    ("White", "#FFFFFF"),
                    ("Yellow", "#FFD700"),
                    ("Orange", "#FF8C00"),
                    ("Light Brown", "#D2B48C"),
                    ("Light Purple", "#DDA0DD"),
                    ("Light Blue", "#87CEEB"),
                ]),
                sizes: vec![two_litre()],
                features: vec!["Filtration".to_string()],
                category: CategoryId::new("filtration"),
                image_path: Some("/images/generated-image (1).png".to_string()),
            },
            Product {
                id: ProductId::new("bottle-purevis"),
                name: "LARQ Bottle PureVis™".to_string(),
                display_name: Some("LARQ DORE".to_string()),
                description: None,
                is_new: false,
                colors: swatches(&[
                    ("Granite White", "#F5F5DC"),
                    ("Dark Blue", "#1A3A5C"),
                    ("Black", "#000000"),
                    ("Light Blue", "#87CEEB"),
                    ("Pink", "#FFB6C1"),
                ]),
                sizes: vec![two_litre()],
                features: vec!["Autonettoyante".to_string()],
                category: CategoryId::new("smart"),
                image_path: Some("/images/generated-image (5).png".to_string()),
            },
            Product {
                id: ProductId::new("bottle-filtered-flip-top"),
                name: "LARQ Bottle Filtered Flip Top".to_string(),
                display_name: Some("LARQ ROSE".to_string()),
                description: None,
                is_new: false,
                colors: swatches(&[("Granite White", "#F5F5DC"), ("Black", "#000000")]),
                sizes: vec![two_litre()],
                features: vec!["Filtration".to_string()],
                category: CategoryId::new("filtration"),
                image_path: Some("/images/generated-image (6).png".to_string()),
            },
        ];

        let categories = [
            (FEATURED, "En vedette"),
            ("smart", "Bouteilles intelligentes"),
            ("filtration", "Bouteilles de filtration"),
            ("everyday", "Everyday Drinkware"),
            ("pitchers", "Pichets"),
        ]
        .into_iter()
        .map(|(id, label)| Category {
            id: CategoryId::new(id),
            label: label.to_string(),
        })
        .collect();

        Self::new(products, categories, currency)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Filter tabs in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id.as_str() == id)
    }

    /// Products listed under a category tab, in catalog order.
    #[must_use]
    pub fn products_in(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| {
                product.category.as_str() == category || (category == FEATURED && product.is_new)
            })
            .collect()
    }
}

/// Build colour variants from `(name, #hex)` pairs, skipping malformed hex.
fn swatches(pairs: &[(&str, &str)]) -> Vec<ProductColor> {
    pairs
        .iter()
        .filter_map(|(name, hex)| {
            HexColor::parse(hex).ok().map(|hex| ProductColor {
                name: (*name).to_string(),
                hex,
                image: None,
            })
        })
        .collect()
}
