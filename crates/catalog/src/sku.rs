use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mockgen_core::{OfferId, ProductId};

use crate::spec::{SpecNode, SpecPath, spec_paths};

/// EANs are drawn uniformly from this range, so they always have 13 digits.
const EAN_RANGE: core::ops::Range<u64> = 1_000_000_000_000..9_999_999_999_999;

/// Installment plan shown next to a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub count: u32,
    pub value: f64,
    pub value_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub value: String,
}

/// One sellable variant: a single path through the spec forest plus its
/// editable commercial payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub original_product_id: ProductId,
    pub sku_id: OfferId,
    pub name: String,
    pub ean: String,
    pub price_text: String,
    pub old_price_text: String,
    pub price: f64,
    pub old_price: f64,
    pub installment: Option<Installment>,
    pub images: Vec<Image>,
    pub specs: Vec<SpecPath>,
}

/// Field a SKU still lacks before it is usable mock data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkuIssue {
    Price,
    Images,
}

impl core::fmt::Display for SkuIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SkuIssue::Price => f.write_str("price"),
            SkuIssue::Images => f.write_str("images"),
        }
    }
}

impl Sku {
    /// Fresh SKU for `path` with every commercial field at its zero value.
    pub fn base(product_id: ProductId, name: String, ean: String, path: SpecPath) -> Self {
        Self {
            original_product_id: product_id,
            sku_id: path.leaf().offer_id,
            name,
            ean,
            price_text: String::new(),
            old_price_text: String::new(),
            price: 0.0,
            old_price: 0.0,
            installment: None,
            images: Vec::new(),
            specs: vec![path],
        }
    }

    pub fn with_price(self, price: f64, price_text: String) -> Self {
        Self {
            price,
            price_text,
            ..self
        }
    }

    pub fn with_old_price(self, old_price: f64, old_price_text: String) -> Self {
        Self {
            old_price,
            old_price_text,
            ..self
        }
    }

    pub fn with_installment(self, installment: Option<Installment>) -> Self {
        Self {
            installment,
            ..self
        }
    }

    pub fn with_images(self, images: Vec<Image>) -> Self {
        Self { images, ..self }
    }

    pub fn path(&self) -> Option<&SpecPath> {
        self.specs.first()
    }

    /// Labels of the SKU's combination, outermost axis first.
    pub fn badges(&self) -> Vec<&str> {
        self.path().map(SpecPath::labels).unwrap_or_default()
    }

    pub fn issues(&self) -> Vec<SkuIssue> {
        let mut issues = Vec::new();
        if self.price == 0.0 {
            issues.push(SkuIssue::Price);
        }
        if self.images.is_empty() {
            issues.push(SkuIssue::Images);
        }
        issues
    }
}

/// `product_name` followed by every label of `path`, space separated and trimmed.
pub fn sku_name(product_name: &str, path: &SpecPath) -> String {
    let mut name = product_name.to_string();
    for label in path.labels() {
        name.push(' ');
        name.push_str(label);
    }
    name.trim().to_string()
}

fn generate_ean<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random_range(EAN_RANGE).to_string()
}

/// One base SKU per root-to-leaf path of `forest`, in forest order.
///
/// EANs are drawn from `rng`; everything else is derived from the inputs, so a
/// seeded generator makes the output reproducible.
pub fn flatten_to_skus_with<R: Rng + ?Sized>(
    forest: &[SpecNode],
    product_id: ProductId,
    product_name: &str,
    rng: &mut R,
) -> Vec<Sku> {
    let skus: Vec<Sku> = spec_paths(forest)
        .into_iter()
        .map(|path| {
            let name = sku_name(product_name, &path);
            Sku::base(product_id, name, generate_ean(rng), path)
        })
        .collect();

    debug!(%product_id, skus = skus.len(), "flattened spec forest");
    skus
}

/// [`flatten_to_skus_with`] using the thread-local generator.
pub fn flatten_to_skus(
    forest: &[SpecNode],
    product_id: ProductId,
    product_name: &str,
) -> Vec<Sku> {
    flatten_to_skus_with(forest, product_id, product_name, &mut rand::rng())
}
