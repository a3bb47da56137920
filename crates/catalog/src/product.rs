use serde::{Deserialize, Serialize};

use mockgen_core::ProductId;

use crate::sku::{Image, Installment, Sku};
use crate::spec::SpecNode;

/// The exported mock product: details, spec forest and SKUs.
///
/// The top-level price fields and `images` are only filled by
/// [`Product::summarized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price_text: String,
    pub old_price_text: String,
    pub price: f64,
    pub old_price: f64,
    pub installment: Option<Installment>,
    pub images: Vec<Image>,
    pub specs: Vec<SpecNode>,
    pub skus: Vec<Sku>,
}

impl Product {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            price_text: String::new(),
            old_price_text: String::new(),
            price: 0.0,
            old_price: 0.0,
            installment: None,
            images: Vec::new(),
            specs: Vec::new(),
            skus: Vec::new(),
        }
    }

    /// First SKU with the strictly lowest price.
    pub fn cheapest_sku(&self) -> Option<&Sku> {
        self.skus
            .iter()
            .reduce(|cheapest, sku| if sku.price < cheapest.price { sku } else { cheapest })
    }

    /// Copy of the product with the cheapest SKU's pricing hoisted to the top
    /// level and every SKU image collected, in SKU order.
    pub fn summarized(&self) -> Self {
        let cheapest = self.cheapest_sku();
        let (price, price_text, old_price, old_price_text, installment) = match cheapest {
            Some(sku) => (
                sku.price,
                sku.price_text.clone(),
                sku.old_price,
                sku.old_price_text.clone(),
                sku.installment.clone(),
            ),
            None => (0.0, String::new(), 0.0, String::new(), None),
        };

        Self {
            price,
            price_text,
            old_price,
            old_price_text,
            installment,
            images: self
                .skus
                .iter()
                .flat_map(|sku| sku.images.iter().cloned())
                .collect(),
            ..self.clone()
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
