//! Per-SKU edits (price, old price, installment, images).

use serde::{Deserialize, Serialize};

use mockgen_core::{DomainError, DomainResult};

use crate::sku::{Image, Installment, Sku};

/// How amounts are rendered into the `*Text` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    pub symbol: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
        }
    }
}

impl PriceFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// `"<symbol> <raw>"` with the decimal point written as a comma.
    pub fn format(&self, raw: &str) -> String {
        format!("{} {}", self.symbol, raw.trim().replacen('.', ",", 1))
    }
}

/// A user-entered amount without surrounding blanks or a leading `$`.
fn normalize_amount(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('$').unwrap_or(trimmed)
}

fn parse_amount(raw: &str, field: &str) -> DomainResult<f64> {
    let value: f64 = normalize_amount(raw)
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} `{raw}` is not a number")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative amount"
        )));
    }
    Ok(value)
}

/// Form values for editing one SKU. Amounts stay as the user typed them so
/// the `*Text` fields can echo them back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkuEdit {
    pub price: String,
    pub old_price: String,
    pub installment_count: u32,
    pub installment_price: String,
    pub images: Vec<String>,
}

impl SkuEdit {
    /// Prefill the form from a SKU's current values.
    pub fn from_sku(sku: &Sku) -> Self {
        Self {
            price: sku.price.to_string(),
            old_price: sku.old_price.to_string(),
            installment_count: sku.installment.as_ref().map_or(0, |i| i.count),
            installment_price: sku
                .installment
                .as_ref()
                .map_or(0.0, |i| i.value)
                .to_string(),
            images: sku.images.iter().map(|image| image.value.clone()).collect(),
        }
    }

    /// A positive price and at least one non-blank image are required.
    pub fn validate(&self) -> DomainResult<()> {
        if parse_amount(&self.price, "price")? <= 0.0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }
        if self.images.is_empty() {
            return Err(DomainError::validation("at least one image is required"));
        }
        if self.images.iter().any(|url| url.trim().is_empty()) {
            return Err(DomainError::validation("image urls cannot be blank"));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// New SKU carrying this edit; identity and specs are kept from `sku`.
    ///
    /// An installment count of zero clears the installment. A blank old price
    /// becomes `0` with an empty text.
    pub fn apply_to(&self, sku: &Sku, format: &PriceFormat) -> DomainResult<Sku> {
        self.validate()?;

        let price = parse_amount(&self.price, "price")?;
        let (old_price, old_price_text) = if self.old_price.trim().is_empty() {
            (0.0, String::new())
        } else {
            (
                parse_amount(&self.old_price, "old price")?,
                format.format(normalize_amount(&self.old_price)),
            )
        };
        let installment = if self.installment_count == 0 {
            None
        } else {
            Some(Installment {
                count: self.installment_count,
                value: parse_amount(&self.installment_price, "installment price")?,
                value_text: format.format(normalize_amount(&self.installment_price)),
            })
        };
        let images = self
            .images
            .iter()
            .map(|url| Image {
                value: url.trim().to_string(),
            })
            .collect();

        Ok(sku
            .clone()
            .with_price(price, format.format(normalize_amount(&self.price)))
            .with_old_price(old_price, old_price_text)
            .with_installment(installment)
            .with_images(images))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sku::flatten_to_skus;
    use crate::spec::build_forest;
    use crate::variation::VariationAxis;
    use mockgen_core::ProductId;

    fn base_sku() -> Sku {
        let forest = build_forest(&[VariationAxis::new("color", ["red"])]);
        flatten_to_skus(&forest, ProductId::new(), "Shirt").remove(0)
    }

    fn valid_edit() -> SkuEdit {
        SkuEdit {
            price: "19.90".to_string(),
            old_price: "24.90".to_string(),
            installment_count: 3,
            installment_price: "6.63".to_string(),
            images: vec!["https://img.example/red.png".to_string()],
        }
    }

    #[test]
    fn format_uses_symbol_and_decimal_comma() {
        let format = PriceFormat::default();
        assert_eq!(format.format("19.90"), "R$ 19,90");
        assert_eq!(format.format("7"), "R$ 7");
        assert_eq!(PriceFormat::new("US$").format("1.5"), "US$ 1,5");
    }

    #[test]
    fn apply_sets_prices_installment_and_images() {
        let sku = base_sku();
        let edited = valid_edit().apply_to(&sku, &PriceFormat::default()).unwrap();

        assert_eq!(edited.sku_id, sku.sku_id);
        assert_eq!(edited.name, sku.name);
        assert_eq!(edited.ean, sku.ean);
        assert_eq!(edited.specs, sku.specs);
        assert_eq!(edited.price, 19.9);
        assert_eq!(edited.price_text, "R$ 19,90");
        assert_eq!(edited.old_price, 24.9);
        assert_eq!(edited.old_price_text, "R$ 24,90");
        assert_eq!(
            edited.installment,
            Some(Installment {
                count: 3,
                value: 6.63,
                value_text: "R$ 6,63".to_string(),
            })
        );
        assert_eq!(edited.images.len(), 1);
        assert!(edited.issues().is_empty());
    }

    #[test]
    fn zero_installments_clear_the_plan() {
        let edit = SkuEdit {
            installment_count: 0,
            installment_price: String::new(),
            ..valid_edit()
        };
        let edited = edit.apply_to(&base_sku(), &PriceFormat::default()).unwrap();
        assert!(edited.installment.is_none());
    }

    #[test]
    fn blank_old_price_is_zero() {
        let edit = SkuEdit {
            old_price: " ".to_string(),
            ..valid_edit()
        };
        let edited = edit.apply_to(&base_sku(), &PriceFormat::default()).unwrap();
        assert_eq!(edited.old_price, 0.0);
        assert!(edited.old_price_text.is_empty());
    }

    #[test]
    fn rejects_zero_price() {
        let edit = SkuEdit {
            price: "0".to_string(),
            ..valid_edit()
        };
        assert!(!edit.is_valid());
        match edit.apply_to(&base_sku(), &PriceFormat::default()).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("greater than zero")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_or_blank_images() {
        let no_images = SkuEdit {
            images: Vec::new(),
            ..valid_edit()
        };
        assert!(!no_images.is_valid());

        let blank_image = SkuEdit {
            images: vec!["https://img.example/a.png".to_string(), "  ".to_string()],
            ..valid_edit()
        };
        assert!(!blank_image.is_valid());
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        let edit = SkuEdit {
            price: "cheap".to_string(),
            ..valid_edit()
        };
        match edit.validate().unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("cheap")),
            other => panic!("Expected Validation error, got {other:?}"),
        }

        let edit = SkuEdit {
            installment_price: "-1".to_string(),
            ..valid_edit()
        };
        assert!(edit.apply_to(&base_sku(), &PriceFormat::default()).is_err());
    }

    #[test]
    fn leading_dollar_is_accepted() {
        let edit = SkuEdit {
            price: "$12.5".to_string(),
            old_price: " $15.0".to_string(),
            installment_price: "$6.25".to_string(),
            ..valid_edit()
        };
        let edited = edit.apply_to(&base_sku(), &PriceFormat::default()).unwrap();
        assert_eq!(edited.price, 12.5);
        assert_eq!(edited.price_text, "R$ 12,5");
        assert_eq!(edited.old_price, 15.0);
        assert_eq!(edited.old_price_text, "R$ 15,0");
        let installment = edited.installment.unwrap();
        assert_eq!(installment.value, 6.25);
        assert_eq!(installment.value_text, "R$ 6,25");
    }

    #[test]
    fn prefill_reflects_current_values() {
        let edited = valid_edit()
            .apply_to(&base_sku(), &PriceFormat::default())
            .unwrap();
        let form = SkuEdit::from_sku(&edited);

        assert_eq!(form.price, "19.9");
        assert_eq!(form.old_price, "24.9");
        assert_eq!(form.installment_count, 3);
        assert_eq!(form.installment_price, "6.63");
        assert_eq!(form.images, ["https://img.example/red.png"]);

        let blank = SkuEdit::from_sku(&base_sku());
        assert_eq!(blank.price, "0");
        assert_eq!(blank.installment_count, 0);
        assert!(!blank.is_valid());
    }
}
