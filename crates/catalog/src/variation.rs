use serde::{Deserialize, Serialize};

use mockgen_core::{DomainError, DomainResult};

/// One dimension of product variation (e.g. `color`) and its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationAxis {
    #[serde(rename = "type")]
    axis_type: String,
    values: Vec<String>,
}

impl VariationAxis {
    /// Build an axis as-is. No de-duplication or validation happens here; use
    /// [`VariationAxis::with_value`] and [`VariationAxis::validate`] for form
    /// input.
    pub fn new<V>(axis_type: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<String>,
    {
        Self {
            axis_type: axis_type.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn axis_type(&self) -> &str {
        &self.axis_type
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Append a value unless it is empty or already present.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() && !self.values.contains(&value) {
            self.values.push(value);
        }
        self
    }

    /// Drop a value, keeping the order of the rest.
    pub fn without_value(mut self, value: &str) -> Self {
        self.values.retain(|v| v != value);
        self
    }

    /// Form-level requirements: a type and at least one value.
    pub fn validate(&self) -> DomainResult<()> {
        if self.axis_type.trim().is_empty() {
            return Err(DomainError::validation("variation type cannot be empty"));
        }
        if self.values.is_empty() {
            return Err(DomainError::validation(format!(
                "variation `{}` needs at least one value",
                self.axis_type
            )));
        }
        Ok(())
    }
}

/// Number of SKUs the axes expand to (product of value counts, zero without axes).
pub fn combination_count(axes: &[VariationAxis]) -> usize {
    if axes.is_empty() {
        return 0;
    }
    axes.iter().map(|axis| axis.values.len()).product()
}
