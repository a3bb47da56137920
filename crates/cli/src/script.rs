//! Draft scripts: a JSON description of a product that is replayed as
//! commands against a fresh [`ProductDraft`].

use std::path::Path;

use anyhow::{Context, bail};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use mockgen_catalog::{
    AddVariation, DraftCommand, EditSku, ProductDraft, SkuEdit, UpdateDetails, VariationAxis,
};
use mockgen_core::{Aggregate, ProductId};

use crate::config::CliConfig;

/// An edit aimed at the SKU whose labels equal `labels`.
///
/// SKU ids are redrawn on every build, so scripts address SKUs by their
/// combination instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptedSkuEdit {
    #[serde(rename = "match")]
    pub labels: Vec<String>,
    #[serde(flatten)]
    pub edit: SkuEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftScript {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub variations: Vec<VariationAxis>,
    pub sku_edits: Vec<ScriptedSkuEdit>,
}

impl DraftScript {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid draft script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read draft script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Replay details, variations and SKU edits, in that order.
    pub fn replay(&self, config: &CliConfig) -> anyhow::Result<ProductDraft> {
        let mut draft = ProductDraft::new(self.id.unwrap_or_default(), config.price_format());

        draft
            .execute(&DraftCommand::UpdateDetails(UpdateDetails {
                name: self.name.clone(),
                description: self.description.clone(),
                occurred_at: Utc::now(),
            }))
            .context("failed to set product details")?;

        for axis in &self.variations {
            draft
                .execute(&DraftCommand::AddVariation(AddVariation {
                    axis: axis.clone(),
                    occurred_at: Utc::now(),
                }))
                .with_context(|| format!("failed to add variation `{}`", axis.axis_type()))?;
        }

        for scripted in &self.sku_edits {
            let Some(sku) = draft.sku_by_labels(scripted.labels.as_slice()) else {
                bail!("no SKU matches {:?}", scripted.labels);
            };
            let sku_id = sku.sku_id;
            debug!(%sku_id, labels = ?scripted.labels, "applying scripted sku edit");

            draft
                .execute(&DraftCommand::EditSku(EditSku {
                    sku_id,
                    edit: scripted.edit.clone(),
                    occurred_at: Utc::now(),
                }))
                .with_context(|| format!("failed to edit SKU {:?}", scripted.labels))?;
        }

        info!(
            product_id = %draft.product().id,
            skus = draft.product().skus.len(),
            edits = self.sku_edits.len(),
            "draft replayed"
        );
        Ok(draft)
    }
}
