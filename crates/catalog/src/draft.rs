//! Draft state container.
//!
//! A [`ProductDraft`] owns everything the generator front end edits: product
//! details, the variation axes and the generated catalog. It is driven by
//! commands and evolves only through events, so the front end never mutates
//! the product record directly.
//!
//! Any change to the axes or to the product name rebuilds the spec forest and
//! the SKU list from scratch. Offer ids are redrawn on every rebuild, so SKU
//! edits made before such a change do not survive it.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use mockgen_core::{Aggregate, AggregateRoot, DomainError, Event, OfferId, ProductId};

use crate::edit::{PriceFormat, SkuEdit};
use crate::product::Product;
use crate::sku::{Sku, flatten_to_skus};
use crate::spec::{SpecNode, build_forest};
use crate::variation::VariationAxis;

/// Aggregate root: ProductDraft.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    product: Product,
    variations: Vec<VariationAxis>,
    price_format: PriceFormat,
    version: u64,
}

impl ProductDraft {
    pub fn new(id: ProductId, price_format: PriceFormat) -> Self {
        Self {
            product: Product::new(id),
            variations: Vec::new(),
            price_format,
            version: 0,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn variations(&self) -> &[VariationAxis] {
        &self.variations
    }

    pub fn price_format(&self) -> &PriceFormat {
        &self.price_format
    }

    pub fn sku(&self, sku_id: OfferId) -> Option<&Sku> {
        self.product.skus.iter().find(|sku| sku.sku_id == sku_id)
    }

    /// SKU whose badges equal `labels` (outermost axis first).
    pub fn sku_by_labels<S: AsRef<str>>(&self, labels: &[S]) -> Option<&Sku> {
        self.product.skus.iter().find(|sku| {
            let badges = sku.badges();
            badges.len() == labels.len()
                && badges.iter().zip(labels).all(|(badge, label)| *badge == label.as_ref())
        })
    }

    /// The "generate data" view: the product with cheapest-SKU pricing.
    pub fn export(&self) -> Product {
        self.product.summarized()
    }
}

impl AggregateRoot for ProductDraft {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: UpdateDetails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDetails {
    pub name: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddVariation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddVariation {
    pub axis: VariationAxis,
    pub occurred_at: DateTime<Utc>,
}

/// Command: EditVariation. `previous_type` names the axis being replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditVariation {
    pub previous_type: String,
    pub axis: VariationAxis,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveVariation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveVariation {
    pub axis_type: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: EditSku.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSku {
    pub sku_id: OfferId,
    pub edit: SkuEdit,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommand {
    UpdateDetails(UpdateDetails),
    AddVariation(AddVariation),
    EditVariation(EditVariation),
    RemoveVariation(RemoveVariation),
    EditSku(EditSku),
}

/// Event: DetailsUpdated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsUpdated {
    pub name: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: VariationAdded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationAdded {
    pub axis: VariationAxis,
    pub occurred_at: DateTime<Utc>,
}

/// Event: VariationEdited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationEdited {
    pub previous_type: String,
    pub axis: VariationAxis,
    pub occurred_at: DateTime<Utc>,
}

/// Event: VariationRemoved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationRemoved {
    pub axis_type: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CatalogRegenerated. Carries the freshly built forest and SKUs.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRegenerated {
    pub specs: Vec<SpecNode>,
    pub skus: Vec<Sku>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SkuEdited. Carries the SKU as it reads after the edit.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuEdited {
    pub sku: Sku,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftEvent {
    DetailsUpdated(DetailsUpdated),
    VariationAdded(VariationAdded),
    VariationEdited(VariationEdited),
    VariationRemoved(VariationRemoved),
    CatalogRegenerated(CatalogRegenerated),
    SkuEdited(SkuEdited),
}

impl Event for DraftEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DraftEvent::DetailsUpdated(_) => "catalog.draft.details_updated",
            DraftEvent::VariationAdded(_) => "catalog.draft.variation_added",
            DraftEvent::VariationEdited(_) => "catalog.draft.variation_edited",
            DraftEvent::VariationRemoved(_) => "catalog.draft.variation_removed",
            DraftEvent::CatalogRegenerated(_) => "catalog.draft.catalog_regenerated",
            DraftEvent::SkuEdited(_) => "catalog.draft.sku_edited",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DraftEvent::DetailsUpdated(e) => e.occurred_at,
            DraftEvent::VariationAdded(e) => e.occurred_at,
            DraftEvent::VariationEdited(e) => e.occurred_at,
            DraftEvent::VariationRemoved(e) => e.occurred_at,
            DraftEvent::CatalogRegenerated(e) => e.occurred_at,
            DraftEvent::SkuEdited(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ProductDraft {
    type Command = DraftCommand;
    type Event = DraftEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DraftEvent::DetailsUpdated(e) => {
                self.product.name = e.name.clone();
                self.product.description = e.description.clone();
            }
            DraftEvent::VariationAdded(e) => {
                self.variations.push(e.axis.clone());
            }
            DraftEvent::VariationEdited(e) => {
                if let Some(slot) = self
                    .variations
                    .iter_mut()
                    .find(|axis| axis.axis_type() == e.previous_type)
                {
                    *slot = e.axis.clone();
                }
            }
            DraftEvent::VariationRemoved(e) => {
                self.variations.retain(|axis| axis.axis_type() != e.axis_type);
            }
            DraftEvent::CatalogRegenerated(e) => {
                self.product.specs = e.specs.clone();
                self.product.skus = e.skus.clone();
            }
            DraftEvent::SkuEdited(e) => {
                if let Some(slot) = self
                    .product
                    .skus
                    .iter_mut()
                    .find(|sku| sku.sku_id == e.sku.sku_id)
                {
                    *slot = e.sku.clone();
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            DraftCommand::UpdateDetails(cmd) => self.handle_update_details(cmd),
            DraftCommand::AddVariation(cmd) => self.handle_add_variation(cmd),
            DraftCommand::EditVariation(cmd) => self.handle_edit_variation(cmd),
            DraftCommand::RemoveVariation(cmd) => self.handle_remove_variation(cmd),
            DraftCommand::EditSku(cmd) => self.handle_edit_sku(cmd),
        }
    }
}

impl ProductDraft {
    fn position_of(&self, axis_type: &str) -> Option<usize> {
        self.variations
            .iter()
            .position(|axis| axis.axis_type() == axis_type)
    }

    fn regenerate(
        &self,
        variations: &[VariationAxis],
        product_name: &str,
        occurred_at: DateTime<Utc>,
    ) -> DraftEvent {
        let specs = build_forest(variations);
        let skus = flatten_to_skus(&specs, self.product.id, product_name);
        info!(
            product_id = %self.product.id,
            axes = variations.len(),
            skus = skus.len(),
            "catalog regenerated"
        );
        DraftEvent::CatalogRegenerated(CatalogRegenerated {
            specs,
            skus,
            occurred_at,
        })
    }

    fn handle_update_details(&self, cmd: &UpdateDetails) -> Result<Vec<DraftEvent>, DomainError> {
        let mut events = vec![DraftEvent::DetailsUpdated(DetailsUpdated {
            name: cmd.name.clone(),
            description: cmd.description.clone(),
            occurred_at: cmd.occurred_at,
        })];

        // SKU names embed the product name; the description is not part of
        // the SKU identity.
        if cmd.name != self.product.name {
            events.push(self.regenerate(&self.variations, &cmd.name, cmd.occurred_at));
        } else {
            debug!(product_id = %self.product.id, "details updated without identity change");
        }

        Ok(events)
    }

    fn handle_add_variation(&self, cmd: &AddVariation) -> Result<Vec<DraftEvent>, DomainError> {
        cmd.axis.validate()?;

        if self.position_of(cmd.axis.axis_type()).is_some() {
            return Err(DomainError::conflict(format!(
                "variation `{}` already exists",
                cmd.axis.axis_type()
            )));
        }

        let mut variations = self.variations.clone();
        variations.push(cmd.axis.clone());

        Ok(vec![
            DraftEvent::VariationAdded(VariationAdded {
                axis: cmd.axis.clone(),
                occurred_at: cmd.occurred_at,
            }),
            self.regenerate(&variations, &self.product.name, cmd.occurred_at),
        ])
    }

    fn handle_edit_variation(&self, cmd: &EditVariation) -> Result<Vec<DraftEvent>, DomainError> {
        cmd.axis.validate()?;

        let index = self.position_of(&cmd.previous_type).ok_or_else(|| {
            DomainError::not_found(format!("variation `{}`", cmd.previous_type))
        })?;

        if let Some(other) = self.position_of(cmd.axis.axis_type()) {
            if other != index {
                return Err(DomainError::conflict(format!(
                    "variation `{}` already exists",
                    cmd.axis.axis_type()
                )));
            }
        }

        let mut variations = self.variations.clone();
        variations[index] = cmd.axis.clone();

        Ok(vec![
            DraftEvent::VariationEdited(VariationEdited {
                previous_type: cmd.previous_type.clone(),
                axis: cmd.axis.clone(),
                occurred_at: cmd.occurred_at,
            }),
            self.regenerate(&variations, &self.product.name, cmd.occurred_at),
        ])
    }

    fn handle_remove_variation(
        &self,
        cmd: &RemoveVariation,
    ) -> Result<Vec<DraftEvent>, DomainError> {
        let index = self
            .position_of(&cmd.axis_type)
            .ok_or_else(|| DomainError::not_found(format!("variation `{}`", cmd.axis_type)))?;

        let mut variations = self.variations.clone();
        variations.remove(index);

        Ok(vec![
            DraftEvent::VariationRemoved(VariationRemoved {
                axis_type: cmd.axis_type.clone(),
                occurred_at: cmd.occurred_at,
            }),
            self.regenerate(&variations, &self.product.name, cmd.occurred_at),
        ])
    }

    fn handle_edit_sku(&self, cmd: &EditSku) -> Result<Vec<DraftEvent>, DomainError> {
        let sku = self
            .sku(cmd.sku_id)
            .ok_or_else(|| DomainError::not_found(format!("sku {}", cmd.sku_id)))?;

        let edited = cmd.edit.apply_to(sku, &self.price_format)?;

        Ok(vec![DraftEvent::SkuEdited(SkuEdited {
            sku: edited,
            occurred_at: cmd.occurred_at,
        })])
    }
}
