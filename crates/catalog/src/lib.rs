//! Catalog generation engine.
//!
//! Turns an ordered list of variation axes into a spec forest, flattens the
//! forest into one SKU per combination, and wraps both in a draft state
//! container that the front end drives with commands. Everything here is pure,
//! in-memory domain logic (no IO).

pub mod draft;
pub mod edit;
pub mod product;
pub mod sku;
pub mod spec;
pub mod variation;

pub use draft::{
    AddVariation, CatalogRegenerated, DetailsUpdated, DraftCommand, DraftEvent, EditSku,
    EditVariation, ProductDraft, RemoveVariation, SkuEdited, UpdateDetails, VariationAdded,
    VariationEdited, VariationRemoved,
};
pub use edit::{PriceFormat, SkuEdit};
pub use product::Product;
pub use sku::{Image, Installment, Sku, SkuIssue, flatten_to_skus, flatten_to_skus_with, sku_name};
pub use spec::{SpecNode, SpecPath, SpecStep, build_forest, spec_paths};
pub use variation::{VariationAxis, combination_count};
