//! `mockgen` front end: replays a JSON draft script through a
//! [`ProductDraft`](mockgen_catalog::ProductDraft) and renders the result.

pub mod config;
pub mod render;
pub mod script;

pub use config::CliConfig;
pub use render::{render_product, render_sku_listing};
pub use script::{DraftScript, ScriptedSkuEdit};
