use anyhow::Context;

use mockgen_catalog::ProductDraft;

/// The exported product (cheapest-SKU summary applied) as JSON.
pub fn render_product(draft: &ProductDraft, compact: bool) -> anyhow::Result<String> {
    let product = draft.export();
    let json = if compact {
        serde_json::to_string(&product)
    } else {
        product.to_json_pretty()
    };
    json.context("failed to serialize product")
}

/// One line per SKU: name, badges, and what is still missing.
pub fn render_sku_listing(draft: &ProductDraft) -> String {
    let skus = &draft.product().skus;
    if skus.is_empty() {
        return "SKUs will be generated after adding the variation list.\n".to_string();
    }

    let mut out = String::new();
    for sku in skus {
        let issues = sku.issues();
        let status = if issues.is_empty() {
            "ok".to_string()
        } else {
            let missing: Vec<String> = issues.iter().map(ToString::to_string).collect();
            format!("missing {}", missing.join(", "))
        };
        out.push_str(&format!(
            "{}\t[{}]\t{}\t{}\n",
            sku.name,
            sku.badges().join(", "),
            sku.sku_id,
            status
        ));
    }
    out
}
