//! Create product tool definition.
//!
//! Assembles a candidate catalog entry from validated arguments and hands it
//! to storage. SKU uniqueness is left entirely to the store; a rejection is
//! reported back as text instead of an error.

use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domains::catalog::{CatalogStore, NewCatalogEntry};
use crate::domains::tools::format::{
    PRODUCT_CREATED, create_failure_text, error_result, success_result,
};
use crate::domains::tools::schema::{ParamSpec, ToolSchema};
use crate::domains::tools::validator::ValidatedArgs;
use rmcp::model::CallToolResult;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Validated parameters of `create-product`. Defaults are already applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductParams {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: u64,
    #[serde(default)]
    pub category: Option<String>,
    pub sku: String,
    #[serde(default)]
    pub image: Option<String>,
    pub is_active: bool,
}

impl From<CreateProductParams> for NewCatalogEntry {
    fn from(params: CreateProductParams) -> Self {
        NewCatalogEntry {
            name: params.name,
            description: params.description,
            price: params.price,
            stock: params.stock,
            category: params.category,
            sku: params.sku,
            image: params.image,
            is_active: params.is_active,
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create product tool - adds one entry to the catalog.
pub struct CreateProductTool;

impl CreateProductTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create-product";

    /// Human-readable title.
    pub const TITLE: &'static str = "Create Product";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new product in the catalog. name, price and \
         sku are required; the sku must be unique. price must be a plain non-negative number \
         without currency symbols or thousands separators (convert \"Rp 50.000\" to 50000). \
         stock must be a whole number and defaults to 0; is_active defaults to true.";

    /// Declared parameters.
    pub fn schema() -> ToolSchema {
        ToolSchema::new()
            .param(ParamSpec::string("name", "The name of the product to create.").required())
            .param(
                ParamSpec::string("description", "The description of the product to create.")
                    .nullable(),
            )
            .param(
                ParamSpec::number(
                    "price",
                    "The price of the product, as a plain number without currency symbol.",
                )
                .required()
                .minimum(0.0),
            )
            .param(
                ParamSpec::integer("stock", "The stock quantity of the product to create.")
                    .nullable()
                    .minimum(0.0)
                    .default_value(json!(0)),
            )
            .param(
                ParamSpec::string("category", "The category of the product to create.")
                    .nullable(),
            )
            .param(
                ParamSpec::string("sku", "The unique SKU (stock keeping unit) of the product.")
                    .required(),
            )
            .param(
                ParamSpec::string("image", "The image URL or path of the product to create.")
                    .nullable(),
            )
            .param(
                ParamSpec::boolean("is_active", "Whether the product is active for sale.")
                    .nullable()
                    .default_value(json!(true)),
            )
    }

    /// Handler registered with the tool registry.
    pub fn handle(args: ValidatedArgs, store: &dyn CatalogStore) -> CallToolResult {
        match args.into_typed::<CreateProductParams>(Self::NAME) {
            Ok(params) => Self::execute(params, store),
            Err(e) => error_result(e.to_string()),
        }
    }

    /// Create the entry in the store.
    #[instrument(skip_all, fields(sku = %params.sku))]
    pub fn execute(params: CreateProductParams, store: &dyn CatalogStore) -> CallToolResult {
        info!("Create product tool called for: {}", params.name);

        let sku = params.sku.clone();
        match store.create(params.into()) {
            Ok(id) => {
                info!("Created product {} with SKU {}", id, sku);
                success_result(PRODUCT_CREATED)
            }
            Err(e) => {
                warn!("Failed to create product with SKU {}: {}", sku, e);
                error_result(create_failure_text(&e, &sku))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::{MemoryCatalogStore, Predicate, TextField};
    use rmcp::model::RawContent;

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn params(sku: &str) -> CreateProductParams {
        CreateProductParams {
            name: "Desk Chair".to_string(),
            description: Some("Mesh back".to_string()),
            price: 129.0,
            stock: 4,
            category: Some("Home & Garden".to_string()),
            sku: sku.to_string(),
            image: None,
            is_active: true,
        }
    }

    #[test]
    fn test_create_success() {
        let store = MemoryCatalogStore::new();
        let result = CreateProductTool::execute(params("CHAIR-01"), &store);
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(text(&result), PRODUCT_CREATED);

        let stored = store
            .find(&Predicate::contains(TextField::Sku, "CHAIR-01"))
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].description.as_deref(), Some("Mesh back"));
    }

    #[test]
    fn test_duplicate_sku_is_reported_as_text() {
        let store = MemoryCatalogStore::new();
        CreateProductTool::execute(params("CHAIR-01"), &store);
        let result = CreateProductTool::execute(params("CHAIR-01"), &store);
        assert!(result.is_error.unwrap_or(false));
        assert!(text(&result).contains("SKU 'CHAIR-01' is already taken"));
        assert_eq!(store.count(&Predicate::MatchAll).unwrap(), 1);
    }

    #[test]
    fn test_params_into_entry() {
        let entry: NewCatalogEntry = params("X-1").into();
        assert_eq!(entry.sku, "X-1");
        assert_eq!(entry.stock, 4);
        assert!(entry.is_active);
        assert!(entry.image.is_none());
    }

    #[test]
    fn test_schema_requires_name_price_sku() {
        let required: Vec<_> = CreateProductTool::schema()
            .params()
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        assert_eq!(required, vec!["name", "price", "sku"]);
    }
}
