//! Search product tool definition.
//!
//! Turns a validated search request into a storage predicate plus an
//! action, runs it, and renders the outcome as a table or a count.

use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::catalog::{CatalogStore, Predicate, TextField};
use crate::domains::tools::format::{count_text, entries_table, error_result, success_result};
use crate::domains::tools::schema::{ParamSpec, ToolSchema};
use crate::domains::tools::validator::ValidatedArgs;
use rmcp::model::CallToolResult;

// ============================================================================
// Tool Parameters
// ============================================================================

/// What the search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAction {
    /// Every matching entry.
    Enumerate,
    /// Only the number of matching entries.
    Count,
}

/// Validated parameters of `search-product`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub action: SearchAction,

    #[serde(default)]
    pub search_term: Option<String>,

    #[serde(default)]
    pub field: Option<TextField>,
}

impl SearchRequest {
    /// Map the request to the storage predicate and the action to run.
    ///
    /// A blank term is treated as no term at all. Any other term is matched
    /// as given, surrounding whitespace included.
    pub fn translate(&self) -> (Predicate, SearchAction) {
        let term = self
            .search_term
            .as_deref()
            .filter(|t| !t.trim().is_empty());

        let predicate = match (term, self.field) {
            (Some(term), Some(field)) => Predicate::contains(field, term),
            (Some(term), None) => Predicate::contains_any(term),
            (None, _) => Predicate::MatchAll,
        };
        (predicate, self.action)
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Search product tool - finds or counts catalog entries by substring.
pub struct SearchProductTool;

impl SearchProductTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search-product";

    /// Human-readable title.
    pub const TITLE: &'static str = "Search Product";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the product catalog. Use action \"enumerate\" \
         to list matching products as a table (ID, SKU, Name, Category, Price, Stock, Status), \
         or \"count\" to get the number of matches. The search term is matched \
         case-insensitively as a substring against name, description, sku and category, or \
         against a single field when one is given. \"count\" without a search term counts \
         every product.";

    /// Declared parameters.
    pub fn schema() -> ToolSchema {
        ToolSchema::new()
            .param(
                ParamSpec::string(
                    "action",
                    "\"enumerate\" lists matching products, \"count\" returns how many match.",
                )
                .required()
                .one_of(&["enumerate", "count"]),
            )
            .param(ParamSpec::string(
                "searchTerm",
                "The keyword or value to search for. Required for \"enumerate\".",
            ))
            .param(
                ParamSpec::string(
                    "field",
                    "Optional: search only this field. Leave empty to search all fields.",
                )
                .nullable()
                .one_of(&["name", "description", "sku", "category"]),
            )
            .required_if("searchTerm", "action", json!("enumerate"))
    }

    /// Handler registered with the tool registry.
    pub fn handle(args: ValidatedArgs, store: &dyn CatalogStore) -> CallToolResult {
        match args.into_typed::<SearchRequest>(Self::NAME) {
            Ok(request) => Self::execute(&request, store),
            Err(e) => error_result(e.to_string()),
        }
    }

    /// Run a validated search against the store.
    #[instrument(skip_all, fields(action = ?request.action, field = ?request.field))]
    pub fn execute(request: &SearchRequest, store: &dyn CatalogStore) -> CallToolResult {
        let (predicate, action) = request.translate();
        info!("Search product tool called: {:?}", predicate);

        match action {
            SearchAction::Count => match store.count(&predicate) {
                Ok(count) => {
                    info!("Counted {} matching products", count);
                    success_result(count_text(count))
                }
                Err(e) => error_result(format!("Error searching products: {}", e)),
            },
            SearchAction::Enumerate => match store.find(&predicate) {
                Ok(entries) => {
                    info!("Found {} matching products", entries.len());
                    success_result(entries_table(&entries))
                }
                Err(e) => error_result(format!("Error searching products: {}", e)),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::{MemoryCatalogStore, NewCatalogEntry};
    use crate::domains::tools::format::NO_PRODUCTS_FOUND;
    use rmcp::model::RawContent;

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn request(action: SearchAction, term: Option<&str>, field: Option<TextField>) -> SearchRequest {
        SearchRequest {
            action,
            search_term: term.map(str::to_string),
            field,
        }
    }

    fn seeded_store() -> MemoryCatalogStore {
        let store = MemoryCatalogStore::new();
        store
            .create(
                NewCatalogEntry::new("Smartphone X", 699.0, "PRD-0001-ELEC")
                    .with_category("Electronics")
                    .with_stock(10),
            )
            .unwrap();
        store
            .create(
                NewCatalogEntry::new("Cotton Shirt", 19.5, "PRD-0002-CLTH")
                    .with_category("Clothing")
                    .with_description("Pairs well with consumer electronics"),
            )
            .unwrap();
        store
            .create(
                NewCatalogEntry::new("Headphones", 89.99, "PRD-0003-ELEC")
                    .with_category("electronics")
                    .with_active(false)
                    .with_stock(3),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_translate_field_scoped() {
        let (predicate, action) =
            request(SearchAction::Enumerate, Some("abc"), Some(TextField::Sku)).translate();
        assert_eq!(predicate, Predicate::contains(TextField::Sku, "abc"));
        assert_eq!(action, SearchAction::Enumerate);
    }

    #[test]
    fn test_translate_all_fields() {
        let (predicate, _) = request(SearchAction::Count, Some("abc"), None).translate();
        assert_eq!(predicate, Predicate::contains_any("abc"));
    }

    #[test]
    fn test_translate_no_term_matches_all() {
        let (predicate, action) = request(SearchAction::Count, None, Some(TextField::Name)).translate();
        assert_eq!(predicate, Predicate::MatchAll);
        assert_eq!(action, SearchAction::Count);

        let (blank, _) = request(SearchAction::Count, Some("   "), None).translate();
        assert_eq!(blank, Predicate::MatchAll);
    }

    #[test]
    fn test_translate_keeps_surrounding_whitespace() {
        let (predicate, _) =
            request(SearchAction::Count, Some("Home "), Some(TextField::Category)).translate();
        assert_eq!(predicate, Predicate::contains(TextField::Category, "Home "));

        let store = MemoryCatalogStore::new();
        store
            .create(NewCatalogEntry::new("Vase", 12.0, "V-1").with_category("Homeware"))
            .unwrap();
        let result = SearchProductTool::execute(
            &request(SearchAction::Count, Some("Home "), Some(TextField::Category)),
            &store,
        );
        assert_eq!(text(&result), "Total products found: 0");
    }

    #[test]
    fn test_count_by_category() {
        let store = seeded_store();
        let result = SearchProductTool::execute(
            &request(SearchAction::Count, Some("Electronics"), Some(TextField::Category)),
            &store,
        );
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(text(&result), "Total products found: 2");
    }

    #[test]
    fn test_count_all_fields() {
        let store = seeded_store();
        let result =
            SearchProductTool::execute(&request(SearchAction::Count, Some("electronics"), None), &store);
        // two by category, one by description
        assert_eq!(text(&result), "Total products found: 3");
    }

    #[test]
    fn test_count_without_term() {
        let store = seeded_store();
        let result = SearchProductTool::execute(&request(SearchAction::Count, None, None), &store);
        assert_eq!(text(&result), "Total products found: 3");
    }

    #[test]
    fn test_enumerate_renders_table() {
        let store = seeded_store();
        let result = SearchProductTool::execute(
            &request(SearchAction::Enumerate, Some("PRD-0003"), Some(TextField::Sku)),
            &store,
        );
        let text = text(&result);
        assert!(text.starts_with("| ID | SKU | Name | Category | Price | Stock | Status |"));
        assert!(text.contains("| 3 | PRD-0003-ELEC | Headphones | electronics | 89.99 | 3 | Inactive |"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_enumerate_empty_is_guidance() {
        let store = seeded_store();
        let result = SearchProductTool::execute(
            &request(SearchAction::Enumerate, Some("zzz-nonexistent"), None),
            &store,
        );
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(text(&result), NO_PRODUCTS_FOUND);
    }

    #[test]
    fn test_request_deserializes_from_wire_names() {
        let request: SearchRequest = serde_json::from_value(json!({
            "action": "enumerate",
            "searchTerm": "mouse",
            "field": "name"
        }))
        .unwrap();
        assert_eq!(request.action, SearchAction::Enumerate);
        assert_eq!(request.search_term.as_deref(), Some("mouse"));
        assert_eq!(request.field, Some(TextField::Name));
    }
}
