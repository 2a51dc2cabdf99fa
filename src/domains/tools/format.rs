//! Response formatting for tool results.
//!
//! Every tool answers with plain text. Result sets become a Markdown table
//! with a fixed set of columns; failures become a single readable message.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use super::validator::ValidationFailure;
use crate::domains::catalog::{CatalogEntry, StoreError};

/// Reply to an `enumerate` search that matched nothing.
pub const NO_PRODUCTS_FOUND: &str = "No products found matching your criteria. \
     Try a broader search term, search all fields, or check the spelling.";

/// Reply to a successful create.
pub const PRODUCT_CREATED: &str = "Product created successfully.";

const TABLE_HEADER: &str = "| ID | SKU | Name | Category | Price | Stock | Status |";
const TABLE_RULE: &str = "| --- | --- | --- | --- | ---: | ---: | --- |";

/// `count` action reply.
pub fn count_text(count: u64) -> String {
    format!("Total products found: {}", count)
}

/// Render entries as a Markdown table, or the guidance text when empty.
pub fn entries_table(entries: &[CatalogEntry]) -> String {
    if entries.is_empty() {
        return NO_PRODUCTS_FOUND.to_string();
    }

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(TABLE_HEADER.to_string());
    lines.push(TABLE_RULE.to_string());
    for entry in entries {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {} |",
            entry.id,
            cell(&entry.sku),
            cell(&entry.name),
            entry.category.as_deref().map(cell).unwrap_or_else(|| "-".to_string()),
            format_price(entry.price),
            entry.stock,
            status_label(entry),
        ));
    }
    lines.join("\n")
}

/// Price with two decimals and no currency symbol.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// "Active" / "Inactive", plus "Out of Stock" when the stock is zero.
pub fn status_label(entry: &CatalogEntry) -> String {
    let activity = if entry.is_active { "Active" } else { "Inactive" };
    if entry.is_out_of_stock() {
        format!("{}, Out of Stock", activity)
    } else {
        activity.to_string()
    }
}

/// Caller-facing text for a failed create.
pub fn create_failure_text(error: &StoreError, sku: &str) -> String {
    match error {
        StoreError::UniqueViolation { field } if field == "sku" => format!(
            "Error creating product: the SKU '{}' is already taken. \
             SKUs must be unique; choose a different SKU and try again.",
            sku
        ),
        StoreError::UniqueViolation { field } => format!(
            "Error creating product: the value for '{}' must be unique and is already taken.",
            field
        ),
        other => format!("Error creating product: {}", other),
    }
}

/// Caller-facing text for a validation failure.
pub fn validation_failure_text(tool: &str, failure: &ValidationFailure) -> String {
    let mut text = format!("Invalid arguments for {}:", tool);
    for violation in failure.violations() {
        text.push_str("\n- ");
        text.push_str(&violation.to_string());
    }
    text
}

/// Create a success result with text content.
pub fn success_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Create an error result with a text message.
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    let message = message.into();
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}

/// Keep a value on one table row.
fn cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}
