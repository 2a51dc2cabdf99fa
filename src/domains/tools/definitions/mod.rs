//! Tool definitions module.
//!
//! One file per tool. Each tool declares its name, description and
//! parameter schema, and provides the handler the registry dispatches to.

pub mod create_product;
pub mod search_product;

pub use create_product::{CreateProductParams, CreateProductTool};
pub use search_product::{SearchAction, SearchProductTool, SearchRequest};
