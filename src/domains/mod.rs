//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: the product record and the storage capability
//! - **tools**: the MCP tools that search and extend the catalog

pub mod catalog;
pub mod tools;
