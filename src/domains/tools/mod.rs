//! Tools domain module.
//!
//! This module is the tool-invocation layer: it declares each tool's
//! parameters, validates agent-supplied arguments before any storage access,
//! translates them into catalog queries or writes, and renders the outcome
//! as text for a text-only caller.
//!
//! ## Architecture
//!
//! - `schema.rs` - Parameter descriptors and their JSON Schema rendering
//! - `validator.rs` - Argument validation collecting every violation
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `format.rs` - Table / count / failure text rendering
//! - `registry.rs` - Name -> {schema, handler} mapping and dispatch
//! - `router.rs` - rmcp ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with `NAME`, `schema()` and `handle()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::new()`
//!
//! The router and every transport pick it up from the registry.

pub mod definitions;
mod error;
pub mod format;
mod registry;
pub mod router;
pub mod schema;
pub mod validator;

pub use error::ToolError;
pub use registry::{RegisteredTool, ToolHandlerFn, ToolRegistry};
pub use router::build_tool_router;
pub use schema::{ParamSpec, PrimitiveType, ToolSchema};
pub use validator::{ValidatedArgs, ValidationFailure, Violation, validate};
