pub mod docs;
mod registry;

pub use docs::{documentation_registry, register_documentation, DocumentationTool};
pub use registry::{json_schema_empty, json_schema_object, Tool, ToolRegistry};
