// Documentation tools, one per markdown file in the content directory

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_empty, Tool, ToolRegistry};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use strands_docs_core::{read_document, Catalog, ContentItem};

/// Tool that returns the text of a single documentation file
pub struct DocumentationTool {
    item: ContentItem,
}

impl DocumentationTool {
    pub fn new(item: ContentItem) -> Self {
        Self { item }
    }
}

#[async_trait::async_trait]
impl Tool for DocumentationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.item.identifier().to_string(),
            description: self.item.description().to_string(),
            input_schema: json_schema_empty(),
        }
    }

    // Arguments are ignored; the file is read fresh on every call.
    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let text = read_document(self.item.path())
            .await
            .with_context(|| format!("Failed to load documentation '{}'", self.item.identifier()))?;

        Ok(CallToolResult::text(text))
    }
}

/// Register a documentation tool for every item in the catalog.
///
/// Items are registered in catalog order, so a later item with the same
/// identifier replaces an earlier one.
pub fn register_documentation(registry: &mut ToolRegistry, catalog: Catalog) {
    tracing::debug!(
        dir = %catalog.dir().display(),
        found = catalog.dir_found(),
        files = catalog.len(),
        "Registering documentation tools"
    );
    for item in catalog {
        let name = item.identifier().to_string();
        if registry
            .register(Arc::new(DocumentationTool::new(item)))
            .is_some()
        {
            tracing::debug!(tool = %name, "Replaced documentation tool with the same name");
        }
    }
}

/// Scan `content_dir` and build a registry holding its documentation tools.
pub fn documentation_registry(content_dir: &Path) -> ToolRegistry {
    let catalog = strands_docs_core::scan(content_dir);
    let mut registry = ToolRegistry::new();
    register_documentation(&mut registry, catalog);
    registry
}
