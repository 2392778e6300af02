pub mod models;
pub mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use shelf_kernel::{InitCtx, Module, TableDef};

use crate::storage::schema;

/// Authors module. Owns the `authors` table; it exposes no HTTP routes, authors
/// are created through the CLI.
pub struct AuthorsModule;

impl AuthorsModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for AuthorsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "first_name": { "type": "string", "maxLength": 55 },
                            "last_name": { "type": "string", "maxLength": 55, "nullable": true },
                            "email": { "type": "string", "format": "email", "maxLength": 255 }
                        },
                        "required": ["id", "first_name", "email"]
                    }
                }
            }
        }))
    }

    fn schema(&self) -> Vec<TableDef> {
        vec![TableDef {
            name: "authors",
            ddl: schema::CREATE_AUTHORS_TABLE,
        }]
    }
}

/// Create a new instance of the authors module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new())
}
