//! Process bootstrap: open storage, register modules, serve.

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::{modules, storage::Storage};

/// Build a registry with every module wired to `storage`.
pub fn build_registry(storage: &Storage) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, storage);
    registry
}

/// Run the HTTP service until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let storage = Storage::connect(&settings.database)
        .await
        .context("failed to open storage")?;
    let registry = build_registry(&storage);

    storage
        .ensure_schema(&registry.collect_schema())
        .await
        .context("failed to prepare database schema")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = shelf_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
