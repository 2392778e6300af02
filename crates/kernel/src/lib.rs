//! Kernel for shelf: layered settings, the module contract, and the registry
//! that drives module lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, TableDef};
pub use registry::ModuleRegistry;
