//! shelf application library
//!
//! Books and authors modules, their persistence gateways, and the bootstrap
//! that wires them into the kernel and HTTP server.

pub mod app;
pub mod modules;
pub mod storage;

pub use app::{build_registry, run};
pub use storage::Storage;
