pub mod authors;
pub mod books;

use shelf_kernel::ModuleRegistry;

use crate::storage::Storage;

/// Register all modules with the registry. Authors come first: the books
/// table references it.
pub fn register_all(registry: &mut ModuleRegistry, storage: &Storage) {
    registry.register(authors::create_module());
    registry.register(books::create_module(storage.books.clone()));
}
