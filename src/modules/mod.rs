pub mod books;

use std::sync::Arc;

use bookshelf_db::Store;
use bookshelf_kernel::{settings::Settings, ModuleRegistry};

/// Register all feature modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<dyn Store>, settings: &Settings) {
    registry.register_custom(books::create_module(
        store,
        books::ListingOptions::from(&settings.books),
    ));
}
