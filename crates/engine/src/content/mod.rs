mod items;
mod store;

pub use items::{
    load_item_catalog, parse_item_catalog, CatalogError, CatalogErrorCode, ItemCatalog,
    ItemDefinition, ItemId, SourceLocation,
};
pub use store::{JsonFileStore, StoreError, WriteStage};
