//! Configuration module

mod collections;

pub use collections::CollectionConfig;
pub use collections::CollectionsConfig;
