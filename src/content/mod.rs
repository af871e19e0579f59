//! Content module - entries, front-matter parsing, and collection loading

mod entry;
pub mod frontmatter;
pub mod loader;

pub use entry::Entry;
pub use frontmatter::FrontMatterError;
pub use loader::{CollectionLoader, EntryFailure, InvalidReport, LoadError, Problem};
