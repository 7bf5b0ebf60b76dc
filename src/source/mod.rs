//! Item sources: where the `(id, payload)` pairs of a run come from.
//!
//! A source hands the engine an [`ItemCatalog`] holding exactly the requested
//! number of items. The text file format is the reference one; other
//! collaborators (databases, search engines) plug in through [`ItemSource`].

mod url_list;

pub use url_list::UrlListFile;

use crate::schema::{CatalogError, ItemCatalog, ItemId};

/// Supplies the item catalog for a run.
pub trait ItemSource {
    /// Load the first `strand_size` items.
    fn load(&self, strand_size: usize) -> Result<ItemCatalog, SourceError>;
}

/// Pre-built list of items held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    items: Vec<(ItemId, String)>,
}

impl InMemorySource {
    /// Create from `(id, payload)` pairs, in source order.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, S)>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(|(id, p)| (id, p.into())).collect(),
        }
    }
}

impl ItemSource for InMemorySource {
    fn load(&self, strand_size: usize) -> Result<ItemCatalog, SourceError> {
        if self.items.len() < strand_size {
            return Err(SourceError::TooFewLines {
                requested: strand_size,
                available: self.items.len(),
            });
        }
        let pairs = self.items[..strand_size]
            .iter()
            .map(|(id, payload)| (*id, payload.as_str()));
        Ok(ItemCatalog::from_pairs(pairs)?)
    }
}

/// Errors raised while loading items.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read item source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Requested {requested} items but the source only holds {available}")]
    TooFewLines { requested: usize, available: usize },
    #[error("Line {line} is not an '<id> <payload>' pair: {content:?}")]
    Malformed { line: usize, content: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
