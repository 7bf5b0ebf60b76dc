//! Item catalog: the fixed set of ids and payloads a strand is a permutation of.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a single item (gene value).
pub type ItemId = u32;

/// Ordered mapping from item id to its payload (typically a URL).
///
/// Catalogs are immutable once built and shared read-only between every
/// strand derived from the same source data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, String>,
}

impl ItemCatalog {
    /// Build a catalog from `(id, payload)` pairs, rejecting duplicate ids.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (ItemId, S)>,
        S: Into<String>,
    {
        let mut items = BTreeMap::new();
        for (id, payload) in pairs {
            if items.insert(id, payload.into()).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(Self { items })
    }

    /// Build a catalog with dense ids `0..n` in payload order.
    pub fn enumerate<I, S>(payloads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = (0..)
            .zip(payloads)
            .map(|(id, payload): (ItemId, S)| (id, payload.into()))
            .collect();
        Self { items }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// Payload for an id.
    pub fn get(&self, id: ItemId) -> Option<&str> {
        self.items.get(&id).map(String::as_str)
    }

    /// Whether the id is part of the catalog.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// `(id, payload)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &str)> + '_ {
        self.items.iter().map(|(id, payload)| (*id, payload.as_str()))
    }
}

/// Catalog construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Item id {0} appears more than once")]
    DuplicateId(ItemId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_orders_ids() {
        let catalog =
            ItemCatalog::from_pairs([(2, "c"), (0, "a"), (1, "b")]).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(catalog.get(2), Some("c"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = ItemCatalog::from_pairs([(0, "a"), (0, "b")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(0));
    }

    #[test]
    fn test_enumerate_is_dense() {
        let catalog = ItemCatalog::enumerate(["x", "y", "z"]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(0) && catalog.contains(2));
        assert!(!catalog.contains(3));
        assert_eq!(catalog.iter().nth(1), Some((1, "y")));
    }
}
