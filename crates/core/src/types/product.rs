//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product in the catalog.
///
/// Products are static marketing data - there is no inventory, pricing or
/// variant model behind them. The `icon` is a Font Awesome class used by
/// the product card when no photo is available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Whether the product has at least one photo.
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}
