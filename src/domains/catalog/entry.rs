//! Catalog entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as persisted by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u64,
    pub category: Option<String>,
    pub sku: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl CatalogEntry {
    /// Build the stored form of a candidate entry.
    pub fn from_new(id: EntryId, new: NewCatalogEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: super::round_price(new.price),
            stock: new.stock,
            category: new.category,
            sku: new.sku,
            image: new.image,
            is_active: new.is_active,
            created_at,
        }
    }

    /// Value of one of the searchable text columns.
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Description => self.description.as_deref(),
            TextField::Sku => Some(&self.sku),
            TextField::Category => self.category.as_deref(),
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// A candidate entry, assembled by the create tool and handed to storage.
///
/// Defaults (`stock = 0`, `is_active = true`) are already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCatalogEntry {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u64,
    pub category: Option<String>,
    pub sku: String,
    pub image: Option<String>,
    pub is_active: bool,
}

impl NewCatalogEntry {
    /// Candidate with only the required fields set.
    pub fn new(name: impl Into<String>, price: f64, sku: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            stock: 0,
            category: None,
            sku: sku.into(),
            image: None,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// The textual columns a search term can be matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Name,
    Description,
    Sku,
    Category,
}

impl TextField {
    /// Every searchable field, in the order an unscoped search checks them.
    pub const ALL: [TextField; 4] = [
        TextField::Name,
        TextField::Description,
        TextField::Sku,
        TextField::Category,
    ];

    /// Column / parameter name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Description => "description",
            TextField::Sku => "sku",
            TextField::Category => "category",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
