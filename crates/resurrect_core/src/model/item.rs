//! Item domain model.
//!
//! # Responsibility
//! - Define the record stored for every item offered for reuse.
//! - Provide the trimmed/required-field constructor used by UI callers.
//!
//! # Invariants
//! - An `Item` never changes after construction; there is no update path.
//! - Items carry no identity of their own; position in the store is identity.
//! - `Item::new` accepts any text; only `Item::validated` enforces content.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field names in persisted/display order.
pub const ITEM_FIELDS: [&str; 3] = ["name", "description", "contact"];

/// Validation error for caller-provided item input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Required field is empty after trimming surrounding whitespace.
    EmptyField { field: &'static str },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} cannot be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One stored item description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    description: String,
    contact: String,
}

impl Item {
    /// Creates an item from raw text without validation.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            contact: contact.into(),
        }
    }

    /// Creates an item from user input.
    ///
    /// Each field is trimmed before the emptiness check, and the trimmed
    /// text is what gets stored.
    ///
    /// # Errors
    /// - Returns `EmptyField` for the first blank field, checked in
    ///   `name`, `description`, `contact` order.
    pub fn validated(
        name: &str,
        description: &str,
        contact: &str,
    ) -> Result<Self, ItemValidationError> {
        let values = [name.trim(), description.trim(), contact.trim()];
        if let Some(index) = values.iter().position(|value| value.is_empty()) {
            return Err(ItemValidationError::EmptyField {
                field: ITEM_FIELDS[index],
            });
        }

        let [name, description, contact] = values;
        Ok(Self::new(name, description, contact))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Returns whether `keyword_lower` occurs in any field, ignoring case.
    ///
    /// The keyword must already be lowercased; see
    /// [`crate::search::substring::search_items`].
    pub fn contains_lowercase(&self, keyword_lower: &str) -> bool {
        [&self.name, &self.description, &self.contact]
            .into_iter()
            .any(|field| field.to_lowercase().contains(keyword_lower))
    }

    /// Case-insensitive substring match across name, description and contact.
    ///
    /// An empty keyword matches every item.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.contains_lowercase(&keyword.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemValidationError};

    #[test]
    fn validated_trims_fields() {
        let item = Item::validated("  Desk Lamp ", "Works, unused\n", "\talice@example.com")
            .expect("non-blank input should validate");
        assert_eq!(item, Item::new("Desk Lamp", "Works, unused", "alice@example.com"));
    }

    #[test]
    fn validated_reports_first_blank_field() {
        let err = Item::validated("Lamp", "   ", "").unwrap_err();
        assert_eq!(
            err,
            ItemValidationError::EmptyField {
                field: "description"
            }
        );
        assert_eq!(err.to_string(), "description cannot be empty");
    }

    #[test]
    fn matches_keyword_ignores_case_in_every_field() {
        let item = Item::new("Bicycle", "Needs new tire", "bob@example.com");
        assert!(item.matches_keyword("CYCLE"));
        assert!(item.matches_keyword("TIRE"));
        assert!(item.matches_keyword("Bob@"));
        assert!(item.matches_keyword(""));
        assert!(!item.matches_keyword("xyz"));
    }
}
