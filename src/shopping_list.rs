use log::debug;
use uuid::Uuid;

use crate::error::InvariantViolation;
use crate::model::{IngredientLine, ListItem};

/// In-memory shopping list. Item ids are random v4 UUIDs and are never
/// handed out twice.
#[derive(Debug, Default)]
pub struct ShoppingList {
    items: Vec<ListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new item under a fresh id and return a copy of it
    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ListItem {
        let item = ListItem {
            id: Uuid::new_v4().to_string(),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        debug!("Added list item {} ({})", item.id, item.ingredient);
        self.items.push(item.clone());
        item
    }

    pub fn add_ingredient(&mut self, line: &IngredientLine) -> ListItem {
        self.add_item(line.count, line.unit.clone(), line.ingredient.clone())
    }

    /// Remove the item with `id` and return it. An unknown id changes
    /// nothing and returns `None`.
    pub fn delete_item(&mut self, id: &str) -> Option<ListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Replace the count of the item with `id`.
    ///
    /// Non-finite counts and unknown ids change nothing. Negative counts are
    /// accepted as given.
    pub fn update_count(&mut self, id: &str, new_count: f64) -> Result<(), InvariantViolation> {
        if !new_count.is_finite() {
            return Err(InvariantViolation::NonFiniteCount(new_count));
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| InvariantViolation::UnknownListItem(id.to_string()))?;
        item.count = Some(new_count);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
