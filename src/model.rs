use serde::{Deserialize, Serialize};

/// One search hit, as returned by the recipe provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
}

/// Structured form of one ingredient line.
///
/// `count` is `None` when the text states no quantity ("salt to taste");
/// `unit` is empty when no unit was recognised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// Recipe fields exactly as the provider hands them over, before any
/// parsing or derived values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub source_url: Option<String>,
}

/// A fully loaded recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub source_url: Option<String>,
    pub ingredients_raw: Vec<String>,
    pub ingredients: Vec<IngredientLine>,
    pub servings: u32,
    pub cook_time_minutes: u32,
}

/// Shopping list entry. Copied from an [`IngredientLine`]; it keeps no link
/// to the recipe it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// Persisted summary of a liked recipe. Field order is the storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
}
