use log::info;

use crate::error::AppError;
use crate::ingredients::IngredientParser;
use crate::model::{RawRecipe, Recipe};
use crate::providers::RecipeProvider;
use crate::scaling::{ServingsDirection, ServingsScaler};

/// Minutes of cooking time per started group of three ingredients
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: u32 = 3;

/// Estimated cooking time from the number of ingredients
pub fn cook_time_minutes(num_ingredients: usize) -> u32 {
    let periods = (num_ingredients as u32).div_ceil(INGREDIENTS_PER_PERIOD);
    periods * MINUTES_PER_PERIOD
}

impl Recipe {
    /// Build a recipe from provider data: parse the ingredient lines and
    /// derive cooking time. `servings` is clamped to at least 1.
    pub fn from_raw(raw: RawRecipe, servings: u32) -> Self {
        let ingredients = IngredientParser::parse_all(&raw.ingredients);
        Recipe {
            cook_time_minutes: cook_time_minutes(raw.ingredients.len()),
            id: raw.id,
            title: raw.title,
            author: raw.author,
            image: raw.image,
            source_url: raw.source_url,
            ingredients_raw: raw.ingredients,
            ingredients,
            servings: servings.max(1),
        }
    }
}

/// The recipe the user navigated to, empty until its data has loaded
#[derive(Debug, Clone)]
pub struct RecipeSession {
    generation: u64,
    id: String,
    recipe: Option<Recipe>,
}

impl RecipeSession {
    pub fn new(generation: u64, id: impl Into<String>) -> Self {
        Self {
            generation,
            id: id.into(),
            recipe: None,
        }
    }

    /// Fetch and parse the recipe this session was opened for
    pub async fn load(
        &mut self,
        provider: &dyn RecipeProvider,
        default_servings: u32,
    ) -> Result<&Recipe, AppError> {
        let raw = provider.fetch_recipe(&self.id).await?;
        Ok(self.set_recipe(raw, default_servings))
    }

    pub(crate) fn set_recipe(&mut self, raw: RawRecipe, default_servings: u32) -> &Recipe {
        let recipe = Recipe::from_raw(raw, default_servings);
        info!(
            "Loaded recipe {} ({} ingredients)",
            recipe.id,
            recipe.ingredients.len()
        );
        self.recipe.insert(recipe)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.recipe.is_some()
    }

    /// Step servings up or down, rescaling the ingredient counts
    pub fn rescale(&mut self, direction: ServingsDirection) -> Result<u32, AppError> {
        let recipe = self.recipe.as_mut().ok_or(AppError::NoActiveRecipe)?;
        Ok(ServingsScaler::rescale(recipe, direction)?)
    }
}
