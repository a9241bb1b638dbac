mod forkify;

pub use forkify::ForkifyProvider;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{RawRecipe, RecipeSummary};

/// Source of search results and recipe data
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "forkify")
    fn provider_name(&self) -> &str;

    /// Search the catalog. Results come back in the provider's order.
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, AppError>;

    /// Fetch the full data of one recipe
    async fn fetch_recipe(&self, id: &str) -> Result<RawRecipe, AppError>;
}
