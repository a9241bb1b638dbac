#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use recipe_box::{AppError, RawRecipe, RecipeProvider, RecipeSummary};

/// In-memory provider with optional per-request delays
#[derive(Default)]
pub struct FakeProvider {
    pub searches: HashMap<String, Vec<RecipeSummary>>,
    pub recipes: HashMap<String, RawRecipe>,
    pub delays: HashMap<String, Duration>,
}

impl FakeProvider {
    pub fn with_search(mut self, query: &str, count: usize) -> Self {
        self.searches.insert(query.to_string(), summaries(query, count));
        self
    }

    pub fn with_recipe(mut self, recipe: RawRecipe) -> Self {
        self.recipes.insert(recipe.id.clone(), recipe);
        self
    }

    pub fn with_delay(mut self, key: &str, millis: u64) -> Self {
        self.delays
            .insert(key.to_string(), Duration::from_millis(millis));
        self
    }

    async fn wait(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, AppError> {
        self.wait(query).await;
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("no results for {}", query)))
    }

    async fn fetch_recipe(&self, id: &str) -> Result<RawRecipe, AppError> {
        self.wait(id).await;
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("no recipe {}", id)))
    }
}

pub fn summaries(query: &str, count: usize) -> Vec<RecipeSummary> {
    (0..count)
        .map(|i| RecipeSummary {
            id: format!("{}-{}", query, i),
            title: format!("{} recipe {}", query, i),
            publisher: "Test Kitchen".to_string(),
            image_url: format!("http://img.example.com/{}-{}.jpg", query, i),
        })
        .collect()
}

pub fn pizza_dough() -> RawRecipe {
    RawRecipe {
        id: "47746".to_string(),
        title: "Best Pizza Dough Ever".to_string(),
        author: "101 Cookbooks".to_string(),
        image: "http://img.example.com/pizza.jpg".to_string(),
        ingredients: vec![
            "4 1/2 cups flour".to_string(),
            "1 3/4 teaspoons salt".to_string(),
            "1/4 cup olive oil (optional)".to_string(),
            "Semolina flour for dusting".to_string(),
        ],
        source_url: Some("http://www.101cookbooks.com/archives/001199.html".to_string()),
    }
}

pub fn pasta() -> RawRecipe {
    RawRecipe {
        id: "54388".to_string(),
        title: "Pasta with Tomato Cream Sauce".to_string(),
        author: "Simply Recipes".to_string(),
        image: "http://img.example.com/pasta.jpg".to_string(),
        ingredients: vec!["1 pound pasta".to_string(), "2 cups tomato sauce".to_string()],
        source_url: None,
    }
}
