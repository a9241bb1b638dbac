use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ProviderSettings;
use crate::error::AppError;
use crate::model::{RawRecipe, RecipeSummary};
use crate::providers::RecipeProvider;

/// Recipe provider talking to a Forkify-style JSON API
pub struct ForkifyProvider {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    recipe_id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct RecipeResponse {
    recipe: RecipeData,
}

#[derive(Debug, Deserialize)]
struct RecipeData {
    recipe_id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
    source_url: Option<String>,
}

impl ForkifyProvider {
    /// Create a new provider from configuration
    pub fn new(settings: &ProviderSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; RecipeBox/0.1)")
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AppError> {
        Self::new(&ProviderSettings {
            base_url: base_url.into(),
            ..ProviderSettings::default()
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let json: Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => return Err(AppError::Fetch(format!("{} returned {}", path, status))),
        };

        if let Some(error) = json.get("error").and_then(Value::as_str) {
            return Err(AppError::Fetch(error.to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Fetch(format!("{} returned {}", path, status)));
        }
        Ok(json)
    }
}

#[async_trait]
impl RecipeProvider for ForkifyProvider {
    fn provider_name(&self) -> &str {
        "forkify"
    }

    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, AppError> {
        let json = self.get_json("/api/search", &[("q", query)]).await?;
        let response: SearchResponse = serde_json::from_value(json)?;

        Ok(response
            .recipes
            .into_iter()
            .map(|hit| RecipeSummary {
                id: hit.recipe_id,
                title: decode(&hit.title),
                publisher: decode(&hit.publisher),
                image_url: hit.image_url,
            })
            .collect())
    }

    async fn fetch_recipe(&self, id: &str) -> Result<RawRecipe, AppError> {
        let json = self.get_json("/api/get", &[("rId", id)]).await?;
        let RecipeResponse { recipe } = serde_json::from_value(json)?;

        Ok(RawRecipe {
            id: recipe.recipe_id,
            title: decode(&recipe.title),
            author: decode(&recipe.publisher),
            image: recipe.image_url,
            ingredients: recipe.ingredients.iter().map(|i| decode(i)).collect(),
            source_url: recipe.source_url,
        })
    }
}

/// Titles and ingredient text arrive with HTML entities (`&amp;`, `&#8217;`)
fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
