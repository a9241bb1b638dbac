pub mod app;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod likes;
pub mod model;
pub mod pagination;
pub mod providers;
pub mod scaling;
pub mod session;
pub mod shopping_list;
pub mod storage;

use std::sync::Arc;

use log::info;

pub use app::{Action, AppState, Applied, Controller, LikeToggle, ListEdit, Outcome};
pub use config::AppConfig;
pub use error::{AppError, InvariantViolation, ParseError};
pub use ingredients::IngredientParser;
pub use likes::LikesStore;
pub use model::{IngredientLine, LikedRecipe, ListItem, RawRecipe, Recipe, RecipeSummary};
pub use pagination::{select_page, PageAction, PageDirection, PageSelection};
pub use providers::{ForkifyProvider, RecipeProvider};
pub use scaling::{ServingsDirection, ServingsScaler};
pub use shopping_list::ShoppingList;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Build the application state from configuration, restoring liked
/// recipes from storage
pub async fn build_state(
    config: &AppConfig,
    storage: Arc<dyn KeyValueStore>,
) -> AppState {
    let likes = LikesStore::load(storage, config.storage.likes_key.clone()).await;
    AppState::with_config(likes, config)
}

/// Wire the HTTP provider and file storage described by `config` into a
/// ready-to-use [`Controller`]
pub async fn start(config: &AppConfig) -> Result<Controller, AppError> {
    let provider = ForkifyProvider::new(&config.provider)?;
    let storage = FileStore::new(&config.storage.path);
    info!(
        "Using {} at {}, storage in {}",
        provider.provider_name(),
        config.provider.base_url,
        storage.dir().display()
    );

    let state = build_state(config, Arc::new(storage)).await;
    Ok(Controller::new(state, Arc::new(provider)))
}
