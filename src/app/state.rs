use log::{debug, info, warn};

use super::{
    Action, Applied, Completion, LikeToggle, ListEdit, Outcome, RecipeTicket, SearchTicket,
};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::likes::LikesStore;
use crate::model::{LikedRecipe, ListItem, Recipe};
use crate::pagination::RESULTS_PER_PAGE;
use crate::scaling::ServingsDirection;
use crate::session::{RecipeSession, ResultsPage, SearchSession};
use crate::shopping_list::ShoppingList;

const DEFAULT_SERVINGS: u32 = 4;

/// Owns every session and collection and keeps them consistent with each
/// other. Constructed explicitly and passed around; there is no global
/// instance.
pub struct AppState {
    search: Option<SearchSession>,
    recipe: Option<RecipeSession>,
    list: ShoppingList,
    likes: LikesStore,
    next_generation: u64,
    results_per_page: u32,
    default_servings: u32,
}

impl AppState {
    pub fn new(likes: LikesStore) -> Self {
        Self {
            search: None,
            recipe: None,
            list: ShoppingList::new(),
            likes,
            next_generation: 1,
            results_per_page: RESULTS_PER_PAGE,
            default_servings: DEFAULT_SERVINGS,
        }
    }

    pub fn with_config(likes: LikesStore, config: &AppConfig) -> Self {
        Self {
            results_per_page: config.results_per_page.max(1),
            default_servings: config.default_servings.max(1),
            ..Self::new(likes)
        }
    }

    fn allocate_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    /// Route one action to the component that owns it
    pub async fn dispatch(&mut self, action: Action) -> Result<Outcome, AppError> {
        debug!("Dispatching {:?}", action);
        match action {
            Action::NewQuery(query) => Ok(self
                .begin_search(&query)
                .map_or(Outcome::Ignored, Outcome::SearchStarted)),
            Action::GoToPage(page) => {
                let selection = self.go_to_page(page)?.selection;
                Ok(Outcome::PageChanged(selection))
            }
            Action::Navigate(id) => Ok(self
                .begin_recipe(&id)
                .map_or(Outcome::Ignored, Outcome::RecipeStarted)),
            Action::UpdateServings(direction) => {
                Ok(Outcome::ServingsChanged(self.update_servings(direction)?))
            }
            Action::AddToList => Ok(Outcome::ItemsAdded(self.add_to_list()?)),
            Action::ToggleLike => Ok(Outcome::Like(self.toggle_like().await?)),
            Action::ListEdit(edit) => {
                self.edit_list(edit)?;
                Ok(Outcome::ListEdited)
            }
        }
    }

    /// Replace the search session. Blank queries start nothing.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let generation = self.allocate_generation();
        self.search = Some(SearchSession::new(generation, query));
        info!("Search {} started for {:?}", generation, query);
        Some(SearchTicket {
            generation,
            query: query.to_string(),
        })
    }

    /// Replace the recipe session. The previous recipe is dropped right
    /// away so it cannot be shown while the new one loads.
    pub fn begin_recipe(&mut self, id: &str) -> Option<RecipeTicket> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        let generation = self.allocate_generation();
        self.recipe = Some(RecipeSession::new(generation, id));
        info!("Recipe {} requested ({})", id, generation);
        Some(RecipeTicket {
            generation,
            id: id.to_string(),
        })
    }

    /// Apply a finished load. Results for a superseded session are dropped.
    pub fn apply(&mut self, completion: Completion) -> Result<Applied, AppError> {
        match completion {
            Completion::SearchLoaded { generation, result } => {
                let Some(session) = self
                    .search
                    .as_mut()
                    .filter(|s| s.generation() == generation)
                else {
                    debug!("Discarding stale search result {}", generation);
                    return Ok(Applied::Discarded);
                };
                match result {
                    Ok(results) => {
                        let count = results.len();
                        session.set_results(results);
                        Ok(Applied::SearchResults { count })
                    }
                    Err(e) => {
                        warn!("Search {:?} failed: {}", session.query(), e);
                        Err(e)
                    }
                }
            }
            Completion::RecipeLoaded { generation, result } => {
                let default_servings = self.default_servings;
                let Some(session) = self
                    .recipe
                    .as_mut()
                    .filter(|s| s.generation() == generation)
                else {
                    debug!("Discarding stale recipe result {}", generation);
                    return Ok(Applied::Discarded);
                };
                match result {
                    Ok(raw) => {
                        let id = session.set_recipe(raw, default_servings).id.clone();
                        let liked = self.likes.is_liked(&id);
                        Ok(Applied::Recipe { id, liked })
                    }
                    Err(e) => {
                        warn!("Loading recipe {} failed: {}", session.id(), e);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Move the current search to `page` and return what is on it
    pub fn go_to_page(&mut self, page: u32) -> Result<ResultsPage<'_>, AppError> {
        let per_page = self.results_per_page;
        let search = self.search.as_mut().ok_or(AppError::NoActiveSearch)?;
        search.go_to_page(page, per_page)?;
        search.page(page, per_page)
    }

    /// The page of results currently shown
    pub fn results_page(&self) -> Result<ResultsPage<'_>, AppError> {
        let search = self.search.as_ref().ok_or(AppError::NoActiveSearch)?;
        search.page(search.current_page(), self.results_per_page)
    }

    pub fn update_servings(&mut self, direction: ServingsDirection) -> Result<u32, AppError> {
        self.recipe
            .as_mut()
            .ok_or(AppError::NoActiveRecipe)?
            .rescale(direction)
    }

    /// Add every ingredient of the current recipe, at its current scale and
    /// in recipe order, to the shopping list
    pub fn add_to_list(&mut self) -> Result<Vec<ListItem>, AppError> {
        let recipe = self
            .recipe
            .as_ref()
            .and_then(RecipeSession::recipe)
            .ok_or(AppError::NoActiveRecipe)?;
        let items: Vec<ListItem> = recipe
            .ingredients
            .iter()
            .map(|line| self.list.add_ingredient(line))
            .collect();
        info!("Added {} items to the shopping list", items.len());
        Ok(items)
    }

    /// Like the current recipe, or unlike it if it is already liked
    pub async fn toggle_like(&mut self) -> Result<LikeToggle, AppError> {
        let recipe = self
            .recipe
            .as_ref()
            .and_then(RecipeSession::recipe)
            .ok_or(AppError::NoActiveRecipe)?;

        let like = LikedRecipe {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            author: recipe.author.clone(),
            image: recipe.image.clone(),
        };

        if self.likes.is_liked(&like.id) {
            let removed = self.likes.delete_like(&like.id).await?;
            Ok(LikeToggle::Unliked(removed.unwrap_or(like)))
        } else {
            let LikedRecipe {
                id,
                title,
                author,
                image,
            } = like;
            let like = self.likes.add_like(id, title, author, image).await?;
            Ok(LikeToggle::Liked(like))
        }
    }

    /// Apply a list edit. Deleting an unknown id is a silent no-op.
    pub fn edit_list(&mut self, edit: ListEdit) -> Result<(), AppError> {
        match edit {
            ListEdit::Delete { id } => {
                if self.list.delete_item(&id).is_none() {
                    debug!("No list item {} to delete", id);
                }
            }
            ListEdit::UpdateCount { id, count } => self.list.update_count(&id, count)?,
        }
        Ok(())
    }

    pub fn search(&self) -> Option<&SearchSession> {
        self.search.as_ref()
    }

    pub fn recipe_session(&self) -> Option<&RecipeSession> {
        self.recipe.as_ref()
    }

    /// The loaded recipe, if any
    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref().and_then(RecipeSession::recipe)
    }

    /// Whether `id` is the recipe currently opened, used to highlight it
    /// among the search results
    pub fn is_selected(&self, id: &str) -> bool {
        self.recipe.as_ref().is_some_and(|r| r.id() == id)
    }

    pub fn is_current_recipe_liked(&self) -> bool {
        self.recipe()
            .is_some_and(|recipe| self.likes.is_liked(&recipe.id))
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn likes(&self) -> &LikesStore {
        &self.likes
    }

    pub fn likes_menu_visible(&self) -> bool {
        self.likes.num_likes() > 0
    }

    pub fn results_per_page(&self) -> u32 {
        self.results_per_page
    }
}
