use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::{AppError, InvariantViolation};
use crate::model::LikedRecipe;
use crate::storage::KeyValueStore;

/// Storage key the liked recipes are kept under
pub const LIKES_KEY: &str = "likes";

/// Liked recipes, unique by id, written through to storage on every change
pub struct LikesStore {
    likes: Vec<LikedRecipe>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl LikesStore {
    /// An empty store. Call [`LikesStore::restore`] to pick up saved likes.
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            likes: Vec::new(),
            storage,
            key: key.into(),
        }
    }

    /// Create a store and restore it from storage in one go
    pub async fn load(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        store.restore().await;
        store
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    /// Like a recipe and persist the new collection.
    ///
    /// If persisting fails the like is rolled back so memory and storage
    /// never disagree.
    pub async fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<LikedRecipe, AppError> {
        let like = LikedRecipe {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            image: image.into(),
        };
        if self.is_liked(&like.id) {
            return Err(InvariantViolation::AlreadyLiked(like.id).into());
        }

        self.likes.push(like.clone());
        if let Err(e) = self.persist().await {
            warn!("Failed to persist like {}: {}", like.id, e);
            self.likes.pop();
            return Err(e);
        }
        debug!("Liked {}", like.id);
        Ok(like)
    }

    /// Remove a like and persist. Rolled back if persisting fails.
    ///
    /// An id that is not liked changes nothing, is not written, and returns
    /// `Ok(None)`.
    pub async fn delete_like(&mut self, id: &str) -> Result<Option<LikedRecipe>, AppError> {
        let Some(index) = self.likes.iter().position(|like| like.id == id) else {
            debug!("Recipe {} is not liked, nothing to remove", id);
            return Ok(None);
        };

        let removed = self.likes.remove(index);
        if let Err(e) = self.persist().await {
            warn!("Failed to persist removal of like {}: {}", id, e);
            self.likes.insert(index, removed);
            return Err(e);
        }
        debug!("Unliked {}", id);
        Ok(Some(removed))
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[LikedRecipe] {
        &self.likes
    }

    /// Overwrite the stored collection with the current one
    pub async fn persist(&self) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(&self.likes)?;
        self.storage.set(&self.key, bytes).await
    }

    /// Replace the in-memory collection with the stored one.
    ///
    /// Missing, unreadable or malformed data yields an empty collection.
    /// Duplicate ids in stored data keep their first occurrence.
    pub async fn restore(&mut self) {
        self.likes = match self.storage.get(&self.key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<LikedRecipe>>(&bytes) {
                Ok(stored) => dedup_by_id(stored),
                Err(e) => {
                    warn!("Stored likes are malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read stored likes, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Restored {} liked recipes", self.likes.len());
    }
}

fn dedup_by_id(likes: Vec<LikedRecipe>) -> Vec<LikedRecipe> {
    let mut unique: Vec<LikedRecipe> = Vec::with_capacity(likes.len());
    for like in likes {
        if !unique.iter().any(|u| u.id == like.id) {
            unique.push(like);
        }
    }
    unique
}
