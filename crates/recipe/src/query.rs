use sqlx::SqlitePool;

use crate::repository;

pub use crate::repository::{ComponentRow, IngredientRow, RecipeRow};

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> foodgram_shared::Result<Option<RecipeRow>> {
        repository::find_recipe(&self.0, id).await
    }

    pub async fn components(
        &self,
        recipe_id: impl Into<String>,
    ) -> foodgram_shared::Result<Vec<ComponentRow>> {
        repository::find_components(&self.0, recipe_id).await
    }

    /// Ingredients whose name starts with `prefix`, all of them when empty.
    pub async fn ingredients(&self, prefix: &str) -> foodgram_shared::Result<Vec<IngredientRow>> {
        repository::search_ingredients(&self.0, prefix).await
    }
}
