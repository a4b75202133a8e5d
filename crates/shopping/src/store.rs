use sqlx::SqlitePool;

use crate::{CartComponent, CartRecipe, repository};

/// Everything one export needs from the store, read at a single point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub components: Vec<CartComponent>,
    pub recipes: Vec<CartRecipe>,
}

#[async_trait::async_trait]
pub trait CartStore: Send + Sync {
    async fn snapshot(&self, user_id: &str) -> crate::Result<CartSnapshot>;
}

#[derive(Clone)]
pub struct SqliteCartStore(pub SqlitePool);

#[async_trait::async_trait]
impl CartStore for SqliteCartStore {
    async fn snapshot(&self, user_id: &str) -> crate::Result<CartSnapshot> {
        let mut tx = self.0.begin().await?;

        let components = repository::cart_components(&mut *tx, user_id).await?;
        let recipes = repository::cart_recipes(&mut *tx, user_id).await?;

        tx.commit().await?;

        Ok(CartSnapshot {
            components,
            recipes,
        })
    }
}
