use crate::repository;

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(&self, user_id: &str, recipe_id: &str) -> foodgram_shared::Result<()> {
        if !repository::recipe_exists(&self.read_db, recipe_id).await? {
            foodgram_shared::not_found!("recipe");
        }

        if !repository::insert_cart_entry(&self.write_db, user_id, recipe_id).await? {
            foodgram_shared::user!("recipe already in shopping cart");
        }

        tracing::info!(user = user_id, recipe = recipe_id, "recipe added to shopping cart");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> foodgram_shared::Result<()> {
        if !repository::delete_cart_entry(&self.write_db, user_id, recipe_id).await? {
            foodgram_shared::user!("recipe not in shopping cart");
        }

        tracing::info!(user = user_id, recipe = recipe_id, "recipe removed from shopping cart");

        Ok(())
    }
}
