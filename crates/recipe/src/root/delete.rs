use crate::repository;

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str, request_by: &str) -> foodgram_shared::Result<()> {
        let Some(recipe) = repository::find_recipe(&self.read_db, id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        if recipe.author_id != request_by {
            foodgram_shared::forbidden!("recipe");
        }

        repository::delete_recipe(&self.write_db, id).await?;

        tracing::info!(recipe = id, "recipe deleted");

        Ok(())
    }
}
