use std::collections::HashSet;

use ulid::Ulid;
use validator::Validate;

use crate::repository::{self, RecipeInsert};

#[derive(Validate, serde::Serialize, Clone, Debug)]
pub struct ComponentInput {
    pub ingredient_id: String,
    #[validate(range(min = 1))]
    pub amount: u32,
}

#[derive(Validate, Clone, Debug)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1))]
    pub cooking_time: u32,
    #[validate(length(min = 1), nested)]
    pub components: Vec<ComponentInput>,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(author = %request_by))]
    pub async fn create(
        &self,
        input: CreateInput,
        request_by: &str,
    ) -> foodgram_shared::Result<String> {
        input.validate()?;

        let ingredient_ids = input
            .components
            .iter()
            .map(|c| c.ingredient_id.to_owned())
            .collect::<HashSet<_>>();

        if ingredient_ids.len() != input.components.len() {
            foodgram_shared::user!("ingredients must be unique");
        }

        let found =
            repository::count_ingredients(&self.read_db, ingredient_ids.into_iter().collect())
                .await?;

        if found != input.components.len() {
            foodgram_shared::not_found!("ingredient");
        }

        let id = Ulid::new().to_string();
        let mut tx = self.write_db.begin().await?;

        repository::insert_recipe(
            &mut *tx,
            RecipeInsert {
                id: id.to_owned(),
                author_id: request_by.to_owned(),
                name: input.name,
                text: input.text,
                cooking_time: input.cooking_time,
                components: input
                    .components
                    .into_iter()
                    .map(|c| (c.ingredient_id, c.amount))
                    .collect(),
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(recipe = id, "recipe created");

        Ok(id)
    }
}
