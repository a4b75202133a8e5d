use ulid::Ulid;
use validator::Validate;

use crate::repository::{self, IngredientInsert};

use super::IngredientInput;

impl super::Command {
    /// Adds one ingredient. Returns `false` when the same name and unit
    /// were already registered.
    #[tracing::instrument(skip_all, fields(name = %input.name))]
    pub async fn create_ingredient(&self, input: IngredientInput) -> foodgram_shared::Result<bool> {
        input.validate()?;

        let mut conn = self.write_db.acquire().await?;
        let created = repository::insert_ingredient(
            &mut conn,
            IngredientInsert {
                id: Ulid::new().to_string(),
                name: input.name,
                measurement_unit: input.measurement_unit,
            },
        )
        .await?;

        Ok(created)
    }
}
