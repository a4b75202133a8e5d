use std::{path::Path, str::FromStr};

use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::repository::{self, IngredientInsert};

#[derive(Deserialize, Validate, Clone, Debug, PartialEq, Eq)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub measurement_unit: String,
}

#[derive(strum::EnumString, strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> foodgram_shared::Result<Self> {
        let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_str(ext).ok())
        else {
            foodgram_shared::user!("unsupported file format");
        };

        Ok(format)
    }

    /// Csv expects a `name,measurement_unit` header; json an array of objects
    /// with the same fields.
    pub fn parse(&self, content: &str) -> foodgram_shared::Result<Vec<IngredientInput>> {
        match self {
            ImportFormat::Csv => csv::Reader::from_reader(content.as_bytes())
                .deserialize::<IngredientInput>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| foodgram_shared::Error::User(format!("invalid csv file: {err}"))),
            ImportFormat::Json => serde_json::from_str(content)
                .map_err(|err| foodgram_shared::Error::User(format!("invalid json file: {err}"))),
        }
    }
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn import_ingredients(
        &self,
        path: impl AsRef<Path>,
    ) -> foodgram_shared::Result<usize> {
        let format = ImportFormat::from_path(path.as_ref())?;
        let content = tokio::fs::read_to_string(path.as_ref()).await?;

        self.import_ingredients_from(format, &content).await
    }

    /// Inserts every parsed ingredient in one transaction, skipping pairs
    /// that already exist. Returns how many rows were written.
    #[tracing::instrument(skip(self, content))]
    pub async fn import_ingredients_from(
        &self,
        format: ImportFormat,
        content: &str,
    ) -> foodgram_shared::Result<usize> {
        let inputs = format.parse(content)?;

        for input in inputs.iter() {
            input.validate()?;
        }

        let mut tx = self.write_db.begin().await?;
        let mut inserted = 0;

        for input in inputs {
            let created = repository::insert_ingredient(
                &mut *tx,
                IngredientInsert {
                    id: Ulid::new().to_string(),
                    name: input.name,
                    measurement_unit: input.measurement_unit,
                },
            )
            .await?;

            if created {
                inserted += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(inserted, "ingredients imported");

        Ok(inserted)
    }
}
