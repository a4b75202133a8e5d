#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use foodgram_recipe::{ComponentInput, CreateInput, IngredientInput};
use foodgram_shopping::{ExportService, SqliteCartStore, UnitPluralizer, render::FontFile};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<foodgram_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(foodgram_shared::State::single(pool))
}

pub fn font() -> FontFile {
    FontFile::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../static/fonts/DejaVuSansMono.ttf"
    ))
}

pub fn export_service(state: &foodgram_shared::State) -> ExportService {
    ExportService::new(
        SqliteCartStore(state.read_db.clone()),
        UnitPluralizer::russian(),
        font(),
    )
}

pub async fn create_user(state: &foodgram_shared::State, username: &str) -> anyhow::Result<String> {
    let cmd = foodgram_user::Command::new(state.clone());

    Ok(cmd
        .register(foodgram_user::RegisterInput {
            email: format!("{username}@foodgram.localhost"),
            username: username.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?)
}

pub async fn create_ingredient(
    state: &foodgram_shared::State,
    name: &str,
    unit: &str,
) -> anyhow::Result<String> {
    let cmd = foodgram_recipe::Command::new(state.clone());
    cmd.create_ingredient(IngredientInput {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    })
    .await?;

    let ingredient = foodgram_recipe::Query(state.read_db.clone())
        .ingredients(name)
        .await?
        .into_iter()
        .find(|i| i.name == name && i.measurement_unit == unit)
        .ok_or_else(|| anyhow::anyhow!("ingredient {name}/{unit} missing"))?;

    Ok(ingredient.id)
}

pub async fn create_recipe(
    state: &foodgram_shared::State,
    author: &str,
    name: &str,
    components: &[(&str, u32)],
) -> anyhow::Result<String> {
    let cmd = foodgram_recipe::Command::new(state.clone());

    Ok(cmd
        .create(
            CreateInput {
                name: name.to_owned(),
                text: "Приготовить".to_owned(),
                cooking_time: 10,
                components: components
                    .iter()
                    .map(|(ingredient_id, amount)| ComponentInput {
                        ingredient_id: (*ingredient_id).to_owned(),
                        amount: *amount,
                    })
                    .collect(),
            },
            author,
        )
        .await?)
}
