#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use foodgram_recipe::{ImportFormat, IngredientRow};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<foodgram_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(foodgram_shared::State::single(pool))
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

pub async fn seed_ingredients(
    state: &foodgram_shared::State,
) -> anyhow::Result<Vec<IngredientRow>> {
    let cmd = foodgram_recipe::Command::new(state.clone());
    cmd.import_ingredients_from(
        ImportFormat::Csv,
        "name,measurement_unit\nсахар,г\nмука,г\nтоматы,банка\nмолоко,мл\n",
    )
    .await?;

    Ok(foodgram_recipe::Query(state.read_db.clone())
        .ingredients("")
        .await?)
}
