#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use foodgram::{AppState, config::ShoppingConfig};
use foodgram_recipe::{ComponentInput, CreateInput, IngredientInput};
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use tower::ServiceExt;

pub const SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<foodgram_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(foodgram_shared::State::single(pool))
}

pub fn app(state: &foodgram_shared::State) -> Router {
    foodgram::create_app(AppState {
        state: state.clone(),
        export: foodgram::export_service(state.read_db.clone(), &ShoppingConfig::default()),
        jwt_secret: SECRET.to_owned(),
    })
}

pub fn token(user_id: &str) -> String {
    foodgram::auth::generate_token(SECRET, user_id.to_owned(), 3600).unwrap()
}

pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> anyhow::Result<Response<Body>> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    Ok(app.oneshot(request.body(Body::empty())?).await?)
}

pub async fn body_bytes(response: Response<Body>) -> anyhow::Result<Vec<u8>> {
    Ok(response.into_body().collect().await?.to_bytes().to_vec())
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
    foodgram_recipe::Command::new(state.clone())
        .create_ingredient(IngredientInput {
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
    Ok(foodgram_recipe::Command::new(state.clone())
        .create(
            CreateInput {
                name: name.to_owned(),
                text: "Смешать и подать".to_owned(),
                cooking_time: 15,
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
