mod ingredient;
mod recipe;
mod recipe_component;
mod shopping_cart;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateEmailIdx,
        user::CreateUsernameIdx,
        ingredient::CreateTable,
        ingredient::CreateNameUnitIdx,
        recipe::CreateTable,
        recipe::CreateAuthorIdx,
        recipe_component::CreateTable,
        shopping_cart::CreateTable
    ]
);
