use foodgram_db::table::{Ingredient, Recipe, RecipeComponent, ShoppingCart, User};
use sea_query::{Alias, Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

use crate::{CartComponent, CartRecipe};

#[derive(FromRow)]
struct ComponentRow {
    recipe_id: String,
    recipe_name: String,
    recipe_author: String,
    ingredient_name: String,
    measurement_unit: String,
    amount: u32,
}

impl From<ComponentRow> for CartComponent {
    fn from(row: ComponentRow) -> Self {
        Self {
            recipe_id: row.recipe_id,
            recipe_name: row.recipe_name,
            recipe_author: row.recipe_author,
            ingredient_name: row.ingredient_name,
            measurement_unit: row.measurement_unit,
            amount: row.amount,
        }
    }
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    author: String,
}

impl From<RecipeRow> for CartRecipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            author: row.author,
        }
    }
}

pub(crate) async fn cart_components(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> foodgram_shared::Result<Vec<CartComponent>> {
    let statement = Query::select()
        .expr_as(Expr::col((Recipe::Table, Recipe::Id)), Alias::new("recipe_id"))
        .expr_as(
            Expr::col((Recipe::Table, Recipe::Name)),
            Alias::new("recipe_name"),
        )
        .expr_as(
            Expr::col((User::Table, User::Username)),
            Alias::new("recipe_author"),
        )
        .expr_as(
            Expr::col((Ingredient::Table, Ingredient::Name)),
            Alias::new("ingredient_name"),
        )
        .column((Ingredient::Table, Ingredient::MeasurementUnit))
        .column((RecipeComponent::Table, RecipeComponent::Amount))
        .from(ShoppingCart::Table)
        .inner_join(
            Recipe::Table,
            Expr::col((Recipe::Table, Recipe::Id))
                .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
        )
        .inner_join(
            User::Table,
            Expr::col((User::Table, User::Id)).equals((Recipe::Table, Recipe::AuthorId)),
        )
        .inner_join(
            RecipeComponent::Table,
            Expr::col((RecipeComponent::Table, RecipeComponent::RecipeId))
                .equals((Recipe::Table, Recipe::Id)),
        )
        .inner_join(
            Ingredient::Table,
            Expr::col((Ingredient::Table, Ingredient::Id))
                .equals((RecipeComponent::Table, RecipeComponent::IngredientId)),
        )
        .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, ComponentRow, _>(&sql, values)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn cart_recipes(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> foodgram_shared::Result<Vec<CartRecipe>> {
    let statement = Query::select()
        .column((Recipe::Table, Recipe::Id))
        .column((Recipe::Table, Recipe::Name))
        .expr_as(
            Expr::col((User::Table, User::Username)),
            Alias::new("author"),
        )
        .from(ShoppingCart::Table)
        .inner_join(
            Recipe::Table,
            Expr::col((Recipe::Table, Recipe::Id))
                .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
        )
        .inner_join(
            User::Table,
            Expr::col((User::Table, User::Id)).equals((Recipe::Table, Recipe::AuthorId)),
        )
        .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
        .order_by((Recipe::Table, Recipe::Name), Order::Asc)
        .order_by((Recipe::Table, Recipe::Id), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn recipe_exists(
    pool: &SqlitePool,
    recipe_id: &str,
) -> foodgram_shared::Result<bool> {
    let statement = Query::select()
        .column(Recipe::Id)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}

/// `false` when the entry already exists.
pub(crate) async fn insert_cart_entry(
    pool: &SqlitePool,
    user_id: &str,
    recipe_id: &str,
) -> foodgram_shared::Result<bool> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(ShoppingCart::Table)
        .columns([
            ShoppingCart::UserId,
            ShoppingCart::RecipeId,
            ShoppingCart::CreatedAt,
        ])
        .values_panic([user_id.into(), recipe_id.into(), now.into()])
        .on_conflict(
            OnConflict::columns([ShoppingCart::UserId, ShoppingCart::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected() > 0)
}

/// `false` when there was nothing to delete.
pub(crate) async fn delete_cart_entry(
    pool: &SqlitePool,
    user_id: &str,
    recipe_id: &str,
) -> foodgram_shared::Result<bool> {
    let statement = Query::delete()
        .from_table(ShoppingCart::Table)
        .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
        .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected() > 0)
}
