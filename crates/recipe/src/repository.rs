use foodgram_db::table::{Ingredient, Recipe, RecipeComponent};
use sea_query::{Expr, ExprTrait, Func, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(FromRow, Debug, Clone)]
pub struct RecipeRow {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub text: String,
    pub cooking_time: u32,
    pub created_at: i64,
}

#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct ComponentRow {
    pub ingredient_id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

pub(crate) async fn find_recipe(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> foodgram_shared::Result<Option<RecipeRow>> {
    let statement = Query::select()
        .columns([
            Recipe::Id,
            Recipe::AuthorId,
            Recipe::Name,
            Recipe::Text,
            Recipe::CookingTime,
            Recipe::CreatedAt,
        ])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn find_components(
    pool: &SqlitePool,
    recipe_id: impl Into<String>,
) -> foodgram_shared::Result<Vec<ComponentRow>> {
    let statement = Query::select()
        .column((RecipeComponent::Table, RecipeComponent::IngredientId))
        .column((Ingredient::Table, Ingredient::Name))
        .column((Ingredient::Table, Ingredient::MeasurementUnit))
        .column((RecipeComponent::Table, RecipeComponent::Amount))
        .from(RecipeComponent::Table)
        .inner_join(
            Ingredient::Table,
            Expr::col((Ingredient::Table, Ingredient::Id))
                .equals((RecipeComponent::Table, RecipeComponent::IngredientId)),
        )
        .and_where(
            Expr::col((RecipeComponent::Table, RecipeComponent::RecipeId)).eq(recipe_id.into()),
        )
        .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ComponentRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn search_ingredients(
    pool: &SqlitePool,
    prefix: &str,
) -> foodgram_shared::Result<Vec<IngredientRow>> {
    let mut statement = Query::select()
        .columns([
            Ingredient::Id,
            Ingredient::Name,
            Ingredient::MeasurementUnit,
        ])
        .from(Ingredient::Table)
        .order_by(Ingredient::Name, Order::Asc)
        .order_by(Ingredient::MeasurementUnit, Order::Asc)
        .to_owned();

    if !prefix.is_empty() {
        statement.and_where(Expr::col(Ingredient::Name).like(format!("{prefix}%")));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn count_ingredients(
    pool: &SqlitePool,
    ids: Vec<String>,
) -> foodgram_shared::Result<usize> {
    let statement = Query::select()
        .expr(Func::count(Expr::col(Ingredient::Id)))
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).is_in(ids))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (total,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(usize::try_from(total).unwrap_or_default())
}

pub(crate) struct IngredientInsert {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

/// Inserts an ingredient unless the (name, unit) pair already exists.
/// Returns whether a row was written.
pub(crate) async fn insert_ingredient(
    conn: &mut SqliteConnection,
    input: IngredientInsert,
) -> foodgram_shared::Result<bool> {
    let statement = Query::insert()
        .into_table(Ingredient::Table)
        .columns([
            Ingredient::Id,
            Ingredient::Name,
            Ingredient::MeasurementUnit,
        ])
        .values_panic([
            input.id.into(),
            input.name.into(),
            input.measurement_unit.into(),
        ])
        .on_conflict(
            OnConflict::columns([Ingredient::Name, Ingredient::MeasurementUnit])
                .do_nothing()
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) struct RecipeInsert {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub text: String,
    pub cooking_time: u32,
    pub components: Vec<(String, u32)>,
}

pub(crate) async fn insert_recipe(
    conn: &mut SqliteConnection,
    input: RecipeInsert,
) -> foodgram_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(Recipe::Table)
        .columns([
            Recipe::Id,
            Recipe::AuthorId,
            Recipe::Name,
            Recipe::Text,
            Recipe::CookingTime,
            Recipe::CreatedAt,
        ])
        .values_panic([
            input.id.to_owned().into(),
            input.author_id.into(),
            input.name.into(),
            input.text.into(),
            input.cooking_time.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = Query::insert()
        .into_table(RecipeComponent::Table)
        .columns([
            RecipeComponent::RecipeId,
            RecipeComponent::IngredientId,
            RecipeComponent::Amount,
        ])
        .to_owned();

    for (ingredient_id, amount) in input.components {
        statement.values_panic([
            input.id.to_owned().into(),
            ingredient_id.into(),
            amount.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn delete_recipe(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
