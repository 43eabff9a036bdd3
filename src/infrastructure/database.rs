//! 数据库基础设施

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error, Postgres, QueryBuilder,
};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::app::recipe::{
    filter::RecipeFilter,
    model::{NewRecipe, Recipe},
    store::RecipeStore,
};
use crate::config::StorageConfig;
use crate::core::error::CoreError;

const SELECT_RECIPES: &str =
    "SELECT id, name, vegetarian, no_of_servings, ingredients, instructions FROM recipes";

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(config: &StorageConfig) -> Result<Self, Error> {
        let database_url = config.database_url.as_deref().unwrap_or_default();
        info!(
            "Connecting to database: {}",
            redact_password(database_url)
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 建表（幂等）
    pub async fn create_tables(&self) -> Result<(), Error> {
        info!("Creating database tables...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS recipes (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL CHECK (name <> ''),
                vegetarian BOOLEAN NOT NULL DEFAULT FALSE,
                no_of_servings INTEGER NOT NULL,
                ingredients TEXT[] NOT NULL DEFAULT '{}',
                instructions TEXT[] NOT NULL DEFAULT '{}'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    pub fn into_store(self) -> PgRecipeStore {
        PgRecipeStore::new(self.pool)
    }
}

fn redact_password(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

/// PostgreSQL 菜谱存储，配料和步骤存为 TEXT[] 列
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 把过滤条件追加为 WHERE 子句
///
/// 两侧都经过 Postgres 的 `lower()`，大小写折叠只由数据库决定。
pub fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    let mut prefix = " WHERE ";

    if let Some(vegetarian) = filter.vegetarian {
        builder.push(prefix).push("vegetarian = ").push_bind(vegetarian);
        prefix = " AND ";
    }

    if let Some(servings) = filter.no_of_servings {
        builder.push(prefix).push("no_of_servings = ").push_bind(servings);
        prefix = " AND ";
    }

    let list_terms = filter
        .included_ingredients
        .iter()
        .map(|term| ("ingredients", false, term))
        .chain(
            filter
                .excluded_ingredients
                .iter()
                .map(|term| ("ingredients", true, term)),
        )
        .chain(
            filter
                .instruction_terms
                .iter()
                .map(|term| ("instructions", false, term)),
        );

    for (column, negated, term) in list_terms {
        builder.push(prefix);
        if negated {
            builder.push("NOT ");
        }
        builder
            .push("EXISTS (SELECT 1 FROM unnest(")
            .push(column)
            .push(") AS v WHERE strpos(lower(v), lower(")
            .push_bind(term.clone())
            .push(")) > 0)");
        prefix = " AND ";
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, CoreError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            "INSERT INTO recipes (name, vegetarian, no_of_servings, ingredients, instructions) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, vegetarian, no_of_servings, ingredients, instructions",
        )
        .bind(&recipe.name)
        .bind(recipe.vegetarian)
        .bind(recipe.no_of_servings)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .fetch_one(&self.pool)
        .await?;

        Ok(recipe)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>, CoreError> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!("{} WHERE id = $1", SELECT_RECIPES))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(recipe)
    }

    async fn find_all(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, CoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_RECIPES);
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY name, id");

        let recipes = builder
            .build_query_as::<Recipe>()
            .fetch_all(&self.pool)
            .await?;

        Ok(recipes)
    }

    async fn update(&self, recipe: Recipe) -> Result<bool, CoreError> {
        let result = sqlx::query(
            "UPDATE recipes SET name = $1, vegetarian = $2, no_of_servings = $3, \
             ingredients = $4, instructions = $5 WHERE id = $6",
        )
        .bind(&recipe.name)
        .bind(recipe.vegetarian)
        .bind(recipe.no_of_servings)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
