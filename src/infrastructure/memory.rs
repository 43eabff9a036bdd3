//! 内存存储

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::app::recipe::{
    filter::RecipeFilter,
    model::{NewRecipe, Recipe},
    store::RecipeStore,
};
use crate::core::error::CoreError;

#[derive(Clone, Default)]
pub struct MemoryRecipeStore {
    recipes: Arc<RwLock<HashMap<Uuid, Recipe>>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.recipes.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> CoreError {
    CoreError::InternalServerError("recipe store lock poisoned".to_string())
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, CoreError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;

        let mut id = Uuid::new_v4();
        while recipes.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let recipe = recipe.with_id(id);
        recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>, CoreError> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes.get(&id).cloned())
    }

    async fn find_all(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, CoreError> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        let mut found: Vec<Recipe> = recipes
            .values()
            .filter(|recipe| filter.matches(recipe))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn update(&self, recipe: Recipe) -> Result<bool, CoreError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        match recipes.get_mut(&recipe.id) {
            Some(existing) => {
                *existing = recipe;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, CoreError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        Ok(recipes.remove(&id).is_some())
    }
}
