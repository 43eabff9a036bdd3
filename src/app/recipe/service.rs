//! 菜谱业务服务

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    filter::{FilterParams, RecipeFilter},
    model::{NewRecipe, Recipe},
    store::RecipeStore,
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        self.store.ping().await
    }

    pub async fn find(&self, params: &FilterParams) -> Result<Vec<Recipe>, CoreError> {
        let filter = RecipeFilter::from_params(params)?;
        let recipes = self.store.find_all(&filter).await?;
        debug!("Found {} recipes for {:?}", recipes.len(), filter);
        Ok(recipes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, CoreError> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, recipe: NewRecipe) -> Result<Recipe, CoreError> {
        let recipe = self.store.create(recipe).await?;
        info!("Created recipe: {} ({})", recipe.name, recipe.id);
        Ok(recipe)
    }

    /// 整体覆盖；id 不存在时什么都不做
    pub async fn update(&self, recipe: Recipe) -> Result<(), CoreError> {
        let id = recipe.id;
        if self.store.update(recipe).await? {
            info!("Updated recipe: {}", id);
        } else {
            warn!("Update ignored, recipe {} does not exist", id);
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        if self.store.delete_by_id(id).await? {
            info!("Deleted recipe: {}", id);
        } else {
            debug!("Delete of unknown recipe {} ignored", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryRecipeStore;

    fn service() -> (RecipeService, MemoryRecipeStore) {
        let store = MemoryRecipeStore::new();
        (RecipeService::new(Arc::new(store.clone())), store)
    }

    fn soup() -> NewRecipe {
        NewRecipe {
            name: "Soup".to_string(),
            vegetarian: true,
            no_of_servings: 4,
            ingredients: vec!["Tomato".to_string(), "Pesto".to_string()],
            instructions: vec!["Boil".to_string(), "Taste".to_string()],
        }
    }

    #[tokio::test]
    async fn test_find_with_filter() {
        let (service, _) = service();
        let created = service.create(soup()).await.unwrap();

        let found = service
            .find(&FilterParams {
                ingredients: Some("pesto".to_string()),
                ..FilterParams::default()
            })
            .await
            .unwrap();
        assert_eq!(found, vec![created]);

        let none = service
            .find(&FilterParams {
                vegetarian: Some("false".to_string()),
                ..FilterParams::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_rejects_malformed_filter() {
        let (service, _) = service();
        let err = service
            .find(&FilterParams {
                no_of_servings: Some("many".to_string()),
                ..FilterParams::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, store) = service();
        let mut recipe = service.create(soup()).await.unwrap();
        recipe.name = "Tomato soup".to_string();

        service.update(recipe.clone()).await.unwrap();
        assert_eq!(service.find_by_id(recipe.id).await.unwrap(), Some(recipe.clone()));

        service.delete(recipe.id).await.unwrap();
        service.delete(recipe.id).await.unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_is_noop() {
        let (service, store) = service();
        service
            .update(soup().with_id(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(store.is_empty().unwrap());
    }
}
