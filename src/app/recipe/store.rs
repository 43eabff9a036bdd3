//! 菜谱存储抽象

use async_trait::async_trait;
use uuid::Uuid;

use super::filter::RecipeFilter;
use super::model::{NewRecipe, Recipe};
use crate::core::error::CoreError;

/// 菜谱记录存储
///
/// 单条记录的创建、更新、删除都是原子的；不提供跨记录事务。
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// 存储后端名称，用于健康检查和日志
    fn backend(&self) -> &'static str;

    /// 分配新 id 并保存
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, CoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>, CoreError>;

    async fn find_all(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, CoreError>;

    /// 覆盖同 id 的记录；id 不存在时不做任何事并返回 `false`
    async fn update(&self, recipe: Recipe) -> Result<bool, CoreError>;

    /// 删除记录；不存在时返回 `false`，不是错误
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, CoreError>;

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
