//! 菜谱数据模型

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::CoreError;

/// 已存储的菜谱记录，id 由存储层生成
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub vegetarian: bool,
    pub no_of_servings: i32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// 通过校验、尚未分配 id 的菜谱
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub vegetarian: bool,
    pub no_of_servings: i32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl NewRecipe {
    pub fn with_id(self, id: Uuid) -> Recipe {
        Recipe {
            id,
            name: self.name,
            vegetarian: self.vegetarian,
            no_of_servings: self.no_of_servings,
            ingredients: self.ingredients,
            instructions: self.instructions,
        }
    }
}

/// 菜谱的对外表示
///
/// 所有字段都是可选的，缺失的必填字段由 `validate` 报告，而不是在反序列化时失败。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    /// 创建时忽略；更新时必须与路径中的 id 一致
    pub id: Option<Uuid>,

    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    #[schema(example = "Tomato soup")]
    pub name: Option<String>,

    #[validate(required(message = "vegetarian is required"))]
    pub vegetarian: Option<bool>,

    #[validate(
        required(message = "noOfServings is required"),
        range(min = 1, message = "noOfServings must be at least 1")
    )]
    #[schema(example = 4)]
    pub no_of_servings: Option<i32>,

    /// 缺省或 null 视为空列表
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub instructions: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RecipeDto {
    /// 校验并转换为待创建的菜谱，请求体中的 id 被忽略
    pub fn into_new_recipe(self) -> Result<NewRecipe, CoreError> {
        self.validate()?;

        match (self.name, self.vegetarian, self.no_of_servings) {
            (Some(name), Some(vegetarian), Some(no_of_servings)) => Ok(NewRecipe {
                name,
                vegetarian,
                no_of_servings,
                ingredients: self.ingredients,
                instructions: self.instructions,
            }),
            _ => Err(CoreError::Validation(
                "missing required recipe fields".to_string(),
            )),
        }
    }

    /// 校验并转换为完整记录，用于整体覆盖更新
    pub fn into_recipe(self, id: Uuid) -> Result<Recipe, CoreError> {
        Ok(self.into_new_recipe()?.with_id(id))
    }
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: Some(recipe.id),
            name: Some(recipe.name),
            vegetarian: Some(recipe.vegetarian),
            no_of_servings: Some(recipe.no_of_servings),
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
        }
    }
}
