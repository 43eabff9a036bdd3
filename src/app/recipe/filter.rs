//! 菜谱查询过滤器
//!
//! 把查询参数翻译成一个合取（AND）谓词：
//! - `vegetarian=true|false`
//! - `noOfServings=4`
//! - `ingredients=pesto,!broccoli`，`!` 前缀表示排除
//! - `instructions=boil,taste`
//!
//! 列表值按逗号拆分，去掉首尾空白，空片段（包括单独的 `!`）被忽略。
//! 子串匹配不区分大小写。

use serde::Deserialize;
use utoipa::IntoParams;

use super::model::Recipe;

const EXCLUDE_PREFIX: char = '!';

/// 列表查询参数，均为可选的原始字符串
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    /// Indicator of dish to be vegetarian
    #[param(example = "false")]
    pub vegetarian: Option<String>,
    /// Exact amount of servings from the recipe
    #[param(example = "4")]
    pub no_of_servings: Option<String>,
    /// Comma separated list of ingredients that should be in the recipe.
    /// Use '!' as prefix to exclude an ingredient.
    #[param(example = "pesto,!broccoli")]
    pub ingredients: Option<String>,
    /// Comma separated list of terms that should occur in the instructions
    #[param(example = "boil,taste")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid value for vegetarian: '{0}' (expected true or false)")]
    InvalidBoolean(String),
    #[error("invalid value for noOfServings: '{0}' (expected an integer)")]
    InvalidInteger(String),
}

/// 解析后的过滤条件，所有条件之间是 AND 关系
///
/// 词条统一保存为小写。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub vegetarian: Option<bool>,
    pub no_of_servings: Option<i32>,
    pub included_ingredients: Vec<String>,
    pub excluded_ingredients: Vec<String>,
    pub instruction_terms: Vec<String>,
}

impl RecipeFilter {
    /// 匹配所有记录的过滤器
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_params(params: &FilterParams) -> Result<Self, FilterError> {
        let mut filter = Self::all();

        if let Some(value) = &params.vegetarian {
            filter.vegetarian = Some(parse_bool(value)?);
        }

        if let Some(value) = &params.no_of_servings {
            let servings = value
                .trim()
                .parse::<i32>()
                .map_err(|_| FilterError::InvalidInteger(value.clone()))?;
            filter.no_of_servings = Some(servings);
        }

        if let Some(value) = &params.ingredients {
            for term in split_terms(value) {
                match term.strip_prefix(EXCLUDE_PREFIX) {
                    Some(excluded) => {
                        let excluded = excluded.trim();
                        if !excluded.is_empty() {
                            filter.excluded_ingredients.push(excluded.to_lowercase());
                        }
                    }
                    None => filter.included_ingredients.push(term.to_lowercase()),
                }
            }
        }

        if let Some(value) = &params.instructions {
            filter.instruction_terms = split_terms(value).map(str::to_lowercase).collect();
        }

        Ok(filter)
    }

    /// 没有任何条件
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(vegetarian) = self.vegetarian {
            if recipe.vegetarian != vegetarian {
                return false;
            }
        }

        if let Some(servings) = self.no_of_servings {
            if recipe.no_of_servings != servings {
                return false;
            }
        }

        let ingredients = lowercase_all(&recipe.ingredients);
        if !self
            .included_ingredients
            .iter()
            .all(|term| any_contains(&ingredients, term))
        {
            return false;
        }
        if self
            .excluded_ingredients
            .iter()
            .any(|term| any_contains(&ingredients, term))
        {
            return false;
        }

        let instructions = lowercase_all(&recipe.instructions);
        self.instruction_terms
            .iter()
            .all(|term| any_contains(&instructions, term))
    }
}

fn parse_bool(value: &str) -> Result<bool, FilterError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(FilterError::InvalidBoolean(value.to_string()))
    }
}

fn split_terms(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

fn any_contains(haystack: &[String], term: &str) -> bool {
    haystack.iter().any(|value| value.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn params(
        vegetarian: Option<&str>,
        servings: Option<&str>,
        ingredients: Option<&str>,
        instructions: Option<&str>,
    ) -> FilterParams {
        FilterParams {
            vegetarian: vegetarian.map(String::from),
            no_of_servings: servings.map(String::from),
            ingredients: ingredients.map(String::from),
            instructions: instructions.map(String::from),
        }
    }

    fn recipe(vegetarian: bool, servings: i32, ingredients: &[&str], instructions: &[&str]) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            vegetarian,
            no_of_servings: servings,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: instructions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn soup() -> Recipe {
        recipe(true, 4, &["Tomato", "Pesto"], &["Boil", "Taste"])
    }

    #[test]
    fn test_no_params_matches_everything() {
        let filter = RecipeFilter::from_params(&FilterParams::default()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&soup()));
        assert!(filter.matches(&recipe(false, 1, &[], &[])));
    }

    #[test]
    fn test_parse_vegetarian() {
        for (raw, expected) in [("true", true), ("FALSE", false), (" True ", true)] {
            let filter = RecipeFilter::from_params(&params(Some(raw), None, None, None)).unwrap();
            assert_eq!(filter.vegetarian, Some(expected));
        }
    }

    #[test]
    fn test_invalid_vegetarian() {
        let err = RecipeFilter::from_params(&params(Some("yes"), None, None, None)).unwrap_err();
        assert_eq!(err, FilterError::InvalidBoolean("yes".to_string()));
    }

    #[test]
    fn test_invalid_servings() {
        let err = RecipeFilter::from_params(&params(None, Some("four"), None, None)).unwrap_err();
        assert_eq!(err, FilterError::InvalidInteger("four".to_string()));
    }

    #[test]
    fn test_parse_ingredient_terms() {
        let filter =
            RecipeFilter::from_params(&params(None, None, Some("Pesto, !Broccoli,,!"), None)).unwrap();
        assert_eq!(filter.included_ingredients, vec!["pesto"]);
        assert_eq!(filter.excluded_ingredients, vec!["broccoli"]);
    }

    #[test]
    fn test_vegetarian_and_servings_match() {
        let filter = RecipeFilter::from_params(&params(Some("true"), Some("4"), None, None)).unwrap();
        assert!(filter.matches(&soup()));
        assert!(!filter.matches(&recipe(false, 4, &[], &[])));
        assert!(!filter.matches(&recipe(true, 2, &[], &[])));
    }

    #[test]
    fn test_ingredient_inclusion_and_exclusion() {
        let filter =
            RecipeFilter::from_params(&params(None, None, Some("pesto,!broccoli"), None)).unwrap();

        assert!(filter.matches(&soup()));
        assert!(filter.matches(&recipe(false, 2, &["Green pesto sauce"], &[])));
        assert!(!filter.matches(&recipe(true, 4, &["Pesto", "Broccoli florets"], &[])));
        assert!(!filter.matches(&recipe(true, 4, &["Tomato"], &[])));
    }

    #[test]
    fn test_exclusion_only() {
        let filter = RecipeFilter::from_params(&params(None, None, Some("!pesto"), None)).unwrap();
        assert!(!filter.matches(&soup()));
        assert!(filter.matches(&recipe(true, 4, &[], &[])));
    }

    #[test]
    fn test_every_included_term_required() {
        let filter =
            RecipeFilter::from_params(&params(None, None, Some("tomato,pesto,basil"), None)).unwrap();
        assert!(!filter.matches(&soup()));
    }

    #[test]
    fn test_instruction_terms() {
        let filter = RecipeFilter::from_params(&params(None, None, None, Some("BOIL,tas"))).unwrap();
        assert!(filter.matches(&soup()));
        assert!(!filter.matches(&recipe(true, 4, &[], &["Bake"])));
    }

    #[test]
    fn test_empty_list_values_impose_nothing() {
        let filter = RecipeFilter::from_params(&params(None, None, Some(" , "), Some(""))).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&recipe(false, 1, &[], &[])));
    }
}
