//! JSON representations shared across endpoints.
//!
//! List endpoints show recipe associations as ids; the detail endpoint nests
//! the full tag and ingredient objects.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Ingredient, Recipe, Tag, User};
use crate::store::recipes::RecipeRecord;
use crate::validation::{parse_price, PRICE_DECIMAL_PLACES};

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// Recipe as shown in lists: associations by id.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub title: String,
    pub ingredients: Vec<i32>,
    pub tags: Vec<i32>,
    pub time_minutes: i32,
    /// Decimal rendered with two places, e.g. "5.00"
    pub price: String,
    pub link: String,
    /// URL of the recipe image, if one was uploaded
    pub image: Option<String>,
}

impl From<RecipeRecord> for RecipeResponse {
    fn from(record: RecipeRecord) -> Self {
        let RecipeRecord {
            recipe,
            tags,
            ingredients,
        } = record;
        Self {
            id: recipe.id,
            title: recipe.title,
            ingredients: ingredients.into_iter().map(|i| i.id).collect(),
            tags: tags.into_iter().map(|t| t.id).collect(),
            time_minutes: recipe.time_minutes,
            price: format_price(&recipe.price),
            link: recipe.link,
            image: recipe.image_id.map(image_url),
        }
    }
}

/// Recipe as shown on its own: associations nested.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    pub id: i32,
    pub title: String,
    pub ingredients: Vec<IngredientResponse>,
    pub tags: Vec<TagResponse>,
    pub time_minutes: i32,
    pub price: String,
    pub link: String,
    pub image: Option<String>,
}

impl From<RecipeRecord> for RecipeDetailResponse {
    fn from(record: RecipeRecord) -> Self {
        let RecipeRecord {
            recipe,
            tags,
            ingredients,
        } = record;
        Self {
            id: recipe.id,
            title: recipe.title,
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
            time_minutes: recipe.time_minutes,
            price: format_price(&recipe.price),
            link: recipe.link,
            image: recipe.image_id.map(image_url),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeImageResponse {
    pub id: i32,
    pub image: Option<String>,
}

impl From<Recipe> for RecipeImageResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            image: recipe.image_id.map(image_url),
        }
    }
}

/// A price as sent by clients: either a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    pub fn parse(&self) -> Result<BigDecimal, String> {
        match self {
            PriceInput::Number(n) => parse_price(&n.to_string()),
            PriceInput::Text(s) => parse_price(s),
        }
    }
}

pub fn format_price(price: &BigDecimal) -> String {
    price.with_scale(PRICE_DECIMAL_PLACES).to_string()
}

pub fn image_url(photo_id: Uuid) -> String {
    format!("/api/photos/{photo_id}")
}
