//! Request body shared by recipe create, PATCH and PUT.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ApiError, FieldErrors};
use crate::models::RecipeChanges;
use crate::store::recipes::{NewRecipeData, RecipeUpdate};
use crate::types::PriceInput;
use crate::validation::{optional_text, required_text, validate_time_minutes};

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeRequest {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    /// Decimal with at most 5 digits, 2 after the point. Number or string.
    #[schema(value_type = Option<String>, example = "5.00")]
    pub price: Option<PriceInput>,
    pub link: Option<String>,
    /// Ids of the caller's tags
    pub tags: Option<Vec<i32>>,
    /// Ids of the caller's ingredients
    pub ingredients: Option<Vec<i32>>,
}

impl RecipeRequest {
    /// Validate every supplied scalar, leaving absent ones as `None`.
    fn checked_changes(&self, errors: &mut FieldErrors) -> RecipeChanges {
        let mut changes = RecipeChanges::default();

        if let Some(title) = &self.title {
            match required_text(title) {
                Ok(title) => changes.title = Some(title.to_string()),
                Err(message) => errors.add("title", message),
            }
        }
        if let Some(minutes) = self.time_minutes {
            match validate_time_minutes(minutes) {
                Ok(minutes) => changes.time_minutes = Some(minutes),
                Err(message) => errors.add("time_minutes", message),
            }
        }
        if let Some(price) = &self.price {
            match price.parse() {
                Ok(price) => changes.price = Some(price),
                Err(message) => errors.add("price", message),
            }
        }
        if let Some(link) = &self.link {
            match optional_text(link.trim()) {
                Ok(link) => changes.link = Some(link.to_string()),
                Err(message) => errors.add("link", message),
            }
        }

        changes
    }

    /// A complete recipe for creation: title, time and price are required.
    pub fn into_new(self) -> Result<NewRecipeData, ApiError> {
        let mut errors = FieldErrors::new();
        let changes = self.checked_changes(&mut errors);

        if self.title.is_none() {
            errors.add("title", REQUIRED);
        }
        if self.time_minutes.is_none() {
            errors.add("time_minutes", REQUIRED);
        }
        if self.price.is_none() {
            errors.add("price", REQUIRED);
        }
        errors.into_result()?;

        let (Some(title), Some(time_minutes), Some(price)) =
            (changes.title, changes.time_minutes, changes.price)
        else {
            return Err(ApiError::Internal("Recipe validation failed"));
        };

        Ok(NewRecipeData {
            title,
            time_minutes,
            price,
            link: changes.link.unwrap_or_default(),
            tag_ids: self.tags.unwrap_or_default(),
            ingredient_ids: self.ingredients.unwrap_or_default(),
        })
    }

    /// PATCH: only supplied fields change.
    pub fn into_partial(self) -> Result<RecipeUpdate, ApiError> {
        let mut errors = FieldErrors::new();
        let changes = self.checked_changes(&mut errors);
        errors.into_result()?;

        Ok(RecipeUpdate {
            changes,
            tag_ids: self.tags,
            ingredient_ids: self.ingredients,
        })
    }

    /// PUT: the same requirements as creation, and anything omitted is reset.
    pub fn into_replacement(self) -> Result<RecipeUpdate, ApiError> {
        let full = self.into_new()?;

        Ok(RecipeUpdate {
            changes: RecipeChanges {
                title: Some(full.title),
                time_minutes: Some(full.time_minutes),
                price: Some(full.price),
                link: Some(full.link),
            },
            tag_ids: Some(full.tag_ids),
            ingredient_ids: Some(full.ingredient_ids),
        })
    }
}
