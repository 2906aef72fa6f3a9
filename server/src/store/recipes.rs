use std::collections::HashMap;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use super::catalog::{ingredients, tags};
use super::{merge_validation, StoreError};
use crate::models::{Ingredient, NewPhoto, NewRecipe, Recipe, RecipeChanges, Tag};
use crate::schema::{photos, recipe_ingredients, recipe_tags, recipes};

/// Optional id filters for listing. Within one dimension any id matches;
/// when both are given a recipe must match both.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tag_ids: Option<Vec<i32>>,
    pub ingredient_ids: Option<Vec<i32>>,
}

/// A recipe together with its resolved associations.
#[derive(Debug, Clone)]
pub struct RecipeRecord {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone)]
pub struct NewRecipeData {
    pub title: String,
    pub time_minutes: i32,
    pub price: BigDecimal,
    pub link: String,
    pub tag_ids: Vec<i32>,
    pub ingredient_ids: Vec<i32>,
}

/// Changes to an existing recipe. `None` associations are left alone,
/// `Some(vec![])` clears them.
#[derive(Debug, Default, Clone)]
pub struct RecipeUpdate {
    pub changes: RecipeChanges,
    pub tag_ids: Option<Vec<i32>>,
    pub ingredient_ids: Option<Vec<i32>>,
}

/// A validated image ready to be stored.
pub struct NewImage<'a> {
    pub content_type: &'a str,
    pub data: &'a [u8],
    pub thumbnail: &'a [u8],
}

pub fn list_for_owner(
    conn: &mut PgConnection,
    owner: Uuid,
    filter: &RecipeFilter,
) -> QueryResult<Vec<RecipeRecord>> {
    let mut query = recipes::table
        .filter(recipes::user_id.eq(owner))
        .select(Recipe::as_select())
        .order(recipes::id.desc())
        .into_boxed();

    if let Some(tag_ids) = &filter.tag_ids {
        let tagged = recipe_tags::table
            .filter(recipe_tags::tag_id.eq_any(tag_ids.clone()))
            .select(recipe_tags::recipe_id);
        query = query.filter(recipes::id.eq_any(tagged));
    }

    if let Some(ingredient_ids) = &filter.ingredient_ids {
        let with_ingredient = recipe_ingredients::table
            .filter(recipe_ingredients::ingredient_id.eq_any(ingredient_ids.clone()))
            .select(recipe_ingredients::recipe_id);
        query = query.filter(recipes::id.eq_any(with_ingredient));
    }

    let rows: Vec<Recipe> = query.load(conn)?;
    attach_links(conn, rows)
}

/// Load associations for all `rows` with one query per association table.
fn attach_links(conn: &mut PgConnection, rows: Vec<Recipe>) -> QueryResult<Vec<RecipeRecord>> {
    let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (recipe_id, tag) in tags::for_recipes(conn, &ids)? {
        tags_by_recipe.entry(recipe_id).or_default().push(tag);
    }

    let mut ingredients_by_recipe: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for (recipe_id, ingredient) in ingredients::for_recipes(conn, &ids)? {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(ingredient);
    }

    Ok(rows
        .into_iter()
        .map(|recipe| RecipeRecord {
            tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
            ingredients: ingredients_by_recipe
                .remove(&recipe.id)
                .unwrap_or_default(),
            recipe,
        })
        .collect())
}

/// Fetch one recipe row owned by `owner`, locking it when `for_update` is set.
fn find_owned(
    conn: &mut PgConnection,
    owner: Uuid,
    id: i32,
    for_update: bool,
) -> Result<Recipe, StoreError> {
    let query = recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(owner))
        .select(Recipe::as_select());

    let found = if for_update {
        query.for_update().first(conn).optional()?
    } else {
        query.first(conn).optional()?
    };

    // Foreign and missing recipes are indistinguishable to the caller
    found.ok_or(StoreError::NotFound("Recipe"))
}

pub fn get_for_owner(
    conn: &mut PgConnection,
    owner: Uuid,
    id: i32,
) -> Result<RecipeRecord, StoreError> {
    let recipe = find_owned(conn, owner, id, false)?;
    let mut records = attach_links(conn, vec![recipe])?;
    records.pop().ok_or(StoreError::NotFound("Recipe"))
}

fn resolve_links(
    conn: &mut PgConnection,
    owner: Uuid,
    tag_ids: Option<&[i32]>,
    ingredient_ids: Option<&[i32]>,
) -> Result<(Option<Vec<Tag>>, Option<Vec<Ingredient>>), StoreError> {
    let tags = tag_ids
        .map(|ids| tags::resolve_owned(conn, owner, ids))
        .transpose();
    let ingredients = ingredient_ids
        .map(|ids| ingredients::resolve_owned(conn, owner, ids))
        .transpose();
    merge_validation(tags, ingredients)
}

pub fn create(
    conn: &mut PgConnection,
    owner: Uuid,
    data: &NewRecipeData,
) -> Result<RecipeRecord, StoreError> {
    conn.transaction(|conn| {
        let (tags, ingredients) = resolve_links(
            conn,
            owner,
            Some(data.tag_ids.as_slice()),
            Some(data.ingredient_ids.as_slice()),
        )?;
        let tags = tags.unwrap_or_default();
        let ingredients = ingredients.unwrap_or_default();

        let recipe = diesel::insert_into(recipes::table)
            .values(NewRecipe {
                user_id: owner,
                title: &data.title,
                time_minutes: data.time_minutes,
                price: &data.price,
                link: &data.link,
            })
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        tags::replace_links(conn, recipe.id, &tags)?;
        ingredients::replace_links(conn, recipe.id, &ingredients)?;

        tracing::info!(recipe_id = recipe.id, user_id = %owner, "created recipe");

        // Read the links back so their order matches every later read
        let mut records = attach_links(conn, vec![recipe])?;
        records.pop().ok_or(StoreError::NotFound("Recipe"))
    })
}

pub fn update(
    conn: &mut PgConnection,
    owner: Uuid,
    id: i32,
    update: &RecipeUpdate,
) -> Result<RecipeRecord, StoreError> {
    conn.transaction(|conn| {
        let existing = find_owned(conn, owner, id, true)?;

        let (tags, ingredients) = resolve_links(
            conn,
            owner,
            update.tag_ids.as_deref(),
            update.ingredient_ids.as_deref(),
        )?;

        let changes = &update.changes;
        let has_changes = changes.title.is_some()
            || changes.time_minutes.is_some()
            || changes.price.is_some()
            || changes.link.is_some();
        if has_changes {
            diesel::update(recipes::table.find(existing.id))
                .set(changes)
                .execute(conn)?;
        }

        if let Some(tags) = &tags {
            tags::replace_links(conn, existing.id, tags)?;
        }
        if let Some(ingredients) = &ingredients {
            ingredients::replace_links(conn, existing.id, ingredients)?;
        }

        get_for_owner(conn, owner, existing.id)
    })
}

/// Swap the recipe's image for `image`, removing the previous photo.
pub fn set_image(
    conn: &mut PgConnection,
    owner: Uuid,
    id: i32,
    image: NewImage<'_>,
) -> Result<Recipe, StoreError> {
    conn.transaction(|conn| {
        let existing = find_owned(conn, owner, id, true)?;

        let photo_id: Uuid = diesel::insert_into(photos::table)
            .values(NewPhoto {
                user_id: owner,
                content_type: image.content_type,
                data: image.data,
                thumbnail: image.thumbnail,
            })
            .returning(photos::id)
            .get_result(conn)?;

        let recipe = diesel::update(recipes::table.find(existing.id))
            .set(recipes::image_id.eq(Some(photo_id)))
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        if let Some(previous) = existing.image_id {
            diesel::delete(
                photos::table
                    .filter(photos::id.eq(previous))
                    .filter(photos::user_id.eq(owner)),
            )
            .execute(conn)?;
        }

        tracing::info!(recipe_id = recipe.id, photo_id = %photo_id, "replaced recipe image");
        Ok(recipe)
    })
}
