//! Tags and ingredients: per-user named labels attachable to recipes.
//!
//! Both catalogs share one contract, so the query builders are generated once
//! by [`owned_catalog!`] for each (table, link table) pair.

use super::Direction;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Keep only entries referenced by at least one of the owner's recipes.
    pub assigned_only: bool,
    /// Ordering by name. Ties are broken by id in the same direction.
    pub order: Direction,
}

macro_rules! owned_catalog {
    (
        $module:ident,
        table: $table:ident,
        link: $link:ident,
        link_column: $link_column:ident,
        model: $model:ident,
        new: $new:ident,
        new_link: $new_link:ident,
        field: $field:literal $(,)?
    ) => {
        pub mod $module {
            use diesel::prelude::*;
            use uuid::Uuid;

            use super::CatalogFilter;
            use crate::error::FieldErrors;
            use crate::models::{$model, $new, $new_link};
            use crate::schema::{$link, $table, recipes};
            use crate::store::{Direction, StoreError};
            use crate::validation::required_text;

            /// The owner's entries, optionally restricted to those in use.
            pub fn list_for_owner(
                conn: &mut PgConnection,
                owner: Uuid,
                filter: CatalogFilter,
            ) -> QueryResult<Vec<$model>> {
                let mut query = $table::table
                    .filter($table::user_id.eq(owner))
                    .select($model::as_select())
                    .into_boxed();

                if filter.assigned_only {
                    // IN (subquery) yields each entry once however many recipes use it
                    let assigned = $link::table
                        .inner_join(recipes::table)
                        .filter(recipes::user_id.eq(owner))
                        .select($link::$link_column);
                    query = query.filter($table::id.eq_any(assigned));
                }

                query = match filter.order {
                    Direction::Desc => query.order(($table::name.desc(), $table::id.desc())),
                    Direction::Asc => query.order(($table::name.asc(), $table::id.asc())),
                };

                query.load(conn)
            }

            /// Create an entry owned by `owner`. The name is trimmed and must not be blank.
            pub fn create(
                conn: &mut PgConnection,
                owner: Uuid,
                name: &str,
            ) -> Result<$model, StoreError> {
                let name = required_text(name).map_err(|m| StoreError::field("name", m))?;

                let created = diesel::insert_into($table::table)
                    .values($new {
                        user_id: owner,
                        name,
                    })
                    .returning($model::as_returning())
                    .get_result(conn)?;

                Ok(created)
            }

            /// Load the owner's entries with the given ids.
            ///
            /// Ids that do not exist, or that belong to somebody else, are
            /// reported together as a validation error.
            pub fn resolve_owned(
                conn: &mut PgConnection,
                owner: Uuid,
                ids: &[i32],
            ) -> Result<Vec<$model>, StoreError> {
                let mut wanted = ids.to_vec();
                wanted.sort_unstable();
                wanted.dedup();
                if wanted.is_empty() {
                    return Ok(Vec::new());
                }

                let found: Vec<$model> = $table::table
                    .filter($table::user_id.eq(owner))
                    .filter($table::id.eq_any(&wanted))
                    .order($table::id.asc())
                    .select($model::as_select())
                    .load(conn)?;

                let mut errors = FieldErrors::new();
                for id in &wanted {
                    if !found.iter().any(|entry| entry.id == *id) {
                        errors.add(
                            $field,
                            format!("Invalid pk \"{id}\" - object does not exist."),
                        );
                    }
                }
                errors.into_result().map_err(StoreError::Validation)?;

                Ok(found)
            }

            /// Entries attached to any of `recipe_ids`, paired with the recipe id.
            pub fn for_recipes(
                conn: &mut PgConnection,
                recipe_ids: &[i32],
            ) -> QueryResult<Vec<(i32, $model)>> {
                if recipe_ids.is_empty() {
                    return Ok(Vec::new());
                }

                $link::table
                    .inner_join($table::table)
                    .filter($link::recipe_id.eq_any(recipe_ids))
                    .order(($table::name.asc(), $table::id.asc()))
                    .select(($link::recipe_id, $model::as_select()))
                    .load(conn)
            }

            /// Replace every link of `recipe_id` with `entries`.
            pub fn replace_links(
                conn: &mut PgConnection,
                recipe_id: i32,
                entries: &[$model],
            ) -> QueryResult<()> {
                diesel::delete($link::table.filter($link::recipe_id.eq(recipe_id)))
                    .execute(conn)?;

                if entries.is_empty() {
                    return Ok(());
                }

                let rows: Vec<$new_link> = entries
                    .iter()
                    .map(|entry| $new_link {
                        recipe_id,
                        $link_column: entry.id,
                    })
                    .collect();

                diesel::insert_into($link::table)
                    .values(&rows)
                    .execute(conn)?;

                Ok(())
            }
        }
    };
}

owned_catalog!(
    tags,
    table: tags,
    link: recipe_tags,
    link_column: tag_id,
    model: Tag,
    new: NewTag,
    new_link: NewRecipeTag,
    field: "tags",
);

owned_catalog!(
    ingredients,
    table: ingredients,
    link: recipe_ingredients,
    link_column: ingredient_id,
    model: Ingredient,
    new: NewIngredient,
    new_link: NewRecipeIngredient,
    field: "ingredients",
);
