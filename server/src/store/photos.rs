use diesel::prelude::*;
use uuid::Uuid;

use super::StoreError;
use crate::models::Photo;
use crate::schema::photos;

pub fn get_for_owner(conn: &mut PgConnection, owner: Uuid, id: Uuid) -> Result<Photo, StoreError> {
    photos::table
        .filter(photos::id.eq(id))
        .filter(photos::user_id.eq(owner))
        .select(Photo::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("Photo"))
}

/// Only the pre-generated JPEG thumbnail, without loading the full image.
pub fn thumbnail_for_owner(
    conn: &mut PgConnection,
    owner: Uuid,
    id: Uuid,
) -> Result<Vec<u8>, StoreError> {
    photos::table
        .filter(photos::id.eq(id))
        .filter(photos::user_id.eq(owner))
        .select(photos::thumbnail)
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("Photo"))
}
