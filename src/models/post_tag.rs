use diesel::prelude::*;

use crate::models::post::Post;
use crate::models::tag::Tag;
use crate::schema::posts_tags;

/// One applied tag; the pair is either present or absent.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = posts_tags, primary_key(post_id, tag_id))]
#[diesel(belongs_to(Post), belongs_to(Tag))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = posts_tags)]
pub struct NewPostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

pub mod queries {
    use diesel::prelude::*;

    use super::NewPostTag;
    use crate::error::Error;
    use crate::schema::posts_tags;

    pub fn tag_ids_for(conn: &mut SqliteConnection, post_id: i32) -> Result<Vec<i32>, Error> {
        let ids = posts_tags::table
            .filter(posts_tags::post_id.eq(post_id))
            .order(posts_tags::tag_id.asc())
            .select(posts_tags::tag_id)
            .load(conn)?;

        Ok(ids)
    }

    pub fn link(conn: &mut SqliteConnection, post_id: i32, tag_ids: &[i32]) -> Result<(), Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        let rows: Vec<NewPostTag> = tag_ids
            .iter()
            .map(|&tag_id| NewPostTag { post_id, tag_id })
            .collect();

        diesel::insert_into(posts_tags::table)
            .values(&rows)
            .execute(conn)?;

        Ok(())
    }

    pub fn unlink(conn: &mut SqliteConnection, post_id: i32, tag_ids: &[i32]) -> Result<(), Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        diesel::delete(
            posts_tags::table
                .filter(posts_tags::post_id.eq(post_id))
                .filter(posts_tags::tag_id.eq_any(tag_ids)),
        )
        .execute(conn)?;

        Ok(())
    }

    pub fn clear_post(conn: &mut SqliteConnection, post_id: i32) -> Result<(), Error> {
        diesel::delete(posts_tags::table.filter(posts_tags::post_id.eq(post_id)))
            .execute(conn)?;

        Ok(())
    }

    pub fn clear_tag(conn: &mut SqliteConnection, tag_id: i32) -> Result<(), Error> {
        diesel::delete(posts_tags::table.filter(posts_tags::tag_id.eq(tag_id)))
            .execute(conn)?;

        Ok(())
    }
}
