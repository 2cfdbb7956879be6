use diesel::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::schema::tags;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = tags, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = tags)]
pub struct TagChanges {
    pub name: String,
}

impl TagChanges {
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "is required"));
        }

        Ok(TagChanges {
            name: name.to_owned(),
        })
    }
}

pub mod queries {
    use diesel::prelude::*;

    use super::{Tag, TagChanges};
    use crate::error::Error;
    use crate::models::post::Post;
    use crate::models::post_tag;
    use crate::schema::{posts, posts_tags, tags};

    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<Tag>, Error> {
        let rows = tags::table
            .order(tags::id.asc())
            .select(Tag::as_select())
            .load(conn)?;

        Ok(rows)
    }

    pub fn find(conn: &mut SqliteConnection, id: i32) -> Result<Tag, Error> {
        let tag = tags::table.find(id).select(Tag::as_select()).first(conn)?;

        Ok(tag)
    }

    /// Duplicate names surface as a validation failure via the unique
    /// index on `tags.name`.
    pub fn create(conn: &mut SqliteConnection, changes: TagChanges) -> Result<Tag, Error> {
        let tag = diesel::insert_into(tags::table)
            .values(&changes)
            .returning(Tag::as_returning())
            .get_result(conn)?;

        Ok(tag)
    }

    pub fn update(conn: &mut SqliteConnection, id: i32, changes: TagChanges) -> Result<Tag, Error> {
        find(conn, id)?;

        let tag = diesel::update(tags::table.find(id))
            .set(&changes)
            .returning(Tag::as_returning())
            .get_result(conn)?;

        Ok(tag)
    }

    /// Removes the tag and every link pointing at it in one transaction.
    pub fn delete(conn: &mut SqliteConnection, id: i32) -> Result<(), Error> {
        conn.transaction(|conn| {
            find(conn, id)?;

            post_tag::queries::clear_tag(conn, id)?;
            diesel::delete(tags::table.find(id)).execute(conn)?;

            Ok(())
        })
    }

    pub fn posts_for(conn: &mut SqliteConnection, tag_id: i32) -> Result<Vec<Post>, Error> {
        let rows = posts_tags::table
            .inner_join(posts::table)
            .filter(posts_tags::tag_id.eq(tag_id))
            .order(posts::id.asc())
            .select(Post::as_select())
            .load(conn)?;

        Ok(rows)
    }
}
