use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::models::user::User;
use crate::schema::posts;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations, Serialize)]
#[diesel(table_name = posts, belongs_to(User))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewPost {
    pub fn new(user_id: i32, title: &str, content: &str) -> Result<Self, Error> {
        let (title, content) = validate_fields(title, content)?;

        Ok(NewPost {
            user_id,
            title,
            content,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

/// Edits overwrite the title and content and stamp the post with a
/// fresh `created_at`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = posts, treat_none_as_null = true)]
pub struct PostChanges {
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PostChanges {
    pub fn new(title: &str, content: &str) -> Result<Self, Error> {
        let (title, content) = validate_fields(title, content)?;

        Ok(PostChanges {
            title,
            content,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

fn validate_fields(title: &str, content: &str) -> Result<(String, Option<String>), Error> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::validation("title", "is required"));
    }

    let content = match content.trim() {
        "" => None,
        text => Some(text.to_owned()),
    };

    Ok((title.to_owned(), content))
}

pub mod queries {
    use std::collections::BTreeSet;

    use diesel::prelude::*;

    use super::{NewPost, Post, PostChanges};
    use crate::error::Error;
    use crate::models::tag::Tag;
    use crate::models::{post_tag, user};
    use crate::schema::{posts, posts_tags, tags};

    pub fn find(conn: &mut SqliteConnection, id: i32) -> Result<Post, Error> {
        let post = posts::table
            .find(id)
            .select(Post::as_select())
            .first(conn)?;

        Ok(post)
    }

    pub fn for_user(conn: &mut SqliteConnection, user_id: i32) -> Result<Vec<Post>, Error> {
        let rows = posts::table
            .filter(posts::user_id.eq(user_id))
            .order(posts::id.asc())
            .select(Post::as_select())
            .load(conn)?;

        Ok(rows)
    }

    pub fn tags_for(conn: &mut SqliteConnection, post_id: i32) -> Result<Vec<Tag>, Error> {
        let rows = posts_tags::table
            .inner_join(tags::table)
            .filter(posts_tags::post_id.eq(post_id))
            .order(tags::id.asc())
            .select(Tag::as_select())
            .load(conn)?;

        Ok(rows)
    }

    /// Inserts the post and its tag links in one transaction.
    pub fn create(
        conn: &mut SqliteConnection,
        new_post: NewPost,
        tag_ids: &[i32],
    ) -> Result<Post, Error> {
        let tag_ids: Vec<i32> = dedup(tag_ids);

        conn.transaction(|conn| {
            user::queries::find(conn, new_post.user_id)?;

            let post = diesel::insert_into(posts::table)
                .values(&new_post)
                .returning(Post::as_returning())
                .get_result(conn)?;

            post_tag::queries::link(conn, post.id, &tag_ids)?;

            Ok(post)
        })
    }

    /// Overwrites the post fields, then resynchronizes its tag links by
    /// set difference: links missing from the form are removed, newly
    /// checked ones inserted. Runs in one transaction so a failure
    /// cannot strand the post with a half-applied tag set.
    pub fn update(
        conn: &mut SqliteConnection,
        id: i32,
        changes: PostChanges,
        tag_ids: &[i32],
    ) -> Result<Post, Error> {
        let desired: BTreeSet<i32> = tag_ids.iter().copied().collect();

        conn.transaction(|conn| {
            find(conn, id)?;

            let post = diesel::update(posts::table.find(id))
                .set(&changes)
                .returning(Post::as_returning())
                .get_result(conn)?;

            let current: BTreeSet<i32> =
                post_tag::queries::tag_ids_for(conn, id)?.into_iter().collect();

            let to_add: Vec<i32> = desired.difference(&current).copied().collect();
            let to_remove: Vec<i32> = current.difference(&desired).copied().collect();

            post_tag::queries::link(conn, id, &to_add)?;
            post_tag::queries::unlink(conn, id, &to_remove)?;

            Ok(post)
        })
    }

    /// Removes the post and its tag links; returns the deleted row so
    /// callers can redirect to the owning user.
    pub fn delete(conn: &mut SqliteConnection, id: i32) -> Result<Post, Error> {
        conn.transaction(|conn| {
            let post = find(conn, id)?;

            post_tag::queries::clear_post(conn, id)?;
            diesel::delete(posts::table.find(id)).execute(conn)?;

            Ok(post)
        })
    }

    fn dedup(tag_ids: &[i32]) -> Vec<i32> {
        tag_ids
            .iter()
            .copied()
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect()
    }
}
