use diesel::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::schema::users;

/// Shown for users who never picked an avatar.
pub const DEFAULT_IMAGE_URL: &str =
    "https://cvhrma.org/wp-content/uploads/2015/07/default-profile-photo.jpg";

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = users, check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub image_url: String,
}

impl User {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Field set shared by the create and edit forms; edits overwrite
/// every column, they are not a partial patch.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: Option<String>,
    pub image_url: String,
}

impl UserChanges {
    pub fn new(first_name: &str, last_name: &str, image_url: &str) -> Result<Self, Error> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(Error::validation("first_name", "is required"));
        }

        let last_name = match last_name.trim() {
            "" => None,
            last => Some(last.to_owned()),
        };

        let image_url = match image_url.trim() {
            "" => DEFAULT_IMAGE_URL.to_owned(),
            url => url.to_owned(),
        };

        Ok(UserChanges {
            first_name: first_name.to_owned(),
            last_name,
            image_url,
        })
    }
}

pub mod queries {
    use diesel::prelude::*;

    use super::{User, UserChanges};
    use crate::error::Error;
    use crate::models::post_tag;
    use crate::schema::{posts, users};

    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<User>, Error> {
        let rows = users::table
            .order(users::id.asc())
            .select(User::as_select())
            .load(conn)?;

        Ok(rows)
    }

    pub fn find(conn: &mut SqliteConnection, id: i32) -> Result<User, Error> {
        let user = users::table
            .find(id)
            .select(User::as_select())
            .first(conn)?;

        Ok(user)
    }

    pub fn create(conn: &mut SqliteConnection, changes: UserChanges) -> Result<User, Error> {
        let user = diesel::insert_into(users::table)
            .values(&changes)
            .returning(User::as_returning())
            .get_result(conn)?;

        Ok(user)
    }

    pub fn update(
        conn: &mut SqliteConnection,
        id: i32,
        changes: UserChanges,
    ) -> Result<User, Error> {
        find(conn, id)?;

        let user = diesel::update(users::table.find(id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(conn)?;

        Ok(user)
    }

    /// Removes the user together with their posts and those posts'
    /// tag links, all inside one transaction.
    pub fn delete(conn: &mut SqliteConnection, id: i32) -> Result<(), Error> {
        conn.transaction(|conn| {
            find(conn, id)?;

            let post_ids: Vec<i32> = posts::table
                .filter(posts::user_id.eq(id))
                .select(posts::id)
                .load(conn)?;

            for post_id in &post_ids {
                post_tag::queries::clear_post(conn, *post_id)?;
            }

            diesel::delete(posts::table.filter(posts::user_id.eq(id))).execute(conn)?;
            diesel::delete(users::table.find(id)).execute(conn)?;

            Ok(())
        })
    }
}
