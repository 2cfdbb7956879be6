use crate::controllers::prelude::*;
use crate::models::post::{self, Post};
use crate::models::user::{self, User, UserChanges};

#[derive(Debug, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Serialize)]
struct IndexView {
    users: Vec<User>,
}

#[derive(Serialize)]
struct ShowView {
    user: User,
    posts: Vec<Post>,
}

#[derive(Serialize)]
struct EditView {
    user: User,
}

/// `GET /users`
pub async fn index(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
) -> Result<Html<String>, Error> {
    let users = db::run(&pool, user::queries::all).await?;

    let page = views::render_into(&templates, "Users", "users/index", &IndexView { users })?;
    Ok(Html(page))
}

/// `GET /users/new`
pub async fn new(
    Extension(templates): Extension<TemplateEngine>,
) -> Result<Html<String>, Error> {
    let page = views::render_into(&templates, "New User", "users/new", &serde_json::json!({}))?;
    Ok(Html(page))
}

/// `POST /users/new`
pub async fn create(
    Extension(pool): Extension<DbPool>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, Error> {
    let changes = UserChanges::new(&form.first_name, &form.last_name, &form.image_url)?;
    let user = db::run(&pool, move |conn| user::queries::create(conn, changes)).await?;

    Ok(Redirect::to(&format!("/users/{}", user.id)))
}

/// `GET /users/{id}`
pub async fn show(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
) -> Result<Html<String>, Error> {
    let (user, posts) = db::run(&pool, move |conn| {
        let user = user::queries::find(conn, id)?;
        let posts = post::queries::for_user(conn, id)?;
        Ok((user, posts))
    })
    .await?;

    let title = user.full_name();
    let page = views::render_into(&templates, &title, "users/show", &ShowView { user, posts })?;
    Ok(Html(page))
}

/// `GET /users/{id}/edit`
pub async fn edit(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
) -> Result<Html<String>, Error> {
    let user = db::run(&pool, move |conn| user::queries::find(conn, id)).await?;

    let page = views::render_into(&templates, "Edit User", "users/edit", &EditView { user })?;
    Ok(Html(page))
}

/// `POST /users/{id}/edit`
pub async fn update(
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, Error> {
    let changes = UserChanges::new(&form.first_name, &form.last_name, &form.image_url)?;
    let user = db::run(&pool, move |conn| user::queries::update(conn, id, changes)).await?;

    Ok(Redirect::to(&format!("/users/{}", user.id)))
}

/// `POST /users/{id}/delete`
pub async fn delete(
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
) -> Result<Redirect, Error> {
    db::run(&pool, move |conn| user::queries::delete(conn, id)).await?;

    Ok(Redirect::to("/users"))
}
