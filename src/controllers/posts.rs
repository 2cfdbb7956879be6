use crate::controllers::prelude::*;
use crate::models::post::{self, NewPost, Post, PostChanges};
use crate::models::tag::{self, Tag};
use crate::models::user::{self, User};
use crate::models::post_tag;

#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    /// Checkbox group; one `tags=<id>` pair per checked box.
    #[serde(default)]
    tags: Vec<i32>,
}

/// A tag checkbox on the post forms.
#[derive(Serialize)]
struct TagChoice {
    id: i32,
    name: String,
    checked: bool,
}

impl TagChoice {
    fn from_tags(tags: Vec<Tag>, selected: &[i32]) -> Vec<TagChoice> {
        tags.into_iter()
            .map(|tag| TagChoice {
                checked: selected.contains(&tag.id),
                id: tag.id,
                name: tag.name,
            })
            .collect()
    }
}

#[derive(Serialize)]
struct FormView {
    user: User,
    tags: Vec<TagChoice>,
}

#[derive(Serialize)]
struct EditView {
    user: User,
    post: Post,
    tags: Vec<TagChoice>,
}

#[derive(Serialize)]
struct ShowView {
    user: User,
    post: Post,
    tags: Vec<Tag>,
}

/// `GET /users/{id}/posts/new`
pub async fn new(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, Error> {
    let (user, tags) = db::run(&pool, move |conn| {
        let user = user::queries::find(conn, user_id)?;
        let tags = tag::queries::all(conn)?;
        Ok((user, tags))
    })
    .await?;

    let view = FormView {
        user,
        tags: TagChoice::from_tags(tags, &[]),
    };
    let page = views::render_into(&templates, "New Post", "posts/new", &view)?;
    Ok(Html(page))
}

/// `POST /users/{id}/posts/new`
pub async fn create(
    Extension(pool): Extension<DbPool>,
    Path(user_id): Path<i32>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, Error> {
    let new_post = NewPost::new(user_id, &form.title, &form.content)?;
    let post = db::run(&pool, move |conn| {
        post::queries::create(conn, new_post, &form.tags)
    })
    .await?;

    Ok(Redirect::to(&format!(
        "/users/{}/posts/{}",
        post.user_id, post.id
    )))
}

/// `GET /users/{user_id}/posts/{post_id}`
pub async fn show(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path((_user_id, post_id)): Path<(i32, i32)>,
) -> Result<Html<String>, Error> {
    let (user, post, tags) = db::run(&pool, move |conn| {
        let post = post::queries::find(conn, post_id)?;
        let user = user::queries::find(conn, post.user_id)?;
        let tags = post::queries::tags_for(conn, post_id)?;
        Ok((user, post, tags))
    })
    .await?;

    let title = post.title.clone();
    let view = ShowView { user, post, tags };
    let page = views::render_into(&templates, &title, "posts/show", &view)?;
    Ok(Html(page))
}

/// `GET /users/{user_id}/posts/{post_id}/edit`
pub async fn edit(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path((_user_id, post_id)): Path<(i32, i32)>,
) -> Result<Html<String>, Error> {
    let (user, post, tags, selected) = db::run(&pool, move |conn| {
        let post = post::queries::find(conn, post_id)?;
        let user = user::queries::find(conn, post.user_id)?;
        let tags = tag::queries::all(conn)?;
        let selected = post_tag::queries::tag_ids_for(conn, post_id)?;
        Ok((user, post, tags, selected))
    })
    .await?;

    let view = EditView {
        user,
        post,
        tags: TagChoice::from_tags(tags, &selected),
    };
    let page = views::render_into(&templates, "Edit Post", "posts/edit", &view)?;
    Ok(Html(page))
}

/// `POST /users/{user_id}/posts/{post_id}/edit`
pub async fn update(
    Extension(pool): Extension<DbPool>,
    Path((_user_id, post_id)): Path<(i32, i32)>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, Error> {
    let changes = PostChanges::new(&form.title, &form.content)?;
    let post = db::run(&pool, move |conn| {
        post::queries::update(conn, post_id, changes, &form.tags)
    })
    .await?;

    Ok(Redirect::to(&format!(
        "/users/{}/posts/{}",
        post.user_id, post.id
    )))
}

/// `POST /users/{user_id}/posts/{post_id}/delete`
pub async fn delete(
    Extension(pool): Extension<DbPool>,
    Path((_user_id, post_id)): Path<(i32, i32)>,
) -> Result<Redirect, Error> {
    let post = db::run(&pool, move |conn| post::queries::delete(conn, post_id)).await?;

    Ok(Redirect::to(&format!("/users/{}", post.user_id)))
}
