use crate::controllers::prelude::*;
use crate::models::post::Post;
use crate::models::tag::{self, Tag, TagChanges};

#[derive(Debug, Deserialize)]
pub struct TagForm {
    #[serde(default)]
    name: String,
}

#[derive(Serialize)]
struct IndexView {
    tags: Vec<Tag>,
}

#[derive(Serialize)]
struct ShowView {
    tag: Tag,
    posts: Vec<Post>,
}

#[derive(Serialize)]
struct EditView {
    tag: Tag,
}

/// `GET /tags`
pub async fn index(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
) -> Result<Html<String>, Error> {
    let tags = db::run(&pool, tag::queries::all).await?;

    let page = views::render_into(&templates, "Tags", "tags/index", &IndexView { tags })?;
    Ok(Html(page))
}

/// `GET /tags/new`
pub async fn new(
    Extension(templates): Extension<TemplateEngine>,
) -> Result<Html<String>, Error> {
    let page = views::render_into(&templates, "New Tag", "tags/new", &serde_json::json!({}))?;
    Ok(Html(page))
}

/// `POST /tags/new`
pub async fn create(
    Extension(pool): Extension<DbPool>,
    Form(form): Form<TagForm>,
) -> Result<Redirect, Error> {
    let changes = TagChanges::new(&form.name)?;
    db::run(&pool, move |conn| tag::queries::create(conn, changes)).await?;

    Ok(Redirect::to("/tags"))
}

/// `GET /tags/{id}`
pub async fn show(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
) -> Result<Html<String>, Error> {
    let (tag, posts) = db::run(&pool, move |conn| {
        let tag = tag::queries::find(conn, id)?;
        let posts = tag::queries::posts_for(conn, id)?;
        Ok((tag, posts))
    })
    .await?;

    let title = tag.name.clone();
    let page = views::render_into(&templates, &title, "tags/show", &ShowView { tag, posts })?;
    Ok(Html(page))
}

/// `GET /tags/{id}/edit`
pub async fn edit(
    Extension(templates): Extension<TemplateEngine>,
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
) -> Result<Html<String>, Error> {
    let tag = db::run(&pool, move |conn| tag::queries::find(conn, id)).await?;

    let page = views::render_into(&templates, "Edit Tag", "tags/edit", &EditView { tag })?;
    Ok(Html(page))
}

/// `POST /tags/{id}/edit`
pub async fn update(
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
    Form(form): Form<TagForm>,
) -> Result<Redirect, Error> {
    let changes = TagChanges::new(&form.name)?;
    let tag = db::run(&pool, move |conn| tag::queries::update(conn, id, changes)).await?;

    Ok(Redirect::to(&format!("/tags/{}", tag.id)))
}

/// `POST /tags/{id}/delete`
pub async fn delete(
    Extension(pool): Extension<DbPool>,
    Path(id): Path<i32>,
) -> Result<Redirect, Error> {
    db::run(&pool, move |conn| tag::queries::delete(conn, id)).await?;

    Ok(Redirect::to("/tags"))
}
