pub mod posts;
pub mod prelude;
pub mod tags;
pub mod users;

use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::util::db::DbPool;
use crate::views::TemplateEngine;

pub fn router(pool: DbPool, templates: TemplateEngine) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/users") }))
        .route("/users", get(users::index))
        .route("/users/new", get(users::new).post(users::create))
        .route("/users/:user_id", get(users::show))
        .route("/users/:user_id/edit", get(users::edit).post(users::update))
        .route("/users/:user_id/delete", post(users::delete))
        .route("/users/:user_id/posts/new", get(posts::new).post(posts::create))
        .route("/users/:user_id/posts/:post_id", get(posts::show))
        .route(
            "/users/:user_id/posts/:post_id/edit",
            get(posts::edit).post(posts::update),
        )
        .route("/users/:user_id/posts/:post_id/delete", post(posts::delete))
        .route("/tags", get(tags::index))
        .route("/tags/new", get(tags::new).post(tags::create))
        .route("/tags/:id", get(tags::show))
        .route("/tags/:id/edit", get(tags::edit).post(tags::update))
        .route("/tags/:id/delete", post(tags::delete))
        .layer(Extension(pool))
        .layer(Extension(templates))
}
