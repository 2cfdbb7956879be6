pub mod controllers;
pub mod error;
pub mod models;
pub mod schema;
pub mod util;
pub mod views;

pub use error::Error;

use axum::Router;

use crate::util::db::DbPool;

/// Builds the full application router over `pool`, with the template
/// registry compiled in.
pub fn app(pool: DbPool) -> Result<Router, Error> {
    let templates = views::registry()?;

    Ok(controllers::router(pool, templates))
}
