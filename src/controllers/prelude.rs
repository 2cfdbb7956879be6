pub use axum::extract::{Extension, Path};
pub use axum::response::{Html, Redirect};
pub use axum_extra::extract::Form;
pub use serde::{Deserialize, Serialize};

pub use crate::error::Error;
pub use crate::util::db::{self, DbPool};
pub use crate::views::{self, TemplateEngine};
