use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;
use thiserror::Error;

/// A single failed validation check, tied to the form field that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("record not found")]
    NotFound,

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("database error: {0}")]
    Database(diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("template parse error: {0}")]
    TemplateParse(#[from] Box<handlebars::TemplateError>),

    #[error("blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn validation(field: &'static str, message: &str) -> Self {
        Error::Validation(vec![FieldError {
            field,
            message: message.to_owned(),
        }])
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match err {
            DieselError::NotFound => Error::NotFound,
            // tags.name is the only unique column in the schema
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Error::validation("name", "is already taken")
            }
            other => Error::Database(other),
        }
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Error::TemplateParse(Box::new(err))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => {
                let body = error_page("Not Found", "<p>No such record.</p>");
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            Error::Validation(errors) => {
                let items: String = errors
                    .iter()
                    .map(|e| format!("<li><strong>{}</strong> {}</li>", e.field, e.message))
                    .collect();
                let body = error_page(
                    "Validation Failed",
                    &format!("<ul class=\"errors\">{items}</ul>"),
                );
                (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
            }
            other => {
                error!("request failed: {other}");
                let body = error_page("Server Error", "<p>Something went wrong.</p>");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}

// Error pages skip the template registry so they can render even when
// the registry itself is the thing that failed.
fn error_page(title: &str, detail: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title} \u{b7} Blogly</title></head>\n\
         <body><h1>{title}</h1>{detail}<p><a href=\"/users\">Back to users</a></p></body></html>"
    )
}
