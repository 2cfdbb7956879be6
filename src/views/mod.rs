use std::sync::Arc;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Error;

pub type TemplateEngine = Arc<Handlebars<'static>>;

// Templates are compiled into the binary; there is no on-disk template
// root to configure or reload.
static TEMPLATES: &[(&str, &str)] = &[
    ("layouts/main", include_str!("../../templates/layouts/main.hbs")),
    ("users/index", include_str!("../../templates/users/index.hbs")),
    ("users/new", include_str!("../../templates/users/new.hbs")),
    ("users/show", include_str!("../../templates/users/show.hbs")),
    ("users/edit", include_str!("../../templates/users/edit.hbs")),
    ("posts/new", include_str!("../../templates/posts/new.hbs")),
    ("posts/show", include_str!("../../templates/posts/show.hbs")),
    ("posts/edit", include_str!("../../templates/posts/edit.hbs")),
    ("tags/index", include_str!("../../templates/tags/index.hbs")),
    ("tags/new", include_str!("../../templates/tags/new.hbs")),
    ("tags/show", include_str!("../../templates/tags/show.hbs")),
    ("tags/edit", include_str!("../../templates/tags/edit.hbs")),
];

pub fn registry() -> Result<TemplateEngine, Error> {
    let mut registry = Handlebars::new();

    for (name, source) in TEMPLATES {
        registry.register_template_string(name, *source)?;
    }

    Ok(Arc::new(registry))
}

#[derive(Serialize)]
struct Layout<'a> {
    title: &'a str,
    inner: String,
}

/// Renders `template` with `data`, then wraps the result in the main
/// layout.
pub fn render_into<T>(
    engine: &Handlebars<'static>,
    title: &str,
    template: &str,
    data: &T,
) -> Result<String, Error>
where
    T: Serialize,
{
    let inner = engine.render(template, data)?;
    let page = engine.render("layouts/main", &Layout { title, inner })?;

    Ok(page)
}
