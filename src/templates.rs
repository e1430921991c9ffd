use axum::response::Html;
use minijinja::Environment;

use crate::error::AppError;

/// Builds the template environment once at startup; handlers only ever read
/// from it. Templates are embedded so the binary has no runtime file deps.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("home.html", include_str!("../templates/home.html"))?;
    env.add_template("login.html", include_str!("../templates/login.html"))?;
    env.add_template(
        "registration.html",
        include_str!("../templates/registration.html"),
    )?;
    env.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
    env.add_template("favorites.html", include_str!("../templates/favorites.html"))?;
    env.add_template("new_entry.html", include_str!("../templates/new_entry.html"))?;
    env.add_template(
        "collections.html",
        include_str!("../templates/collections.html"),
    )?;
    Ok(env)
}

pub fn render(
    env: &Environment<'static>,
    name: &str,
    ctx: minijinja::Value,
) -> Result<Html<String>, AppError> {
    let template = env.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}
