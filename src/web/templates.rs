//! Page templates, compiled into the binary

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppResult;

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("register.html", include_str!("../../templates/register.html")),
    ("reports.html", include_str!("../../templates/reports.html")),
    ("clients.html", include_str!("../../templates/clients.html")),
];

/// Build the template environment (HTML auto-escaping is on for `.html` names)
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

pub fn render<S: Serialize>(env: &Environment<'_>, name: &str, context: S) -> AppResult<Html<String>> {
    let html = env.get_template(name)?.render(context)?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_flash_is_escaped() {
        let env = environment().unwrap();
        let flash = crate::web::views::Flash::danger("<b>monto</b>");
        let html = render(&env, "index.html", context! { flash }).unwrap().0;
        assert!(html.contains("&lt;b&gt;monto&lt;/b&gt;"));
        assert!(html.contains("alert-danger"));
    }
}
