//! Server-side HTML pages.
//!
//! Pages are plain strings assembled with `push_str`/`format!`; every value that came from
//! a user or the database goes through [`escape`] on its way in.

use axum::http::StatusCode;

use crate::web::{RoleFlags, forms::FormErrors};

pub mod account;
pub mod admin;
pub mod courses;
pub mod quizzes;

/// Escape a string for safe HTML insertion (text and attribute values).
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1d2330; background: #f6f7fb; }
header { background: #243b6b; color: #fff; padding: 0.8rem 1.5rem; display: flex; gap: 1.5rem; align-items: center; }
header a { color: #fff; text-decoration: none; }
header .brand { font-weight: 700; margin-right: auto; }
main { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
section { background: #fff; border-radius: 6px; padding: 1rem 1.25rem; margin-bottom: 1.25rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.35rem 0.5rem; border-bottom: 1px solid #e3e6ee; }
label { display: block; margin-top: 0.6rem; font-weight: 600; }
input[type=text], input[type=password], input[type=email], input[type=number], textarea, select { width: 100%; padding: 0.35rem; box-sizing: border-box; }
ul.errors { color: #b3261e; margin: 0.25rem 0; padding-left: 1.2rem; }
p.error { color: #b3261e; font-weight: 600; }
button { margin-top: 0.8rem; padding: 0.4rem 1rem; }
.score { font-size: 1.6rem; font-weight: 700; }
"#;

fn nav(roles: Option<RoleFlags>) -> String {
    let mut html = String::from("<header>\n<span class=\"brand\">Courseware</span>\n");
    match roles {
        None => html.push_str("<a href=\"/login\">Log in</a>\n"),
        Some(roles) => {
            if roles.is_admin() {
                html.push_str("<a href=\"/admin\">Dashboard</a>\n");
                html.push_str("<a href=\"/quizzes/create\">New quiz</a>\n");
            }
            if roles.is_student() {
                html.push_str("<a href=\"/student\">Courses</a>\n");
            }
            html.push_str("<a href=\"/quizzes\">Quizzes</a>\n");
            html.push_str("<a href=\"/profile\">Profile</a>\n");
            html.push_str("<a href=\"/logout\">Log out</a>\n");
        }
    }
    html.push_str("</header>\n");
    html
}

/// Wraps `body` into a full document.
pub fn layout(title: &str, roles: Option<RoleFlags>, body: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{} · Courseware</title>\n", escape(title)));
    html.push_str("<style>");
    html.push_str(CSS);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&nav(roles));
    html.push_str("<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");

    html
}

pub fn field_errors(errors: &FormErrors, field: &str) -> String {
    let messages = errors.field(field);
    if messages.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class=\"errors\">");
    for message in messages {
        html.push_str(&format!("<li>{}</li>", escape(message)));
    }
    html.push_str("</ul>\n");
    html
}

/// `<label>` + `<input>` + its errors.
pub fn input(
    label: &str,
    name: &str,
    kind: &str,
    value: &str,
    errors: &FormErrors,
) -> String {
    // never echo passwords back
    let value = if kind == "password" { "" } else { value };
    format!(
        "<label for=\"id_{name}\">{label}</label>\n<input type=\"{kind}\" id=\"id_{name}\" name=\"{name}\" value=\"{value}\">\n{errors}",
        name = escape(name),
        label = escape(label),
        kind = kind,
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

pub fn textarea(label: &str, name: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        "<label for=\"id_{name}\">{label}</label>\n<textarea id=\"id_{name}\" name=\"{name}\" rows=\"4\">{value}</textarea>\n{errors}",
        name = escape(name),
        label = escape(label),
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

/// `<select>` over `(value, label)` options with `selected` preselected.
pub fn select(
    label: &str,
    name: &str,
    options: &[(String, String)],
    selected: &str,
    errors: &FormErrors,
) -> String {
    let mut html = format!(
        "<label for=\"id_{name}\">{label}</label>\n<select id=\"id_{name}\" name=\"{name}\">\n<option value=\"\">---------</option>\n",
        name = escape(name),
        label = escape(label),
    );
    for (value, text) in options {
        let mark = if value == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape(value),
            mark,
            escape(text)
        ));
    }
    html.push_str("</select>\n");
    html.push_str(&field_errors(errors, name));
    html
}

pub fn error_page(status: StatusCode, message: &str, details: Option<&str>) -> String {
    let mut body = format!(
        "<section>\n<h1>{} {}</h1>\n<p>{}</p>\n",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or("Error")),
        escape(message)
    );
    if let Some(details) = details {
        body.push_str(&format!("<pre>{}</pre>\n", escape(details)));
    }
    body.push_str("</section>\n");

    layout(status.canonical_reason().unwrap_or("Error"), None, &body)
}
