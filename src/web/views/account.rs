use super::{escape, input, layout};
use crate::{
    model::entity::{Course, StudentProgressRow},
    web::{RoleFlags, forms::{FormErrors, LoginForm}},
};

pub fn login_page(form: &LoginForm, error: Option<&str>, roles: Option<RoleFlags>) -> String {
    let mut body = String::from("<section>\n<h1>Log in</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    let no_errors = FormErrors::default();
    body.push_str("<form method=\"post\" action=\"/login\">\n");
    body.push_str(&input(
        "Username",
        "username",
        "text",
        &form.username,
        &no_errors,
    ));
    body.push_str(&input("Password", "password", "password", "", &no_errors));
    body.push_str("<button type=\"submit\">Log in</button>\n</form>\n</section>\n");

    layout("Log in", roles, &body)
}

pub fn student_dashboard(courses: &[Course], roles: RoleFlags) -> String {
    let mut body = String::from("<section>\n<h1>Courses</h1>\n");

    if courses.is_empty() {
        body.push_str("<p>No courses yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for course in courses {
            body.push_str(&format!(
                "<li><a href=\"/courses/{}\">{}</a>: {}</li>\n",
                course.id(),
                escape(course.title()),
                escape(course.description())
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("</section>\n");

    layout("Courses", Some(roles), &body)
}

pub fn profile(progress: &[StudentProgressRow], roles: RoleFlags) -> String {
    let mut body = String::from("<section>\n<h1>My progress</h1>\n");

    if progress.is_empty() {
        body.push_str("<p>No progress recorded.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Lesson</th><th>Status</th><th>Updated</th></tr></thead>\n<tbody>\n",
        );
        for row in progress {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&row.lesson_title),
                if row.completed { "Completed" } else { "In progress" },
                row.updated_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
        body.push_str("</tbody></table>\n");
    }
    body.push_str("</section>\n");

    layout("Profile", Some(roles), &body)
}
