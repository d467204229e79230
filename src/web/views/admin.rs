use std::collections::HashMap;

use uuid::Uuid;

use super::{escape, field_errors, input, layout, select, textarea};
use crate::{
    model::entity::{Course, Lesson, Module, UserEntity},
    web::{
        RoleFlags,
        forms::{Bound, CourseForm, FormErrors, LessonForm, ModuleForm, StudentForm},
    },
};

/// The four creation forms of the dashboard. At most one is bound to a failed submission.
#[derive(Debug, Clone, Default)]
pub struct DashboardForms {
    pub student: Bound<StudentForm>,
    pub lesson: Bound<LessonForm>,
    pub module: Bound<ModuleForm>,
    pub course: Bound<CourseForm>,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardListings {
    pub students: Vec<UserEntity>,
    pub lessons: Vec<Lesson>,
    pub modules: Vec<Module>,
    pub courses: Vec<Course>,
}

fn marker(name: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"1\">\n",
        escape(name)
    )
}

fn course_options(courses: &[Course]) -> Vec<(String, String)> {
    courses
        .iter()
        .map(|c| (c.id().to_string(), c.title().to_string()))
        .collect()
}

fn student_section(bound: &Bound<StudentForm>, students: &[UserEntity]) -> String {
    let (form, errors) = (&bound.form, &bound.errors);
    let mut html = String::from("<section id=\"students\">\n<h2>Students</h2>\n");

    if students.is_empty() {
        html.push_str("<p>No students registered.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Username</th><th>Name</th><th>Email</th><th></th></tr></thead>\n<tbody>\n",
        );
        for student in students {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/students/{}/delete\">Delete</a></td></tr>\n",
                escape(student.username()),
                escape(&student.full_name()),
                escape(student.email()),
                student.id()
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("<h3>Register student</h3>\n<form method=\"post\" action=\"/admin\">\n");
    html.push_str(&marker("add_student"));
    html.push_str(&field_errors(errors, FormErrors::NON_FIELD));
    html.push_str(&input("Username", "username", "text", &form.username, errors));
    html.push_str(&input("Email", "email", "email", &form.email, errors));
    html.push_str(&input("First name", "first_name", "text", &form.first_name, errors));
    html.push_str(&input("Last name", "last_name", "text", &form.last_name, errors));
    html.push_str(&input("Password", "password1", "password", "", errors));
    html.push_str(&input("Password confirmation", "password2", "password", "", errors));
    html.push_str("<button type=\"submit\">Add student</button>\n</form>\n</section>\n");
    html
}

fn lesson_section(bound: &Bound<LessonForm>, lessons: &[Lesson]) -> String {
    let (form, errors) = (&bound.form, &bound.errors);
    let mut html = String::from("<section id=\"lessons\">\n<h2>Lessons</h2>\n");

    if lessons.is_empty() {
        html.push_str("<p>No lessons yet.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Title</th><th>Attachment</th><th></th></tr></thead>\n<tbody>\n",
        );
        for lesson in lessons {
            let attachment = match lesson.attachment() {
                Some(path) => format!("<a href=\"/uploads/{}\">download</a>", escape(path)),
                None => String::from("-"),
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td><a href=\"/lessons/{}/delete\">Delete</a></td></tr>\n",
                escape(lesson.title()),
                attachment,
                lesson.id()
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str(
        "<h3>Create lesson</h3>\n<form method=\"post\" action=\"/admin\" enctype=\"multipart/form-data\">\n",
    );
    html.push_str(&marker("add_lesson"));
    html.push_str(&input("Title", "title", "text", &form.title, errors));
    html.push_str(&textarea("Content", "content", &form.content, errors));
    html.push_str(
        "<label for=\"id_attachment\">Attachment</label>\n<input type=\"file\" id=\"id_attachment\" name=\"attachment\">\n",
    );
    html.push_str(&field_errors(errors, "attachment"));
    html.push_str("<button type=\"submit\">Add lesson</button>\n</form>\n</section>\n");
    html
}

fn module_section(bound: &Bound<ModuleForm>, modules: &[Module], courses: &[Course]) -> String {
    let (form, errors) = (&bound.form, &bound.errors);
    let titles: HashMap<Uuid, &str> = courses.iter().map(|c| (c.id(), c.title())).collect();
    let mut html = String::from("<section id=\"modules\">\n<h2>Modules</h2>\n");

    if modules.is_empty() {
        html.push_str("<p>No modules yet.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Title</th><th>Course</th><th>Order</th><th></th></tr></thead>\n<tbody>\n",
        );
        for module in modules {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/modules/{}/delete\">Delete</a></td></tr>\n",
                escape(module.title()),
                escape(titles.get(&module.course_id()).copied().unwrap_or("?")),
                module.order_index(),
                module.id()
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("<h3>Create module</h3>\n<form method=\"post\" action=\"/admin\">\n");
    html.push_str(&marker("add_module"));
    html.push_str(&input("Title", "title", "text", &form.title, errors));
    html.push_str(&textarea("Description", "description", &form.description, errors));
    html.push_str(&select(
        "Course",
        "course_id",
        &course_options(courses),
        &form.course_id,
        errors,
    ));
    html.push_str(&input("Order", "order_index", "number", &form.order_index, errors));
    html.push_str("<button type=\"submit\">Add module</button>\n</form>\n</section>\n");
    html
}

fn course_section(bound: &Bound<CourseForm>, courses: &[Course]) -> String {
    let (form, errors) = (&bound.form, &bound.errors);
    let mut html = String::from("<section id=\"courses\">\n<h2>Courses</h2>\n");

    if courses.is_empty() {
        html.push_str("<p>No courses yet.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Title</th><th>Description</th><th></th></tr></thead>\n<tbody>\n",
        );
        for course in courses {
            html.push_str(&format!(
                concat!(
                    "<tr><td><a href=\"/courses/{id}\">{title}</a></td><td>{description}</td><td>",
                    "<form method=\"post\" action=\"/admin\">",
                    "<input type=\"hidden\" name=\"course_id\" value=\"{id}\">",
                    "<button type=\"submit\" name=\"delete_course\" value=\"1\">Delete</button>",
                    "</form></td></tr>\n"
                ),
                id = course.id(),
                title = escape(course.title()),
                description = escape(course.description()),
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("<h3>Create course</h3>\n<form method=\"post\" action=\"/admin\">\n");
    html.push_str(&marker("add_course"));
    html.push_str(&input("Title", "title", "text", &form.title, errors));
    html.push_str(&textarea("Description", "description", &form.description, errors));
    html.push_str("<button type=\"submit\">Add course</button>\n</form>\n</section>\n");
    html
}

pub fn dashboard(forms: &DashboardForms, listings: &DashboardListings, roles: RoleFlags) -> String {
    let mut body = String::from("<h1>Administration</h1>\n");
    body.push_str(&student_section(&forms.student, &listings.students));
    body.push_str(&lesson_section(&forms.lesson, &listings.lessons));
    body.push_str(&module_section(&forms.module, &listings.modules, &listings.courses));
    body.push_str(&course_section(&forms.course, &listings.courses));

    layout("Administration", Some(roles), &body)
}

/// Confirmation page of a delete-* route. Submitting it POSTs back to `action`.
pub fn confirm_delete(kind: &str, name: &str, action: &str, roles: Option<RoleFlags>) -> String {
    let body = format!(
        concat!(
            "<section>\n<h1>Delete {kind}</h1>\n",
            "<p>Are you sure you want to delete the {kind} <strong>{name}</strong>? This cannot be undone.</p>\n",
            "<form method=\"post\" action=\"{action}\">\n",
            "<button type=\"submit\">Yes, delete</button>\n",
            "<a href=\"/admin\">Cancel</a>\n",
            "</form>\n</section>\n"
        ),
        kind = escape(kind),
        name = escape(name),
        action = escape(action),
    );

    layout(&format!("Delete {kind}"), roles, &body)
}
