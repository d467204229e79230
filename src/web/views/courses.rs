use super::{escape, layout};
use crate::{
    model::entity::{Course, Quiz},
    web::RoleFlags,
};

pub fn course_detail(course: &Course, quizzes: &[Quiz], roles: Option<RoleFlags>) -> String {
    let mut body = format!(
        "<section>\n<h1>{}</h1>\n<p>{}</p>\n</section>\n",
        escape(course.title()),
        escape(course.description())
    );

    body.push_str("<section>\n<h2>Quizzes</h2>\n");
    if quizzes.is_empty() {
        body.push_str("<p>This course has no quizzes yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for quiz in quizzes {
            body.push_str(&format!(
                "<li><a href=\"/quizzes/{}\">{}</a></li>\n",
                quiz.id(),
                escape(quiz.title())
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("</section>\n");

    layout(course.title(), roles, &body)
}
