use super::{escape, field_errors, input, layout, select};
use crate::{
    model::entity::{Module, Question, Quiz, QuizSummaryRow},
    web::{
        RoleFlags,
        forms::{Bound, FormErrors, QUESTION_SLOTS, QuestionDraft, QuizForm, QuizScore},
    },
};

pub fn create_quiz(
    bound: &Bound<QuizForm>,
    drafts: &[QuestionDraft],
    modules: &[Module],
    roles: RoleFlags,
) -> String {
    let (form, errors) = (&bound.form, &bound.errors);
    let options: Vec<(String, String)> = modules
        .iter()
        .map(|m| (m.id().to_string(), m.title().to_string()))
        .collect();
    let no_errors = FormErrors::default();

    let mut body = String::from(
        "<section>\n<h1>Create quiz</h1>\n<form method=\"post\" action=\"/quizzes/create\">\n",
    );
    body.push_str(&field_errors(errors, FormErrors::NON_FIELD));
    body.push_str(&input("Title", "title", "text", &form.title, errors));
    body.push_str(&select("Module", "module_id", &options, &form.module_id, errors));

    for i in 1..=QUESTION_SLOTS {
        let draft = drafts.get(i - 1);
        let text = draft.and_then(|d| d.text.as_deref()).unwrap_or_default();
        let answer = draft.and_then(|d| d.answer.as_deref()).unwrap_or_default();

        body.push_str(&format!("<h3>Question {i}</h3>\n"));
        body.push_str(&input(
            "Question",
            &format!("question_{i}_text"),
            "text",
            text,
            &no_errors,
        ));
        body.push_str(&input(
            "Answer",
            &format!("question_{i}_answer"),
            "text",
            answer,
            &no_errors,
        ));
    }

    body.push_str("<button type=\"submit\">Create quiz</button>\n</form>\n</section>\n");
    layout("Create quiz", Some(roles), &body)
}

pub fn quiz_list(quizzes: &[QuizSummaryRow], roles: RoleFlags) -> String {
    let mut body = String::from("<section>\n<h1>Quizzes</h1>\n");

    if quizzes.is_empty() {
        body.push_str("<p>No quizzes yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Quiz</th><th>Module</th><th>Questions</th></tr></thead>\n<tbody>\n",
        );
        for quiz in quizzes {
            body.push_str(&format!(
                "<tr><td><a href=\"/quizzes/{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                quiz.id,
                escape(&quiz.title),
                escape(&quiz.module_title),
                quiz.question_count
            ));
        }
        body.push_str("</tbody></table>\n");
    }
    body.push_str("</section>\n");

    layout("Quizzes", Some(roles), &body)
}

pub fn quiz_detail(quiz: &Quiz, questions: &[Question], roles: RoleFlags) -> String {
    let mut body = format!(
        "<section>\n<h1>{}</h1>\n<form method=\"post\" action=\"/quizzes/{}\">\n",
        escape(quiz.title()),
        quiz.id()
    );

    if questions.is_empty() {
        body.push_str("<p>This quiz has no questions.</p>\n");
    }
    for (n, question) in questions.iter().enumerate() {
        let name = question.field_name();
        body.push_str(&format!(
            "<label for=\"id_{name}\">{}. {}</label>\n<input type=\"text\" id=\"id_{name}\" name=\"{name}\">\n",
            n + 1,
            escape(question.text().unwrap_or_default()),
        ));
    }

    body.push_str("<button type=\"submit\">Submit answers</button>\n</form>\n</section>\n");
    layout(quiz.title(), Some(roles), &body)
}

pub fn quiz_result(quiz: &Quiz, result: QuizScore, roles: RoleFlags) -> String {
    let body = format!(
        concat!(
            "<section>\n<h1>{title}</h1>\n",
            "<p class=\"score\">Score: <span id=\"score\">{score}</span> / <span id=\"total\">{total}</span></p>\n",
            "<p><a href=\"/quizzes/{id}\">Try again</a></p>\n",
            "</section>\n"
        ),
        title = escape(quiz.title()),
        score = result.score,
        total = result.total,
        id = quiz.id(),
    );

    layout("Quiz result", Some(roles), &body)
}
