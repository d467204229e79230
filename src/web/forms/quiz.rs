use async_trait::async_trait;

use super::{FormData, FormErrors, TITLE_MAX_LEN, Validate};
use crate::{
    model::{
        CrudRepository, DatabaseResult, ModelManager,
        entity::{Module, Question, QuizCreate},
    },
    web::AuthenticatedUser,
};

/// Number of question/answer pairs the creation form carries.
pub const QUESTION_SLOTS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct QuizForm {
    pub title: String,
    pub module_id: String,
}

impl QuizForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            title: data.value("title").trim().to_string(),
            module_id: data.value("module_id"),
        }
    }
}

#[async_trait]
impl Validate for QuizForm {
    type Output = QuizCreate;

    async fn validate(
        &self,
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Result<Self::Output, FormErrors>> {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, TITLE_MAX_LEN);
        let module_id = errors.require_uuid("module_id", &self.module_id);

        if let Some(id) = module_id {
            if Module::find_by_id(mm, actor, id).await?.is_none() {
                errors.add(
                    "module_id",
                    "Select a valid choice. That module does not exist.",
                );
            }
        }

        Ok(errors.into_result(|| QuizCreate {
            module_id: module_id.unwrap_or_default(),
            title: self.title.clone(),
        }))
    }
}

/// One question slot of the creation form, taken verbatim. A field that was not submitted is
/// `None`; nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub position: i32,
    pub text: Option<String>,
    pub answer: Option<String>,
}

impl QuestionDraft {
    /// Always returns exactly [`QUESTION_SLOTS`] drafts, slot `i` reading
    /// `question_{i}_text` / `question_{i}_answer`.
    pub fn collect(data: &FormData) -> Vec<Self> {
        (1..=QUESTION_SLOTS)
            .map(|i| Self {
                position: i as i32,
                text: data.get(&format!("question_{i}_text")).map(str::to_string),
                answer: data.get(&format!("question_{i}_answer")).map(str::to_string),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: usize,
    pub total: usize,
}

/// Scores a submission against `questions`. A question counts when an answer was submitted
/// under its field name, it has a stored answer, and the two are byte-for-byte equal.
pub fn grade(questions: &[Question], submission: &FormData) -> QuizScore {
    let score = questions
        .iter()
        .filter(|q| match (submission.get(&q.field_name()), q.answer()) {
            (Some(given), Some(expected)) => given == expected,
            _ => false,
        })
        .count();

    QuizScore {
        score,
        total: questions.len(),
    }
}
