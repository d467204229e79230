use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// A quiz question. `text` and `answer` are stored exactly as submitted and may be absent.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    id: Uuid,
    quiz_id: Uuid,
    text: Option<String>,
    answer: Option<String>,
    position: i32,
}

#[derive(Debug, Clone)]
pub struct QuestionCreate {
    pub quiz_id: Uuid,
    pub text: Option<String>,
    pub answer: Option<String>,
    pub position: i32,
}

impl ResourceTyped for Question {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Question
    }
}

impl Question {
    pub fn new(
        id: Uuid,
        quiz_id: Uuid,
        text: Option<String>,
        answer: Option<String>,
        position: i32,
    ) -> Self {
        Self {
            id,
            quiz_id,
            text,
            answer,
            position,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz_id(&self) -> Uuid {
        self.quiz_id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// Name of the form field a student's answer to this question is submitted under.
    pub fn field_name(&self) -> String {
        format!("question_{}", self.id)
    }
}

#[async_trait]
impl CrudRepository<Question, QuestionCreate, Uuid> for Question {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: QuestionCreate,
    ) -> DatabaseResult<Self> {
        let question = sqlx::query_as(
            r#"
            INSERT INTO questions (id, quiz_id, text, answer, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.quiz_id)
        .bind(&data.text)
        .bind(&data.answer)
        .bind(data.position)
        .fetch_one(mm.executor())
        .await?;
        Ok(question)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let question = sqlx::query_as("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(question)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let questions = sqlx::query_as("SELECT * FROM questions ORDER BY quiz_id, position")
            .fetch_all(mm.executor())
            .await?;
        Ok(questions)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Question {
    /// Questions of a quiz in the order they were submitted.
    pub async fn all_by_quiz(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        quiz_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let questions =
            sqlx::query_as("SELECT * FROM questions WHERE quiz_id = $1 ORDER BY position, id")
                .bind(quiz_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(questions)
    }
}
