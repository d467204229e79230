use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Quiz {
    id: Uuid,
    module_id: Uuid,
    title: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct QuizCreate {
    pub module_id: Uuid,
    pub title: String,
}

impl ResourceTyped for Quiz {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Quiz
    }
}

impl Quiz {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn module_id(&self) -> Uuid {
        self.module_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[async_trait]
impl CrudRepository<Quiz, QuizCreate, Uuid> for Quiz {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: QuizCreate,
    ) -> DatabaseResult<Self> {
        let quiz = sqlx::query_as(
            "INSERT INTO quizzes (id, module_id, title) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.module_id)
        .bind(&data.title)
        .fetch_one(mm.executor())
        .await?;
        Ok(quiz)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM quizzes WHERE id = $1")
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
        let quiz = sqlx::query_as("SELECT * FROM quizzes WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(quiz)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let quizzes = sqlx::query_as("SELECT * FROM quizzes ORDER BY created_at, title")
            .fetch_all(mm.executor())
            .await?;
        Ok(quizzes)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Quiz {
    /// Quizzes attached to any of `module_ids`. An empty slice yields no rows.
    pub async fn find_by_modules(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        module_ids: &[Uuid],
    ) -> DatabaseResult<Vec<Self>> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        let quizzes = sqlx::query_as(
            "SELECT * FROM quizzes WHERE module_id = ANY($1) ORDER BY created_at, title",
        )
        .bind(module_ids)
        .fetch_all(mm.executor())
        .await?;
        Ok(quizzes)
    }
}

// Utils

#[derive(Debug, Clone, FromRow)]
pub struct QuizSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub module_title: String,
    pub question_count: i64,
}

impl QuizSummaryRow {
    pub async fn fetch_all(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                q.id,
                q.title,
                m.title AS module_title,
                COUNT(qs.id) AS question_count
            FROM quizzes q
            JOIN modules m ON m.id = q.module_id
            LEFT JOIN questions qs ON qs.quiz_id = q.id
            GROUP BY q.id, m.title
            ORDER BY q.created_at, q.title
            "#,
        )
        .fetch_all(mm.executor())
        .await?;
        Ok(rows)
    }
}
