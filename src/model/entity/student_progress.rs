use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct StudentProgress {
    id: Uuid,
    student_id: Uuid,
    lesson_id: Uuid,
    completed: bool,
    updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct StudentProgressCreate {
    pub student_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
}

impl ResourceTyped for StudentProgress {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::StudentProgress
    }
}

impl StudentProgress {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn lesson_id(&self) -> Uuid {
        self.lesson_id
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[async_trait]
impl CrudRepository<StudentProgress, StudentProgressCreate, Uuid> for StudentProgress {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: StudentProgressCreate,
    ) -> DatabaseResult<Self> {
        let progress = sqlx::query_as(
            r#"
            INSERT INTO student_progress (id, student_id, lesson_id, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.student_id)
        .bind(data.lesson_id)
        .bind(data.completed)
        .fetch_one(mm.executor())
        .await?;
        Ok(progress)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM student_progress WHERE id = $1")
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
        let progress = sqlx::query_as("SELECT * FROM student_progress WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(progress)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let progress = sqlx::query_as("SELECT * FROM student_progress ORDER BY updated_at")
            .fetch_all(mm.executor())
            .await?;
        Ok(progress)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_progress")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}

// Utils

/// Progress entry joined with the lesson it refers to, as shown on the profile page.
#[derive(Debug, Clone, FromRow)]
pub struct StudentProgressRow {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub lesson_title: String,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl StudentProgressRow {
    /// Rows belonging to the acting user. Non-students simply have none.
    pub async fn for_student(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                sp.id,
                sp.lesson_id,
                l.title AS lesson_title,
                sp.completed,
                sp.updated_at
            FROM student_progress sp
            JOIN lessons l ON l.id = sp.lesson_id
            WHERE sp.student_id = $1
            ORDER BY sp.updated_at DESC
            "#,
        )
        .bind(actor.user_id())
        .fetch_all(mm.executor())
        .await?;
        Ok(rows)
    }
}
