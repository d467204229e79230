use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Lesson {
    id: Uuid,
    title: String,
    content: String,
    attachment: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct LessonCreate {
    pub title: String,
    pub content: String,
    /// Path relative to the uploads directory.
    pub attachment: Option<String>,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Lesson
    }
}

impl Lesson {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn attachment(&self) -> Option<&str> {
        self.attachment.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[async_trait]
impl CrudRepository<Lesson, LessonCreate, Uuid> for Lesson {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: LessonCreate,
    ) -> DatabaseResult<Self> {
        let lesson = sqlx::query_as(
            "INSERT INTO lessons (id, title, content, attachment) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.attachment)
        .fetch_one(mm.executor())
        .await?;
        Ok(lesson)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM lessons WHERE id = $1")
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
        let lesson = sqlx::query_as("SELECT * FROM lessons WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(lesson)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let lessons = sqlx::query_as("SELECT * FROM lessons ORDER BY created_at, title")
            .fetch_all(mm.executor())
            .await?;
        Ok(lessons)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}
