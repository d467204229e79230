use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Course {
    id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[async_trait]
impl CrudRepository<Course, CourseCreate, Uuid> for Course {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CourseCreate,
    ) -> DatabaseResult<Self> {
        let course = sqlx::query_as(
            "INSERT INTO courses (id, title, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(mm.executor())
        .await?;
        Ok(course)
    }

    async fn delete(self, mm: &ModelManager, actor: &AuthenticatedUser) -> DatabaseResult<()> {
        Self::delete_by_id(mm, actor, self.id).await?;
        Ok(())
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let course = sqlx::query_as("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(course)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let courses = sqlx::query_as("SELECT * FROM courses ORDER BY created_at, title")
            .fetch_all(mm.executor())
            .await?;
        Ok(courses)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Course {
    /// Deletes without looking the row up first. Returns how many rows went away, so an
    /// unknown id is simply `0`. Modules and their quizzes follow through `ON DELETE CASCADE`.
    pub async fn delete_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(mm.executor())
            .await?;
        Ok(result.rows_affected())
    }
}
