use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Module {
    id: Uuid,
    course_id: Uuid,
    title: String,
    description: String,
    order_index: i32,
}

#[derive(Debug)]
pub struct ModuleCreate {
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub order_index: Option<i32>,
}

impl ResourceTyped for Module {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Module
    }
}

impl Module {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn order_index(&self) -> i32 {
        self.order_index
    }
}

#[async_trait]
impl CrudRepository<Module, ModuleCreate, Uuid> for Module {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ModuleCreate,
    ) -> DatabaseResult<Self> {
        let module = sqlx::query_as(
            r#"
            INSERT INTO modules (id, course_id, title, description, order_index)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.course_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.order_index.unwrap_or(0))
        .fetch_one(mm.executor())
        .await?;
        Ok(module)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM modules WHERE id = $1")
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
        let module = sqlx::query_as("SELECT * FROM modules WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(module)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let modules = sqlx::query_as("SELECT * FROM modules ORDER BY course_id, order_index, title")
            .fetch_all(mm.executor())
            .await?;
        Ok(modules)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Module {
    pub async fn all_by_course(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        course_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let modules =
            sqlx::query_as("SELECT * FROM modules WHERE course_id = $1 ORDER BY order_index, title")
                .bind(course_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(modules)
    }
}
