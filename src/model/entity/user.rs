use crate::model::repo::ResourceTyped;
use crate::web::{AuthenticatedUser, RoleFlags};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    id: Uuid,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    is_admin: bool,
    is_student: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserEntityCreate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_student: bool,
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::User
    }
}

impl UserEntity {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_student(&self) -> bool {
        self.is_student
    }

    pub fn roles(&self) -> RoleFlags {
        RoleFlags::new(self.is_admin, self.is_student)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[async_trait]
impl CrudRepository<UserEntity, UserEntityCreate, Uuid> for UserEntity {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: UserEntityCreate,
    ) -> DatabaseResult<Self> {
        let user = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, password_hash, is_admin, is_student)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.password_hash)
        .bind(data.is_admin)
        .bind(data.is_student)
        .fetch_one(mm.executor())
        .await?;

        Ok(user)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
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
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(user)
    }

    async fn list(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<Vec<Self>> {
        let users = sqlx::query_as("SELECT * FROM users ORDER BY created_at, username")
            .fetch_all(mm.executor())
            .await?;
        Ok(users)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl UserEntity {
    pub async fn find_by_username(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        username: &str,
    ) -> DatabaseResult<Option<Self>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(mm.executor())
            .await?;
        Ok(user)
    }

    /// Same as `find_by_id` but only matches accounts flagged as students.
    pub async fn find_student(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1 AND is_student = TRUE")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(user)
    }

    pub async fn list_students(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let users = sqlx::query_as(
            "SELECT * FROM users WHERE is_student = TRUE ORDER BY created_at, username",
        )
        .fetch_all(mm.executor())
        .await?;
        Ok(users)
    }
}
