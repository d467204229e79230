use crate::{
    model::{ModelManager, error::DatabaseResult},
    web::AuthenticatedUser,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    User,
    Student,
    Course,
    Module,
    Lesson,
    Quiz,
    Question,
    StudentProgress,
}

impl ResourceType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Student => "student",
            Self::Course => "course",
            Self::Module => "module",
            Self::Lesson => "lesson",
            Self::Quiz => "quiz",
            Self::Question => "question",
            Self::StudentProgress => "progress",
        }
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

/// Storage operations every entity supports. `actor` is the identity on whose behalf the
/// query runs; system tasks (session lookup, seeding) pass [`AuthenticatedUser::system`].
#[async_trait::async_trait]
pub trait CrudRepository<T, Create, V>
where
    T: ResourceTyped,
    V: Clone + Copy,
{
    async fn create(mm: &ModelManager, actor: &AuthenticatedUser, data: Create)
    -> DatabaseResult<T>;

    async fn delete(self, mm: &ModelManager, actor: &AuthenticatedUser) -> DatabaseResult<()>
    where
        Self: Sized;

    async fn find_by_id(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        id: V,
    ) -> DatabaseResult<Option<T>>;

    async fn list(mm: &ModelManager, actor: &AuthenticatedUser) -> DatabaseResult<Vec<T>>;

    async fn count(mm: &ModelManager, actor: &AuthenticatedUser) -> DatabaseResult<i64>;
}
