use async_trait::async_trait;
use uuid::Uuid;

use super::{FormData, FormErrors, NAME_MAX_LEN, TITLE_MAX_LEN, UploadedFile, Validate};
use crate::{
    model::{
        CrudRepository, DatabaseResult, ModelManager,
        entity::{Course, CourseCreate, ModuleCreate, UserEntity},
    },
    web::AuthenticatedUser,
};

const PASSWORD_MIN_LEN: usize = 8;
const EMAIL_MAX_LEN: usize = 254;

/// What a POST to the admin dashboard asks for. Decided by which marker field is present,
/// checked in declaration order.
///
/// A body cut off at the size limit is always a lesson submission: the lesson form is the
/// only one on the dashboard that uploads files, and its marker may be lost with the rest.
#[derive(Debug, Clone)]
pub enum DashboardIntent {
    AddStudent(StudentForm),
    AddLesson(LessonForm),
    AddModule(ModuleForm),
    AddCourse(CourseForm),
    /// Raw `course_id` value; `None` when the field is missing.
    DeleteCourse(Option<String>),
}

impl DashboardIntent {
    pub fn from_data(data: &FormData) -> Option<Self> {
        if data.is_truncated() {
            Some(Self::AddLesson(LessonForm::from_data(data)))
        } else if data.contains("add_student") {
            Some(Self::AddStudent(StudentForm::from_data(data)))
        } else if data.contains("add_lesson") {
            Some(Self::AddLesson(LessonForm::from_data(data)))
        } else if data.contains("add_module") {
            Some(Self::AddModule(ModuleForm::from_data(data)))
        } else if data.contains("add_course") {
            Some(Self::AddCourse(CourseForm::from_data(data)))
        } else if data.contains("delete_course") {
            Some(Self::DeleteCourse(data.get("course_id").map(str::to_string)))
        } else {
            None
        }
    }
}

// Student

#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone)]
pub struct StudentRegistration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl StudentForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            username: data.value("username").trim().to_string(),
            email: data.value("email").trim().to_string(),
            first_name: data.value("first_name").trim().to_string(),
            last_name: data.value("last_name").trim().to_string(),
            password1: data.value("password1"),
            password2: data.value("password2"),
        }
    }

    /// Checks that need no database.
    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        errors.require("username", &self.username, NAME_MAX_LEN);
        if !self
            .username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            errors.add(
                "username",
                "Enter a valid username. \
                 This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        if !self.email.is_empty() {
            errors.limit("email", &self.email, EMAIL_MAX_LEN);
            let valid = self
                .email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                errors.add("email", "Enter a valid email address.");
            }
        }

        errors.limit("first_name", &self.first_name, NAME_MAX_LEN);
        errors.limit("last_name", &self.last_name, NAME_MAX_LEN);

        if self.password1.is_empty() {
            errors.add("password1", "This field is required.");
        } else if self.password1.chars().count() < PASSWORD_MIN_LEN {
            errors.add(
                "password1",
                format!(
                    "This password is too short. \
                     It must contain at least {PASSWORD_MIN_LEN} characters."
                ),
            );
        }
        if self.password2.is_empty() {
            errors.add("password2", "This field is required.");
        } else if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }

        errors
    }
}

#[async_trait]
impl Validate for StudentForm {
    type Output = StudentRegistration;

    async fn validate(
        &self,
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Result<Self::Output, FormErrors>> {
        let mut errors = self.check();

        if !errors.has("username")
            && UserEntity::find_by_username(mm, actor, &self.username)
                .await?
                .is_some()
        {
            errors.add("username", "A user with that username already exists.");
        }

        Ok(errors.into_result(|| StudentRegistration {
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            password: self.password1.clone(),
        }))
    }
}

// Lesson

#[derive(Debug, Clone, Default)]
pub struct LessonForm {
    pub title: String,
    pub content: String,
    pub attachment: Option<UploadedFile>,
    /// The upload did not fit under the request size limit.
    pub attachment_too_large: bool,
}

#[derive(Debug, Clone)]
pub struct LessonDraft {
    pub title: String,
    pub content: String,
    pub attachment: Option<UploadedFile>,
}

impl LessonForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            title: data.value("title").trim().to_string(),
            content: data.value("content"),
            attachment: data.file("attachment").cloned(),
            attachment_too_large: data.is_truncated(),
        }
    }

    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, TITLE_MAX_LEN);
        if self.content.trim().is_empty() {
            errors.add("content", "This field is required.");
        }
        if self.attachment_too_large {
            errors.add(
                "attachment",
                "The submitted file exceeds the upload size limit.",
            );
        } else if let Some(file) = &self.attachment {
            if file.bytes.is_empty() {
                errors.add("attachment", "The submitted file is empty.");
            }
        }
        errors
    }
}

#[async_trait]
impl Validate for LessonForm {
    type Output = LessonDraft;

    async fn validate(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Result<Self::Output, FormErrors>> {
        Ok(self.check().into_result(|| LessonDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            attachment: self.attachment.clone(),
        }))
    }
}

// Module

#[derive(Debug, Clone, Default)]
pub struct ModuleForm {
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub order_index: String,
}

impl ModuleForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            title: data.value("title").trim().to_string(),
            description: data.value("description"),
            course_id: data.value("course_id"),
            order_index: data.value("order_index").trim().to_string(),
        }
    }

    fn check(&self, errors: &mut FormErrors) -> (Option<Uuid>, Option<i32>) {
        errors.require("title", &self.title, TITLE_MAX_LEN);
        let course_id = errors.require_uuid("course_id", &self.course_id);

        let order_index = if self.order_index.is_empty() {
            None
        } else {
            match self.order_index.parse::<i32>() {
                Ok(v) if v >= 0 => Some(v),
                _ => {
                    errors.add("order_index", "Enter a whole number of 0 or more.");
                    None
                }
            }
        };

        (course_id, order_index)
    }
}

#[async_trait]
impl Validate for ModuleForm {
    type Output = ModuleCreate;

    async fn validate(
        &self,
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Result<Self::Output, FormErrors>> {
        let mut errors = FormErrors::default();
        let (course_id, order_index) = self.check(&mut errors);

        if let Some(id) = course_id {
            if Course::find_by_id(mm, actor, id).await?.is_none() {
                errors.add(
                    "course_id",
                    "Select a valid choice. That course does not exist.",
                );
            }
        }

        Ok(errors.into_result(|| ModuleCreate {
            course_id: course_id.unwrap_or_default(),
            title: self.title.clone(),
            description: self.description.clone(),
            order_index,
        }))
    }
}

// Course

#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
}

impl CourseForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            title: data.value("title").trim().to_string(),
            description: data.value("description"),
        }
    }
}

#[async_trait]
impl Validate for CourseForm {
    type Output = CourseCreate;

    async fn validate(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Result<Self::Output, FormErrors>> {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, TITLE_MAX_LEN);

        Ok(errors.into_result(|| CourseCreate {
            title: self.title.clone(),
            description: self.description.clone(),
        }))
    }
}
