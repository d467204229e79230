//! Submitted form bodies and their validation.
//!
//! [`FormData`] reads both `application/x-www-form-urlencoded` and `multipart/form-data`
//! bodies into the same flat field list, so handlers never care which encoding the browser
//! picked. Typed forms are built from it and checked through [`Validate`]; failures are
//! collected per field in [`FormErrors`] and shown next to the inputs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::{
    model::{DatabaseResult, ModelManager},
    web::{AuthenticatedUser, WebError},
};

mod admin;
pub use admin::{
    CourseForm, DashboardIntent, LessonDraft, LessonForm, ModuleForm, StudentForm,
    StudentRegistration,
};

mod login;
pub use login::LoginForm;

mod quiz;
pub use quiz::{QUESTION_SLOTS, QuestionDraft, QuizForm, QuizScore, grade};

pub const TITLE_MAX_LEN: usize = 200;
pub const NAME_MAX_LEN: usize = 150;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
    files: Vec<UploadedFile>,
    truncated: bool,
}

impl FormData {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self {
            fields,
            files: Vec::new(),
            truncated: false,
        }
    }

    /// The body hit the request size limit; only the parts read before it are present.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.files.push(file);
        self
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value under `name`, or an empty string when the field was not submitted.
    pub fn value(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == name)
    }
}

fn is_multipart(req: &Request) -> Option<bool> {
    let content_type = req.headers().get(CONTENT_TYPE)?.to_str().ok()?;
    Some(content_type.starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match is_multipart(&req) {
            None => Ok(Self::default()),
            Some(false) => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| WebError::malformed_body(e.body_text()))?;
                Ok(Self::new(fields))
            }
            Some(true) => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| WebError::malformed_body(e.body_text()))?;
                read_multipart(&mut multipart).await
            }
        }
    }
}

/// `Ok(None)` when the body was cut off by the request size limit.
async fn within_limit<T>(
    read: impl Future<Output = Result<T, MultipartError>>,
) -> Result<Option<T>, WebError> {
    match read.await {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => Ok(None),
        Err(e) => Err(WebError::malformed_body(e.body_text())),
    }
}

async fn read_multipart(multipart: &mut Multipart) -> Result<FormData, WebError> {
    let mut data = FormData::default();

    loop {
        let Some(next) = within_limit(multipart.next_field()).await? else {
            data.truncated = true;
            break;
        };
        let Some(field) = next else {
            break;
        };

        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let Some(bytes) = within_limit(field.bytes()).await? else {
                    data.truncated = true;
                    break;
                };

                // browsers send an empty part when no file was picked
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                data.files.push(UploadedFile {
                    field: name,
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let Some(text) = within_limit(field.text()).await? else {
                    data.truncated = true;
                    break;
                };
                data.fields.push((name, text));
            }
        }
    }

    if data.truncated {
        tracing::warn!(
            fields = data.fields.len(),
            "multipart body exceeded the request size limit"
        );
    }

    Ok(data)
}

/// Validation messages keyed by field name. `__all__` holds form-wide messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub const NON_FIELD: &'static str = "__all__";

    pub fn add<S: Into<String>>(&mut self, field: &'static str, message: S) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Checks that `value` is non-blank and at most `max_len` characters.
    pub fn require(&mut self, field: &'static str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.add(field, "This field is required.");
        } else {
            self.limit(field, value, max_len);
        }
    }

    pub fn limit(&mut self, field: &'static str, value: &str, max_len: usize) {
        let len = value.chars().count();
        if len > max_len {
            self.add(
                field,
                format!("Ensure this value has at most {max_len} characters (it has {len})."),
            );
        }
    }

    /// Parses a required uuid field (the value of a `<select>` of related rows).
    pub fn require_uuid(&mut self, field: &'static str, value: &str) -> Option<uuid::Uuid> {
        if value.trim().is_empty() {
            self.add(field, "This field is required.");
            return None;
        }
        match value.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                self.add(field, "Select a valid choice.");
                None
            }
        }
    }

    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// A form together with the errors from its last validation; empty errors for a fresh form.
#[derive(Debug, Clone, Default)]
pub struct Bound<F> {
    pub form: F,
    pub errors: FormErrors,
}

impl<F> Bound<F> {
    pub fn new(form: F, errors: FormErrors) -> Self {
        Self { form, errors }
    }
}

#[async_trait]
pub trait Validate {
    type Output;

    /// Outer `Err` is a storage failure while checking; inner `Err` is a rejected submission.
    async fn validate(
        &self,
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Result<Self::Output, FormErrors>>;
}
