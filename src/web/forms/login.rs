use super::FormData;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            username: data.value("username"),
            password: data.value("password"),
        }
    }
}
