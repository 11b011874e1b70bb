use crate::client::{encode, paths, ApiClient, ClientError};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

pub const ROLE_OPTIONS: [&str; 5] = ["SuperAdmin", "Admin", "Manager", "Agent", "User"];
pub const DEFAULT_ROLE: &str = "User";
pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FullName,
    Email,
    Password,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserFormError {
    #[error("Full name is required")]
    FullNameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Invalid role selected")]
    InvalidRole,
}

/// Body of `POST /users/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Default for CreateUserForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl CreateUserForm {
    /// Stores an edited value. Everything but the full name is trimmed as typed.
    pub fn set(&mut self, field: UserField, value: &str) {
        match field {
            UserField::FullName => self.full_name = value.to_string(),
            UserField::Email => self.email = value.trim().to_string(),
            UserField::Password => self.password = value.trim().to_string(),
            UserField::Role => self.role = value.trim().to_string(),
        }
    }

    /// First failing check, in form order.
    pub fn validate(&self) -> Result<(), UserFormError> {
        if self.full_name.trim().is_empty() {
            return Err(UserFormError::FullNameRequired);
        }
        if self.email.trim().is_empty() {
            return Err(UserFormError::EmailRequired);
        }
        if !email_pattern().is_some_and(|re| re.is_match(&self.email)) {
            return Err(UserFormError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserFormError::PasswordTooShort);
        }
        if !ROLE_OPTIONS.contains(&self.role.as_str()) {
            return Err(UserFormError::InvalidRole);
        }
        Ok(())
    }
}

/// Email the API reports for the created user, falling back to the submitted one.
pub fn created_email(reply: &Value, form: &CreateUserForm) -> String {
    reply
        .get("email")
        .or_else(|| reply.get("data").and_then(|data| data.get("email")))
        .and_then(Value::as_str)
        .unwrap_or(&form.email)
        .to_string()
}

pub async fn create_user<C: ApiClient + ?Sized>(
    client: &C,
    form: &CreateUserForm,
) -> Result<Value, ClientError> {
    client.post_json(paths::CREATE_USER, encode(form)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeClient, Sent};
    use serde_json::json;

    fn valid() -> CreateUserForm {
        CreateUserForm {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            password: "secret1".into(),
            role: "Agent".into(),
        }
    }

    #[test]
    fn set_trims_everything_but_full_name() {
        let mut form = CreateUserForm::default();
        form.set(UserField::FullName, " Asha Rao ");
        form.set(UserField::Email, " asha@example.com ");
        form.set(UserField::Password, " secret1 ");
        assert_eq!(form.full_name, " Asha Rao ");
        assert_eq!(form.email, "asha@example.com");
        assert_eq!(form.password, "secret1");
        assert_eq!(form.role, DEFAULT_ROLE);
    }

    #[test]
    fn validation_reports_first_failure() {
        assert_eq!(valid().validate(), Ok(()));

        let blank = CreateUserForm::default();
        assert_eq!(blank.validate(), Err(UserFormError::FullNameRequired));

        let mut form = valid();
        form.email = "asha@example".into();
        form.password = "123".into();
        assert_eq!(form.validate(), Err(UserFormError::InvalidEmail));

        let mut form = valid();
        form.password = "12345".into();
        assert_eq!(form.validate(), Err(UserFormError::PasswordTooShort));

        let mut form = valid();
        form.role = "admin".into();
        assert_eq!(form.validate(), Err(UserFormError::InvalidRole));
    }

    #[tokio::test]
    async fn create_posts_snake_case_body() {
        let client = FakeClient::default();
        client.reply(paths::CREATE_USER, Ok(json!({"id": 7})));

        let reply = create_user(&client, &valid()).await.unwrap();
        assert_eq!(created_email(&reply, &valid()), "asha@example.com");

        let sent = client.sent.borrow();
        let Sent::Json(path, body) = &sent[0] else {
            panic!("expected a json request");
        };
        assert_eq!(path, paths::CREATE_USER);
        assert_eq!(body["full_name"], "Asha Rao");
        assert_eq!(body["role"], "Agent");
    }
}
