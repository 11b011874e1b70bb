//! Login session.
//!
//! A `Session` is created from a successful login and dropped on logout. The
//! role is read from the `role` claim of the bearer token; the token itself is
//! not verified here, the API does that on every call.

use crate::client::{decode, encode, paths, ApiClient, ClientError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Rm,
    Credit,
    Operation,
    Sales,
    Accounts,
    Dealer,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Rm,
        Role::Credit,
        Role::Operation,
        Role::Sales,
        Role::Accounts,
        Role::Dealer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Rm => "RM",
            Role::Credit => "CREDIT",
            Role::Operation => "OPERATION",
            Role::Sales => "SALES",
            Role::Accounts => "ACCOUNTS",
            Role::Dealer => "DEALER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == upper)
            .ok_or_else(|| SessionError::UnknownRole(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("login failed: {0}")]
    Client(#[from] ClientError),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("token carries no role")]
    MissingRole,
    #[error("unknown role `{0}`")]
    UnknownRole(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token", alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Claims {
    role: Option<String>,
    name: Option<String>,
    username: Option<String>,
}

fn claims(token: &str) -> Result<Claims, SessionError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| SessionError::MalformedToken("expected three segments".into()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::MalformedToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::MalformedToken(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    username: String,
    role: Role,
}

impl Session {
    pub fn from_token(token: &str, username: Option<String>) -> Result<Self, SessionError> {
        let claims = claims(token)?;
        let role = claims.role.ok_or(SessionError::MissingRole)?.parse()?;
        let username = username
            .or(claims.username)
            .or(claims.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "user".to_string());
        Ok(Self {
            token: token.to_string(),
            username,
            role,
        })
    }

    pub fn from_login(response: LoginResponse) -> Result<Self, SessionError> {
        Self::from_token(&response.token, response.username)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub async fn login<C: ApiClient + ?Sized>(
    client: &C,
    request: &LoginRequest,
) -> Result<Session, SessionError> {
    let reply = client.post_json(paths::LOGIN, encode(request)?).await?;
    Session::from_login(decode(reply)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeClient;
    use serde_json::json;

    fn token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn role_claim_is_upper_cased() {
        let session = Session::from_token(&token(json!({"role": "rm", "name": "Asha"})), None).unwrap();
        assert_eq!(session.role(), Role::Rm);
        assert_eq!(session.username(), "Asha");
        assert!(session.bearer().starts_with("Bearer "));
    }

    #[test]
    fn unknown_or_missing_role_fails() {
        assert_eq!(
            Session::from_token(&token(json!({"role": "intern"})), None),
            Err(SessionError::UnknownRole("intern".into()))
        );
        assert_eq!(
            Session::from_token(&token(json!({"sub": 1})), None),
            Err(SessionError::MissingRole)
        );
        assert!(matches!(
            Session::from_token("not-a-jwt", None),
            Err(SessionError::MalformedToken(_))
        ));
    }

    #[tokio::test]
    async fn login_builds_session_from_access_token() {
        let client = FakeClient::default();
        client.reply(
            paths::LOGIN,
            Ok(json!({"access_token": token(json!({"role": "Dealer"})), "username": "rao"})),
        );
        let request = LoginRequest {
            email: "rao@example.com".into(),
            password: "secret1".into(),
        };
        let session = login(&client, &request).await.unwrap();
        assert_eq!(session.role(), Role::Dealer);
        assert_eq!(session.username(), "rao");
    }

    #[tokio::test]
    async fn rejected_login_is_a_client_error() {
        let client = FakeClient::default();
        client.reply(
            paths::LOGIN,
            Err(ClientError::Status {
                status: 401,
                message: "Invalid credentials".into(),
            }),
        );
        let request = LoginRequest {
            email: "rao@example.com".into(),
            password: "wrong".into(),
        };
        let err = login(&client, &request).await.unwrap_err();
        assert!(matches!(err, SessionError::Client(ClientError::Status { status: 401, .. })));
    }
}
