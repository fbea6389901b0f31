use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an account was created and signs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Credentials,
    Google,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Credentials => "credentials",
            Provider::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credentials" => Ok(Provider::Credentials),
            "google" => Ok(Provider::Google),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// A persisted account. `password_hash` is absent for OAuth accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub provider: Provider,
    pub image: Option<String>,
    pub request_count: u32,
    /// RFC 3339 timestamp of the last counted analysis.
    pub last_request: String,
    pub is_premium: bool,
    pub created_at: String,
}

/// What the session endpoint tells the browser about the signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub request_count: u32,
    pub is_premium: bool,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            request_count: user.request_count,
            is_premium: user.is_premium,
        }
    }
}
