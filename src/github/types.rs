use serde::{Deserialize, Serialize};

/// Body of `POST /authorizations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAuthorization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub scopes: Vec<String>,
}

impl NewAuthorization {
    /// A token scoped to full control of private repositories.
    pub fn repo_scoped(note: Option<String>) -> Self {
        Self {
            note: note.filter(|n| !n.trim().is_empty()),
            scopes: vec!["repo".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthorizationApp {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Authorization {
    pub id: u64,
    /// Only present in the response that created the authorization.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub app: AuthorizationApp,
}

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRepository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub private: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub auto_init: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub private: bool,
}

/// Error document GitHub returns alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn describe(&self) -> String {
        let details: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| {
                e.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .or_else(|| e.get("code").and_then(|c| c.as_str()).map(str::to_string))
            })
            .collect();
        if details.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, details.join(", "))
        }
    }
}
