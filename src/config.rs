use crate::error::{Result, SetupError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file name inside the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub github: GithubSettings,

    #[serde(default)]
    pub repo: RepoSettings,

    #[serde(default)]
    pub git: GitSettings,

    #[serde(default)]
    pub secrets: SecretSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_web_url")]
    pub web_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("ghsetup/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSettings {
    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_private")]
    pub private: bool,

    #[serde(default = "default_license_url")]
    pub license_url: String,

    #[serde(default = "default_license_file")]
    pub license_file: String,

    #[serde(default = "default_branch")]
    pub default_branch: String,
}

fn default_description() -> String {
    "Created with ghsetup".to_string()
}

fn default_private() -> bool {
    true
}

fn default_license_url() -> String {
    "https://www.gnu.org/licenses/gpl-3.0.txt".to_string()
}

fn default_license_file() -> String {
    "LICENSE".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for RepoSettings {
    fn default() -> Self {
        Self {
            description: default_description(),
            private: default_private(),
            license_url: default_license_url(),
            license_file: default_license_file(),
            default_branch: default_branch(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSettings {
    /// Overrides the platform default credential helper.
    #[serde(default)]
    pub credential_helper: Option<String>,
}

impl GitSettings {
    pub fn credential_helper(&self) -> String {
        self.credential_helper
            .clone()
            .unwrap_or_else(|| platform_credential_helper().to_string())
    }
}

/// Git Credential Manager on Windows, the in-memory cache elsewhere.
pub fn platform_credential_helper() -> &'static str {
    if cfg!(windows) {
        "manager"
    } else {
        "cache --timeout=3600"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretSettings {
    /// Bitwarden secret holding the GitHub PAT. `GH_TOKEN_ID` takes precedence.
    #[serde(default)]
    pub bws_secret_id: Option<String>,
}

impl SetupConfig {
    /// Loads settings from `explicit` if given, otherwise from the default
    /// location. A missing default file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(SetupError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)?;
        let config: SetupConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ghsetup").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}
