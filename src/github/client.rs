use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, LINK};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{ApiErrorBody, Authorization, NewAuthorization, NewRepository, Repository};
use crate::config::GithubSettings;
use crate::error::{Result, SetupError};
use crate::logging::redact;
use crate::token::Token;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const REPOS_PER_PAGE: &str = "100";

/// Username and password for the legacy authorizations endpoints.
#[derive(Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The GitHub REST operations this tool needs.
pub trait GithubApi {
    fn create_authorization(
        &self,
        creds: &BasicCredentials,
        request: &NewAuthorization,
    ) -> Result<Authorization>;

    fn list_authorizations(&self, creds: &BasicCredentials) -> Result<Vec<Authorization>>;

    fn delete_authorization(&self, creds: &BasicCredentials, id: u64) -> Result<()>;

    /// All repositories of the authenticated user, following pagination.
    fn list_repositories(&self, token: &Token) -> Result<Vec<Repository>>;

    fn create_repository(&self, token: &Token, request: &NewRepository) -> Result<Repository>;

    /// Plain GET of an arbitrary URL, used for license texts.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

pub struct GithubClient {
    http: Client,
    api_url: Url,
}

impl GithubClient {
    pub fn new(settings: &GithubSettings) -> Result<Self> {
        // Already installed on a second call, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            api_url: base_url(&settings.api_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SetupError::Config(format!("Invalid API path '{}': {}", path, e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::info!(method = %method, url = %url, "GitHub API request");
        self.http
            .request(method, url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = check_status(builder.send()?)?;
        Ok(response.json::<T>()?)
    }
}

impl GithubApi for GithubClient {
    fn create_authorization(
        &self,
        creds: &BasicCredentials,
        request: &NewAuthorization,
    ) -> Result<Authorization> {
        let url = self.endpoint("authorizations")?;
        self.send_json(
            self.request(Method::POST, url)
                .basic_auth(&creds.username, Some(&creds.password))
                .json(request),
        )
    }

    fn list_authorizations(&self, creds: &BasicCredentials) -> Result<Vec<Authorization>> {
        let url = self.endpoint("authorizations")?;
        self.send_json(
            self.request(Method::GET, url)
                .basic_auth(&creds.username, Some(&creds.password)),
        )
    }

    fn delete_authorization(&self, creds: &BasicCredentials, id: u64) -> Result<()> {
        let url = self.endpoint(&format!("authorizations/{}", id))?;
        check_status(
            self.request(Method::DELETE, url)
                .basic_auth(&creds.username, Some(&creds.password))
                .send()?,
        )?;
        Ok(())
    }

    fn list_repositories(&self, token: &Token) -> Result<Vec<Repository>> {
        let mut url = self.endpoint("user/repos")?;
        url.query_pairs_mut().append_pair("per_page", REPOS_PER_PAGE);

        let mut repos = Vec::new();
        loop {
            let response = check_status(
                self.request(Method::GET, url)
                    .bearer_auth(token.expose())
                    .send()?,
            )?;
            let next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_link);
            let page: Vec<Repository> = response.json()?;
            if page.is_empty() {
                break;
            }
            repos.extend(page);
            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        tracing::debug!(count = repos.len(), "Fetched repositories");
        Ok(repos)
    }

    fn create_repository(&self, token: &Token, request: &NewRepository) -> Result<Repository> {
        let url = self.endpoint("user/repos")?;
        self.send_json(
            self.request(Method::POST, url)
                .bearer_auth(token.expose())
                .json(request),
        )
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)
            .map_err(|e| SetupError::Config(format!("Invalid URL '{}': {}", url, e)))?;
        tracing::info!(url = %url, "Downloading");
        let response = check_status(self.http.get(url).send()?)?;
        Ok(response.text()?)
    }
}

/// Turns non-2xx responses into [`SetupError::Api`], using GitHub's error
/// document when the body is one.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(err) => err.describe(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };
    tracing::warn!(status = status.as_u16(), message = %redact(&message), "GitHub API error");
    Err(SetupError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Parses a base URL, making sure relative joins append to its path.
fn base_url(raw: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&with_slash)
        .map_err(|e| SetupError::Config(format!("Invalid GitHub API URL '{}': {}", raw, e)))
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header.
pub fn next_link(header: &str) -> Option<Url> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';').map(str::trim);
        let target = parts.next()?.strip_prefix('<')?.strip_suffix('>')?;
        let is_next = parts.any(|param| {
            param
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
                .unwrap_or(false)
        });
        if is_next { Url::parse(target).ok() } else { None }
    })
}
