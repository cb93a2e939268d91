//! Blog API endpoint configuration.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::MisoError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const BASE_URL_ENV: &str = "MISO_BASE_URL";
pub const SESSION_ENV: &str = "MISO_SESSION";

/// Name of the cookie carrying the server session.
pub const SESSION_COOKIE_NAME: &str = "session";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin the blog is served from, without a trailing slash.
    pub base_url: String,
    /// Session cookie value. Browsers send their own cookies, so this stays
    /// `None` there.
    pub session_cookie: Option<String>,
    pub login_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_cookie: None,
            login_path: "/login".to_string(),
        }
    }
}

impl ApiConfig {
    /// Config for a base URL, validated.
    pub fn new(base_url: &str) -> Result<Self, MisoError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Default::default()
        })
    }

    /// Read `MISO_BASE_URL` and `MISO_SESSION`, falling back to defaults.
    pub fn from_env() -> Result<Self, MisoError> {
        let mut config = match std::env::var(BASE_URL_ENV) {
            Ok(url) => Self::new(&url)?,
            Err(_) => Self::default(),
        };
        config.session_cookie = std::env::var(SESSION_ENV).ok().filter(|s| !s.is_empty());
        Ok(config)
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session_cookie = Some(session.into());
        self
    }

    pub fn check_auth_url(&self) -> String {
        format!("{}/check_auth", self.base_url)
    }

    pub fn like_url(&self, article_id: u64) -> String {
        format!("{}/article/{article_id}/like", self.base_url)
    }

    pub fn reply_url(&self, discussion_id: u64) -> String {
        format!("{}/discussion/{discussion_id}/reply", self.base_url)
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    /// `Cookie` header value, when a session is configured.
    pub fn cookie_header(&self) -> Option<String> {
        self.session_cookie
            .as_ref()
            .map(|s| format!("{SESSION_COOKIE_NAME}={s}"))
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, MisoError> {
    let trimmed = base_url.trim();
    let url = Url::parse(trimmed).map_err(|e| MisoError::Config(format!("{trimmed}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MisoError::Config(format!(
            "{trimmed}: base url must be http or https"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Discussion id from a reply form's `action` attribute: its last path
/// segment, ignoring any query or fragment. Ids are numeric.
pub fn discussion_id_from_action(action: &str) -> Option<u64> {
    let path = action.split(['?', '#']).next().unwrap_or(action);
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
