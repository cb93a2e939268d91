//! HTTP client for the blog's JSON endpoints: auth check, like toggle and
//! discussion replies.
//!
//! Requests go through a [`BlogTransport`] so the flows can run on reqwest
//! (native and wasm) or against a fake in tests. Every call is a single
//! attempt with no retry.

use std::future::Future;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::MisoError;
use crate::types::{AuthStatus, LikeState, ReplyResponse};

pub const LIKE_ERROR_ALERT: &str = "Error processing like. Please try again.";
pub const REPLY_ERROR_ALERT: &str = "An error occurred while posting your reply";
pub const REPLY_REJECTED_DEFAULT: &str = "Error posting reply";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, MisoError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends one request and hands back the status and body.
pub trait BlogTransport {
    fn send(&self, request: ApiRequest)
    -> impl Future<Output = Result<ApiResponse, MisoError>>;
}

/// reqwest-backed transport. In the browser this goes through `fetch`.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl BlogTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, MisoError> {
        let mut builder = self.client.request(request.method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let RequestBody::Form(fields) = &request.body {
            builder = builder.form(fields);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

pub struct BlogClient<T = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
}

impl BlogClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: BlogTransport> BlogClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, method: Method, url: String) -> ApiRequest {
        let request = ApiRequest::new(method, url);
        match self.config.cookie_header() {
            Some(cookie) => request.header("Cookie", cookie),
            None => request,
        }
    }

    async fn send_logged(&self, request: ApiRequest) -> Result<ApiResponse, MisoError> {
        let url = request.url.clone();
        self.transport
            .send(request)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %url, "request failed"))
    }

    pub async fn check_auth(&self) -> Result<AuthStatus, MisoError> {
        let url = self.config.check_auth_url();
        let response = self.send_logged(self.request(Method::GET, url.clone())).await?;
        if !response.is_success() {
            return Err(status_error(&response, url));
        }
        response.json()
    }

    /// Toggle the current user's like on an article.
    ///
    /// Fails with [`MisoError::AuthRequired`] without posting anything when
    /// the auth check reports no session.
    pub async fn toggle_like(
        &self,
        article_id: u64,
        csrf_token: &str,
    ) -> Result<LikeState, MisoError> {
        if !self.check_auth().await?.authenticated {
            tracing::debug!(article_id, "like needs login");
            return Err(MisoError::AuthRequired);
        }

        let url = self.config.like_url(article_id);
        let request = self
            .request(Method::POST, url.clone())
            .header("Content-Type", "application/json")
            .header("X-CSRFToken", csrf_token);
        let response = self.send_logged(request).await?;
        if !response.is_success() {
            return Err(status_error(&response, url));
        }

        let state: LikeState = response.json()?;
        tracing::debug!(article_id, likes = state.likes, liked = state.liked, "like toggled");
        Ok(state)
    }

    /// Post a reply to a discussion.
    ///
    /// The server answers with JSON whatever the status, so the body decides:
    /// `success: false` becomes [`MisoError::Rejected`] with the server's
    /// message.
    pub async fn post_reply(
        &self,
        discussion_id: u64,
        fields: Vec<(String, String)>,
    ) -> Result<ReplyResponse, MisoError> {
        let request = self
            .request(Method::POST, self.config.reply_url(discussion_id))
            .header("Accept", "application/json")
            .form(fields);
        let response = self.send_logged(request).await?;

        let reply: ReplyResponse = response
            .json()
            .inspect_err(|e| tracing::error!(error = %e, status = response.status, "bad reply response"))?;
        if reply.success {
            tracing::debug!(discussion_id, "reply posted");
            Ok(reply)
        } else {
            let message = reply
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| REPLY_REJECTED_DEFAULT.to_string());
            tracing::warn!(discussion_id, %message, "reply rejected");
            Err(MisoError::Rejected(message))
        }
    }
}

fn status_error(response: &ApiResponse, url: String) -> MisoError {
    tracing::error!(status = response.status, %url, "unexpected response status");
    MisoError::Status {
        status: response.status,
        url,
    }
}

/// Alert text after a failed like, or `None` when the user should be sent
/// to the login page instead.
pub fn like_alert(err: &MisoError) -> Option<&'static str> {
    match err {
        MisoError::AuthRequired => None,
        _ => Some(LIKE_ERROR_ALERT),
    }
}

/// Alert text after a failed reply.
pub fn reply_alert(err: &MisoError) -> String {
    match err {
        MisoError::Rejected(message) => message.clone(),
        _ => REPLY_ERROR_ALERT.to_string(),
    }
}
