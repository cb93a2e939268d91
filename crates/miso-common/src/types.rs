//! Wire types of the blog's JSON endpoints.

use serde::{Deserialize, Serialize};

/// `GET /check_auth`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

/// `POST /article/{id}/like`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    pub likes: i64,
    pub liked: bool,
}

impl LikeState {
    /// Like button label.
    pub fn label(&self) -> &'static str {
        if self.liked { "Liked" } else { "Like" }
    }
}

/// `POST /discussion/{id}/reply`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_label() {
        assert_eq!(LikeState { likes: 3, liked: true }.label(), "Liked");
        assert_eq!(LikeState { likes: 0, liked: false }.label(), "Like");
    }

    #[test]
    fn test_reply_without_message() {
        let resp: ReplyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(
            resp,
            ReplyResponse {
                success: true,
                message: None
            }
        );
    }
}
