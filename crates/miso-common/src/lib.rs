//! miso-common: the blog API client and shared types.
//!
//! - `BlogClient` - auth check, like toggle and reply posting
//! - `ApiConfig` - endpoint configuration
//! - `MisoError` - error type with miette diagnostics
//! - `telemetry` - console tracing for native binaries

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub mod telemetry;
pub mod types;

pub use client::{
    ApiRequest, ApiResponse, BlogClient, BlogTransport, LIKE_ERROR_ALERT, REPLY_ERROR_ALERT,
    REPLY_REJECTED_DEFAULT, ReqwestTransport, RequestBody, like_alert, reply_alert,
};
pub use config::{ApiConfig, discussion_id_from_action};
pub use error::MisoError;
pub use forms::{missing_required, missing_required_indices};
pub use types::{AuthStatus, LikeState, ReplyResponse};
