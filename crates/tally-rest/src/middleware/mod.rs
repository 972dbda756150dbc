//! HTTP middleware.

pub mod auth;
pub mod timing;

pub use auth::{require_api_key, ApiKeyState, API_KEY_HEADER};
pub use timing::{timing_middleware, RESPONSE_TIME_HEADER};
