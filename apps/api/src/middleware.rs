//! # ミドルウェア
//!
//! API 用のミドルウェアを提供する。

mod auth;

pub use auth::{AuthState, extract_bearer_token, get_auth_user, require_auth};
