//! # Nippo 認証基盤
//!
//! JWT トークンの発行・検証と、Argon2id によるパスワードハッシュを提供する。
//!
//! ## 設計方針
//!
//! - axum への依存を持たない（ミドルウェアへの組み込みは api 側の責務）
//! - トークン検証は全域関数: 認証エラー以外の失敗を返さない
//! - 署名シークレットは構築時に明示的に渡す（環境変数への暗黙アクセスをしない）

pub mod error;
pub mod password;
pub mod token;

pub use error::{AuthError, AuthErrorCode};
pub use password::{PasswordError, hash_password, verify_password};
pub use token::{AuthUser, Claims, TOKEN_EXPIRY_HOURS, TokenService};
