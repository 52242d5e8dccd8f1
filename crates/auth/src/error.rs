//! # 認証エラー
//!
//! トークン検証・認証処理で発生するエラー型を定義する。
//!
//! HTTP レスポンス（401）への変換は api 側の責務であり、
//! このモジュールはコードとメッセージのみを持つ。

use nippo_shared::ErrorCode;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// 認証エラーコード（閉集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthErrorCode {
    /// トークンの有効期限切れ
    TokenExpired,
    /// トークンの署名または構造が不正
    InvalidToken,
    /// メールアドレスまたはパスワードが不一致
    InvalidCredentials,
    /// 認証情報が提示されていない
    Unauthorized,
}

impl AuthErrorCode {
    /// ワイヤ形式（SCREAMING_SNAKE_CASE）の文字列を返す
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl From<AuthErrorCode> for ErrorCode {
    fn from(code: AuthErrorCode) -> Self {
        match code {
            AuthErrorCode::TokenExpired => ErrorCode::TokenExpired,
            AuthErrorCode::InvalidToken => ErrorCode::InvalidToken,
            AuthErrorCode::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthErrorCode::Unauthorized => ErrorCode::Unauthorized,
        }
    }
}

/// 認証エラー
///
/// 閉じたコードと人間可読なメッセージを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub code:    AuthErrorCode,
    pub message: String,
}

impl AuthError {
    /// コードとメッセージを指定して作成する
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// トークンの有効期限切れ
    pub fn token_expired() -> Self {
        Self::new(AuthErrorCode::TokenExpired, "トークンの有効期限が切れています")
    }

    /// 不正なトークン
    pub fn invalid_token() -> Self {
        Self::new(AuthErrorCode::InvalidToken, "無効なトークンです")
    }

    /// 認証情報の不一致
    pub fn invalid_credentials() -> Self {
        Self::new(
            AuthErrorCode::InvalidCredentials,
            "メールアドレスまたはパスワードが正しくありません",
        )
    }

    /// 未認証
    pub fn unauthorized() -> Self {
        Self::new(AuthErrorCode::Unauthorized, "認証が必要です")
    }
}
