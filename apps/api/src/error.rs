//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! 各ハンドラは `Result<Response, ApiError>` を返し、`?` でエラーを伝播する。
//! HTTP ステータスとエラーエンベロープへの変換は [`IntoResponse`] 実装に
//! 一元化されており、ハンドラ側でレスポンス形式を組み立てることはない。
//!
//! ハンドラ内のパニックは [`handle_panic`] が 500 エンベロープに変換する
//! （[`crate::app_builder`] で `CatchPanicLayer` に登録される）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nippo_auth::AuthError;
use nippo_shared::{ErrorCode, ErrorResponse, SuccessResponse, ValidationErrorDetail};
use serde::Serialize;
use thiserror::Error;

// --- エラー型 ---

/// API ハンドラの共通エラー
///
/// バリアントが HTTP ステータスとエラーコードを決める。
/// クライアントに返すメッセージはすべてこの型の中で確定し、
/// `Internal` の内部詳細は決してレスポンスに含めない。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 認証エラー（401）。コードは [`AuthError`] のものを引き継ぐ
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 権限エラー（403）
    #[error("{0}")]
    Forbidden(String),

    /// リソース未検出（404）。値は「日報」のようなリソース表示名
    #[error("{0}が見つかりません")]
    NotFound(String),

    /// 入力検証エラー（400）。フィールド単位の詳細を持つ
    #[error("入力内容に誤りがあります")]
    Validation(Vec<ValidationErrorDetail>),

    /// 同一日付の日報が既に存在する（409）
    #[error("この日付の日報は既に存在します")]
    DuplicateReport,

    /// メールアドレスが既に使用されている（409）
    #[error("このメールアドレスは既に使用されています")]
    DuplicateEmail,

    /// 予期しない内部エラー（500）
    #[error("サーバーエラーが発生しました")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// メールアドレスまたはパスワードの不一致
    pub fn invalid_credentials() -> Self {
        Self::Auth(AuthError::invalid_credentials())
    }

    /// トークンの有効期限切れ
    pub fn token_expired() -> Self {
        Self::Auth(AuthError::token_expired())
    }

    /// 未認証
    pub fn unauthorized() -> Self {
        Self::Auth(AuthError::unauthorized())
    }

    /// 権限なし（既定メッセージ）
    pub fn forbidden() -> Self {
        Self::Forbidden("この操作を実行する権限がありません".to_string())
    }

    /// 権限なし（メッセージ指定）
    pub fn forbidden_with_message(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// リソース未検出。`resource` は「日報」のような表示名
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// 入力検証エラー
    pub fn validation_error(details: Vec<ValidationErrorDetail>) -> Self {
        Self::Validation(details)
    }

    /// 同一日付の日報の重複
    pub fn duplicate_report() -> Self {
        Self::DuplicateReport
    }

    /// メールアドレスの重複
    pub fn duplicate_email() -> Self {
        Self::DuplicateEmail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(e) => {
                tracing::warn!(code = e.code.as_str(), "認証エラー: {}", e.message);
                error_response(e.code.into(), e.message, StatusCode::UNAUTHORIZED, vec![])
            }
            ApiError::Forbidden(message) => {
                error_response(ErrorCode::Forbidden, message, StatusCode::FORBIDDEN, vec![])
            }
            ApiError::NotFound(resource) => error_response(
                ErrorCode::NotFound,
                format!("{resource}が見つかりません"),
                StatusCode::NOT_FOUND,
                vec![],
            ),
            ApiError::Validation(details) => error_response(
                ErrorCode::ValidationError,
                "入力内容に誤りがあります",
                StatusCode::BAD_REQUEST,
                details,
            ),
            ApiError::DuplicateReport => error_response(
                ErrorCode::DuplicateReport,
                "この日付の日報は既に存在します",
                StatusCode::CONFLICT,
                vec![],
            ),
            ApiError::DuplicateEmail => error_response(
                ErrorCode::DuplicateEmail,
                "このメールアドレスは既に使用されています",
                StatusCode::CONFLICT,
                vec![],
            ),
            ApiError::Internal(e) => {
                tracing::error!(error.category = "unexpected", "内部エラー: {:#}", e);
                internal_error_response()
            }
        }
    }
}

// --- レスポンスヘルパー ---

/// 成功レスポンス（200 OK）を構築する
pub fn success_response<T: Serialize>(data: T) -> Response {
    success_response_with_status(StatusCode::OK, data)
}

/// 任意のステータスで成功レスポンスを構築する
pub fn success_response_with_status<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(SuccessResponse::new(data))).into_response()
}

/// エラーレスポンスを構築する
///
/// `details` が空の場合、JSON に `details` フィールド自体が現れない。
pub fn error_response(
    code: ErrorCode,
    message: impl Into<String>,
    status: StatusCode,
    details: Vec<ValidationErrorDetail>,
) -> Response {
    (
        status,
        Json(ErrorResponse::with_details(code, message, details)),
    )
        .into_response()
}

/// 内部エラーレスポンス（500）
pub fn internal_error_response() -> Response {
    error_response(
        ErrorCode::InternalError,
        "サーバーエラーが発生しました",
        StatusCode::INTERNAL_SERVER_ERROR,
        vec![],
    )
}

/// パニックを 500 エラーレスポンスに変換する
///
/// `CatchPanicLayer::custom` に登録し、ハンドラ内のパニックが接続切断では
/// なくエラーエンベロープとしてクライアントに返るようにする。
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "不明なパニック"
    };
    tracing::error!(error.category = "panic", "ハンドラがパニックしました: {}", detail);
    internal_error_response()
}
