//! # バリデーション付きエクストラクタ
//!
//! リクエストボディとクエリ文字列のデシリアライズと構造検証を
//! ひとまとめにした axum エクストラクタを提供する。
//!
//! - [`ValidatedJson`]: JSON ボディをパースして `validate()` を通す
//! - [`ValidatedQuery`]: クエリ文字列をパースして `validate()` を通す
//!
//! いずれも失敗時は 400 のエラーエンベロープを拒否レスポンスとして返すため、
//! ハンドラには検証済みの値だけが渡る。

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, Uri, request::Parts},
    response::{IntoResponse, Response},
};
use nippo_shared::{ErrorCode, ValidationErrorDetail};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use url::form_urlencoded;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{ApiError, error_response};

// --- ValidatedJson ---

/// JSON ボディのデシリアライズと検証を行うエクストラクタ
///
/// Content-Type は検査せず、ボディを直接 JSON としてパースする。
///
/// - JSON として壊れている場合: 400（詳細なし）
/// - JSON としては正しいが型・構造が合わない場合: 400（`body` の詳細付き）
/// - `validate()` が失敗した場合: 400（フィールド単位の詳細付き）
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| body_parse_failed_response())?;

        let value: T = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) if e.classify() == Category::Data => {
                return Err(ApiError::validation_error(vec![ValidationErrorDetail::new(
                    "body",
                    e.to_string(),
                )])
                .into_response());
            }
            Err(_) => return Err(body_parse_failed_response()),
        };

        value
            .validate()
            .map_err(|e| ApiError::from(e).into_response())?;

        Ok(Self(value))
    }
}

// --- ValidatedQuery ---

/// クエリ文字列のデシリアライズと検証を行うエクストラクタ
///
/// 同一キーが繰り返された場合は最初の出現を採用する。
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flattened = flatten_query(parts.uri.query().unwrap_or(""));
        let uri: Uri = format!("/?{flattened}")
            .parse()
            .map_err(|_| query_parse_failed_response())?;

        let Query(value) =
            Query::<T>::try_from_uri(&uri).map_err(|_| query_parse_failed_response())?;

        value
            .validate()
            .map_err(|e| ApiError::from(e).into_response())?;

        Ok(Self(value))
    }
}

/// クエリ文字列をキーごとに最初の出現だけ残して再エンコードする
fn flatten_query(raw: &str) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        if pairs.iter().any(|(k, _)| k.as_str() == key.as_ref()) {
            continue;
        }
        pairs.push((key.into_owned(), value.into_owned()));
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish()
}

// --- バリデーションエラーの変換 ---

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_error(validation_errors_to_details(&errors))
    }
}

/// [`ValidationErrors`] をフィールド単位の詳細リストに平坦化する
///
/// ネストした構造体は `.` 区切りのパス（例: `author.name`）、リストは
/// インデックス付きのパス（例: `items.0.quantity`）になる。
/// 結果はフィールドパスで安定ソートされる。
pub fn validation_errors_to_details(errors: &ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details = Vec::new();
    collect_details(errors, "", &mut details);
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

fn collect_details(
    errors: &ValidationErrors,
    prefix: &str,
    details: &mut Vec<ValidationErrorDetail>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{path}は不正な値です"), ToString::to_string);
                    details.push(ValidationErrorDetail::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_details(nested, &path, details),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_details(nested, &format!("{path}.{index}"), details);
                }
            }
        }
    }
}

// --- 拒否レスポンス ---

fn body_parse_failed_response() -> Response {
    error_response(
        ErrorCode::ValidationError,
        "リクエストボディの解析に失敗しました",
        StatusCode::BAD_REQUEST,
        vec![],
    )
}

fn query_parse_failed_response() -> Response {
    error_response(
        ErrorCode::ValidationError,
        "クエリパラメータの解析に失敗しました",
        StatusCode::BAD_REQUEST,
        vec![],
    )
}
