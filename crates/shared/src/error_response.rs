//! # エラーレスポンスエンベロープ
//!
//! 全 API ルートで共通のエラーレスポンス形式
//! `{ "success": false, "error": { code, message, details? } }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換と HTTP ステータスの決定は各アプリの責務
//!   （shared に axum 依存を入れない）
//! - `code` は閉じた列挙型。未知のコードはデシリアライズで拒否される
//! - `details` は空のとき `None` に正規化され、JSON にフィールド自体が現れない

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// API エラーコード
///
/// すべてのエラーレスポンスはこの閉集合のコードをちょうど 1 つ持つ。
/// ワイヤ形式は SCREAMING_SNAKE_CASE（例: `TOKEN_EXPIRED`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ErrorCode {
    /// メールアドレスまたはパスワードが不一致
    InvalidCredentials,
    /// トークンの有効期限切れ
    TokenExpired,
    /// トークンの署名または構造が不正
    InvalidToken,
    /// 認証情報が提示されていない
    Unauthorized,
    /// 認証済みだが操作が許可されていない
    Forbidden,
    /// リソースが存在しない
    NotFound,
    /// リクエスト入力の構造検証に失敗
    ValidationError,
    /// 同一日付の日報が既に存在する
    DuplicateReport,
    /// メールアドレスが既に使用されている
    DuplicateEmail,
    /// 予期しないサーバー内部エラー
    InternalError,
}

impl ErrorCode {
    /// ワイヤ形式（SCREAMING_SNAKE_CASE）の文字列を返す
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// バリデーションエラーの詳細（フィールド単位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidationErrorDetail {
    pub field:   String,
    pub message: String,
}

impl ValidationErrorDetail {
    /// 新しい詳細エントリを作成する
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field:   field.into(),
            message: message.into(),
        }
    }
}

/// エラーレスポンスの本体（`error` フィールドの中身）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub code:    ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

/// エラーレスポンスエンベロープ
///
/// `success` は常に `false` であり、`true` を含む JSON はデシリアライズで
/// 拒否される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    #[serde(deserialize_with = "deserialize_must_be_false")]
    pub success: bool,
    pub error:   ErrorBody,
}

impl ErrorResponse {
    /// details なしのエラーレスポンスを作成する
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error:   ErrorBody {
                code,
                message: message.into(),
                details: None,
            },
        }
    }

    /// details 付きのエラーレスポンスを作成する
    ///
    /// 空の `details` は `None` に正規化される（空配列は出力しない）。
    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: Vec<ValidationErrorDetail>,
    ) -> Self {
        Self {
            success: false,
            error:   ErrorBody {
                code,
                message: message.into(),
                details: if details.is_empty() {
                    None
                } else {
                    Some(details)
                },
            },
        }
    }
}

fn deserialize_must_be_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    if bool::deserialize(deserializer)? {
        return Err(serde::de::Error::custom(
            "success は false である必要があります",
        ));
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_detailsなしのserializeでdetailsフィールドが現れない() {
        let response = ErrorResponse::new(ErrorCode::NotFound, "日報が見つかりません");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": {
                    "code": "NOT_FOUND",
                    "message": "日報が見つかりません"
                }
            })
        );
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn test_details付きのserializeで内容がそのまま出力される() {
        let details = vec![
            ValidationErrorDetail::new("name", "名前は必須です"),
            ValidationErrorDetail::new("email", "正しいメールアドレスを入力してください"),
        ];
        let response =
            ErrorResponse::with_details(ErrorCode::ValidationError, "入力内容に誤りがあります", details);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json["error"]["details"],
            serde_json::json!([
                { "field": "name", "message": "名前は必須です" },
                { "field": "email", "message": "正しいメールアドレスを入力してください" }
            ])
        );
    }

    #[test]
    fn test_空のdetailsはnoneに正規化される() {
        let response =
            ErrorResponse::with_details(ErrorCode::ValidationError, "入力内容に誤りがあります", vec![]);

        assert_eq!(response.error.details, None);
    }

    #[test]
    fn test_successがtrueのエラーエンベロープを拒否する() {
        let json = r#"{"success": true, "error": {"code": "NOT_FOUND", "message": "x"}}"#;
        let result = serde_json::from_str::<ErrorResponse>(json);

        assert!(result.is_err());
    }

    #[test]
    fn test_未知のエラーコードを拒否する() {
        let json = r#"{"success": false, "error": {"code": "SOMETHING_ELSE", "message": "x"}}"#;
        let result = serde_json::from_str::<ErrorResponse>(json);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserializeでdetailsが省略されたjsonを受け付ける() {
        let json = r#"{"success": false, "error": {"code": "FORBIDDEN", "message": "この操作を実行する権限がありません"}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.error.code, ErrorCode::Forbidden);
        assert_eq!(response.error.details, None);
    }

    #[rstest]
    #[case(ErrorCode::InvalidCredentials, "INVALID_CREDENTIALS")]
    #[case(ErrorCode::TokenExpired, "TOKEN_EXPIRED")]
    #[case(ErrorCode::InvalidToken, "INVALID_TOKEN")]
    #[case(ErrorCode::Unauthorized, "UNAUTHORIZED")]
    #[case(ErrorCode::Forbidden, "FORBIDDEN")]
    #[case(ErrorCode::NotFound, "NOT_FOUND")]
    #[case(ErrorCode::ValidationError, "VALIDATION_ERROR")]
    #[case(ErrorCode::DuplicateReport, "DUPLICATE_REPORT")]
    #[case(ErrorCode::DuplicateEmail, "DUPLICATE_EMAIL")]
    #[case(ErrorCode::InternalError, "INTERNAL_ERROR")]
    fn test_エラーコードのワイヤ形式(#[case] code: ErrorCode, #[case] expected: &str) {
        assert_eq!(code.as_str(), expected);
        assert_eq!(serde_json::to_value(code).unwrap(), expected);
    }

    #[test]
    fn test_エラーコードのdisplayがワイヤ形式と一致する() {
        assert_eq!(ErrorCode::TokenExpired.to_string(), "TOKEN_EXPIRED");
    }
}

#[cfg(all(test, feature = "openapi"))]
mod openapi_tests {
    use utoipa::PartialSchema;

    use super::*;

    #[test]
    fn test_error_responseにtoschemaが実装されている() {
        let schema = ErrorResponse::schema();
        let utoipa::openapi::RefOr::T(schema) = schema else {
            panic!("expected inline schema, got ref");
        };
        let utoipa::openapi::Schema::Object(obj) = schema else {
            panic!("expected object schema");
        };
        // success と error フィールドがスキーマに含まれていること
        assert!(obj.properties.contains_key("success"));
        assert!(obj.properties.contains_key("error"));
    }
}
