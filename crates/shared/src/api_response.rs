//! # API レスポンスエンベロープ
//!
//! 全 API ルートで共通の統一レスポンス形式を提供する。
//!
//! ```json
//! { "success": true, "data": ... }
//! ```
//!
//! エラー側のエンベロープは [`crate::error_response`] を参照。

use serde::{Deserialize, Serialize};

use crate::error_response::ErrorResponse;

/// 成功レスポンスエンベロープ
///
/// すべての API エンドポイントは成功時に `{ "success": true, "data": T }`
/// 形式でレスポンスを返す。この型は以下の場所で使用される:
/// - API ハンドラ（Serialize でレスポンスを返す）
/// - クライアント・テスト（Deserialize でレスポンスを検証する）
///
/// `success` は常に `true` であり、`false` を含む JSON はデシリアライズで
/// 拒否される。
///
/// ## 使用例
///
/// ```
/// use nippo_shared::SuccessResponse;
///
/// let response = SuccessResponse::new("hello");
/// assert_eq!(response.data, "hello");
/// assert!(response.success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SuccessResponse<T> {
    #[serde(deserialize_with = "deserialize_must_be_true")]
    pub success: bool,
    pub data:    T,
}

impl<T> SuccessResponse<T> {
    /// 新しい成功レスポンスを作成する
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// API レスポンス（成功・エラーの合併型）
///
/// クライアントやテストが 1 つの型でどちらの形もパースできるようにする。
/// シリアライズは各バリアントの形をそのまま出力する（タグは付かない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ApiResponse<T> {
    /// `{ "success": true, "data": T }`
    Success(SuccessResponse<T>),
    /// `{ "success": false, "error": { ... } }`
    Error(ErrorResponse),
}

impl<T> ApiResponse<T> {
    /// 成功レスポンスを作成する
    pub fn success(data: T) -> Self {
        Self::Success(SuccessResponse::new(data))
    }

    /// エラーレスポンスを作成する
    pub fn error(error: ErrorResponse) -> Self {
        Self::Error(error)
    }
}

fn deserialize_must_be_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    if !bool::deserialize(deserializer)? {
        return Err(serde::de::Error::custom(
            "success は true である必要があります",
        ));
    }
    Ok(true)
}


#[cfg(all(test, feature = "openapi"))]
mod openapi_tests {
    use utoipa::PartialSchema;

    use super::*;

    #[test]
    fn test_success_responseにtoschemaが実装されている() {
        let schema = SuccessResponse::<String>::schema();
        let utoipa::openapi::RefOr::T(schema) = schema else {
            panic!("expected inline schema, got ref");
        };
        let utoipa::openapi::Schema::Object(obj) = schema else {
            panic!("expected object schema");
        };
        // success と data フィールドがスキーマに含まれていること
        assert!(obj.properties.contains_key("success"));
        assert!(obj.properties.contains_key("data"));
    }
}
