//! # ヘルスチェック共通型
//!
//! 監視系が叩く稼働確認エンドポイントのレスポンス型。アプリ自身の起動状態
//! だけを表し、依存サービスの死活確認は含まない。

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// 稼働状態とアプリケーションバージョンを返す。バージョンは呼び出し側が
/// 自分のクレートの `env!("CARGO_PKG_VERSION")` を渡す。
///
/// ## 使用例
///
/// ```
/// use nippo_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` 固定）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}

impl HealthResponse {
    /// 稼働中ステータスのレスポンスを作成する
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_healthyコンストラクタはステータスを固定する() {
        let response = HealthResponse::healthy("1.2.3");

        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, "1.2.3");
    }

    #[test]
    fn test_serializeはstatusとversionの2フィールドになる() {
        let json = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "status": "healthy", "version": "0.1.0" })
        );
    }
}
