//! # ページネーション
//!
//! ページ番号ベースのページネーションのリクエスト・レスポンス型を提供する。

use serde::{Deserialize, Serialize};
use validator::Validate;

/// ページネーションのメタデータ（レスポンス側）
///
/// `current_page` / `per_page` は正の整数、`total_pages` / `total_count`
/// は非負整数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Pagination {
    #[validate(range(min = 1))]
    pub current_page: u32,
    #[validate(range(min = 1))]
    pub per_page:     u32,
    pub total_pages:  u64,
    pub total_count:  u64,
}

impl Pagination {
    /// 総件数から総ページ数を計算して作成する
    ///
    /// `total_pages` は `total_count / per_page` の切り上げ。
    pub fn new(current_page: u32, per_page: u32, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(u64::from(per_page.max(1)));
        Self {
            current_page,
            per_page,
            total_pages,
            total_count,
        }
    }
}

/// ページネーション付きの成功レスポンスデータ
///
/// `SuccessResponse<PaginatedData<T>>` として使用し、
/// `{ "success": true, "data": { "items": [...], "pagination": { ... } } }`
/// 形式になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginatedData<T> {
    pub items:      Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedData<T> {
    /// 新しいページネーション付きデータを作成する
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }
}

/// ページネーションのリクエストパラメータ
///
/// クエリ文字列から取り込む値。範囲外の値はバリデーションエラーであり、
/// 丸め（クランプ）は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginationParams {
    /// ページ番号（1 始まり、デフォルト 1）
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page は 1 以上である必要があります"))]
    pub page:     i64,
    /// 1 ページあたりの件数（1〜100、デフォルト 20）
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100, message = "per_page は 1 以上 100 以下である必要があります"))]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page:     default_page(),
            per_page: default_per_page(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // ===== Pagination::new テスト =====

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    #[case(41, 20, 3)]
    fn test_総ページ数は切り上げで計算される(
        #[case] total_count: u64,
        #[case] per_page: u32,
        #[case] expected_pages: u64,
    ) {
        let pagination = Pagination::new(1, per_page, total_count);

        assert_eq!(pagination.total_pages, expected_pages);
        assert_eq!(pagination.total_count, total_count);
    }

    #[test]
    fn test_paginationのserializeで正しいjson形状にする() {
        let pagination = Pagination::new(2, 20, 41);
        let json = serde_json::to_value(&pagination).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "current_page": 2,
                "per_page": 20,
                "total_pages": 3,
                "total_count": 41
            })
        );
    }

    #[test]
    fn test_paginated_dataのserializeでitemsとpaginationを含む() {
        let data = PaginatedData::new(vec!["a", "b"], Pagination::new(1, 20, 2));
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["items"], serde_json::json!(["a", "b"]));
        assert_eq!(json["pagination"]["total_pages"], 1);
    }

    // ===== PaginationParams テスト =====

    #[test]
    fn test_空のjsonからデフォルト値が入る() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();

        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 20);
    }

    #[test]
    fn test_デフォルト値はバリデーションを通過する() {
        let params = PaginationParams::default();

        assert!(params.validate().is_ok());
    }

    #[rstest]
    #[case(0, 20)]
    #[case(-1, 20)]
    #[case(1, 0)]
    #[case(1, 101)]
    fn test_範囲外の値はバリデーションエラーになる(#[case] page: i64, #[case] per_page: i64) {
        let params = PaginationParams { page, per_page };

        assert!(params.validate().is_err());
    }

    #[rstest]
    #[case(1, 1)]
    #[case(1, 100)]
    #[case(9999, 50)]
    fn test_範囲内の値はバリデーションを通過する(#[case] page: i64, #[case] per_page: i64) {
        let params = PaginationParams { page, per_page };

        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_範囲外の値は丸められずそのまま保持される() {
        let json = r#"{"page": -1, "per_page": 500}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();

        // デシリアライズでは丸めない（バリデーションで落とす）
        assert_eq!(params.page, -1);
        assert_eq!(params.per_page, 500);
        assert!(params.validate().is_err());
    }
}
