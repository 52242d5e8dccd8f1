//! # Nippo 共有ユーティリティ
//!
//! このクレートは、日報アプリケーションの API
//! 全体で使用される共通のレスポンス契約を提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（auth, api）から依存される
//! - ビジネスロジックを含まない純粋な型定義のみを配置
//! - axum への依存を持たない（HTTP ステータスへの変換は各アプリの責務）

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;
pub mod pagination;

pub use api_response::{ApiResponse, SuccessResponse};
pub use error_response::{ErrorBody, ErrorCode, ErrorResponse, ValidationErrorDetail};
pub use health::HealthResponse;
pub use pagination::{PaginatedData, Pagination, PaginationParams};
