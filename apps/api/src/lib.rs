//! # Nippo API サーバーライブラリ
//!
//! 日報アプリケーションの HTTP API サーバー。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーターとミドルウェアの組み立て
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義とエラーエンベロープへの変換
//! - [`extract`] - バリデーション付きエクストラクタ
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - 認証ミドルウェア
//!
//! ## 依存関係
//!
//! - `nippo_auth`: JWT トークンサービス、パスワードハッシュ
//! - `nippo_shared`: レスポンスエンベロープ、observability 基盤

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
