//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、この親モジュールで re-export する
//! - ハンドラはレスポンスの組み立てだけを行い、認証判断は
//!   [`crate::middleware`] に委譲する

pub mod health;
pub mod me;

pub use health::health_check;
pub use me::me;
