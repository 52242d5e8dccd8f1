//! # API サーバーエントリポイント
//!
//! 日報アプリケーションの HTTP API サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `JWT_SECRET` | **Yes** | JWT の署名に使う秘密鍵 |
//! | `LOG_FORMAT` | No | ログ出力形式（`json` / `pretty`） |
//! | `RUST_LOG` | No | ログレベルフィルタ |
//!
//! 開発中は `.env` に書いておけば起動時に読み込まれる。本番では環境変数を
//! 直接設定する:
//!
//! ```bash
//! API_PORT=3000 JWT_SECRET=... cargo run -p nippo-api --release
//! ```

use nippo_api::{app_builder::build_app, config::ApiConfig};
use nippo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// dotenv → トレーシング → 設定 → ルーター → サーバー起動の順で初期化する。
/// 必須の環境変数が欠けている場合はここで即座に落とす。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env があれば取り込む（本番では環境変数を直接設定する）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("api"));
    let _app_span = tracing::info_span!("app", service = "api").entered();

    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");
    let app = build_app(&config);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
