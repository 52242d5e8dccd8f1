//! # Observability 基盤
//!
//! ログ出力の初期化と HTTP リクエストのトレーシング補助を集約する。
//!
//! - [`init_tracing`]: `LOG_FORMAT` / `RUST_LOG` に従って購読者を登録する
//! - [`make_request_span`]: リクエストごとのスパンに Request ID を載せる
//! - [`MakeRequestUuidV7`]: `SetRequestIdLayer` 用の Request ID 生成器

/// ログ出力形式
///
/// 本番はログ集約基盤に送るため JSON、開発中は読みやすさ優先で Pretty を使う。
/// 未設定・不正な値は [`Pretty`](LogFormat::Pretty) として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 構造化 JSON（1 行 1 イベント）
    Json,
    /// 開発向けの整形出力
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値をパースする
    ///
    /// 既知の値以外は [`Pretty`](LogFormat::Pretty) に落とし、stderr に注意を出す
    /// （購読者の登録前なので tracing はまだ使えない）。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("LOG_FORMAT={other:?} は不明な値のため pretty で起動します");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る（未設定なら既定値）
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// トレーシング初期化の設定
///
/// 各アプリの `main` が値を決めて [`init_tracing`] に渡す。
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名。起動時に張る `app` スパンの `service` フィールドに載せ、
    /// ログ集約時の絞り込みに使う
    pub service_name: String,
    /// ログ出力形式
    pub log_format:   LogFormat,
}

impl TracingConfig {
    /// サービス名と出力形式を指定して作成する
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 出力形式を環境変数から読み取って作成する
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// トレーシング購読者を登録する
///
/// フィルタは `RUST_LOG` があればそれを、なければ `"info,nippo=debug"` を使う。
/// JSON 形式ではイベントのフィールドをトップレベルに平坦化し、現在のスパン
/// （`service` や `request_id`）を `span` として併記する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,nippo=debug".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// HTTP リクエスト用のトレーシングスパンを作成する
///
/// `TraceLayer::make_span_with` に渡して使う。`SetRequestIdLayer` が付与した
/// `x-request-id` ヘッダーの値をスパンに含め、リクエスト処理中の全ログに
/// 自動注入する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// UUID v7 で Request ID を生成する
///
/// `SetRequestIdLayer` に渡して使う。クライアントが `x-request-id` ヘッダーを
/// 提示した場合はレイヤー側でその値が優先される。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}
