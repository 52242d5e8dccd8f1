//! # API 設定
//!
//! 環境変数から API サーバーの設定を読み込む。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:       String,
    /// ポート番号
    pub port:       u16,
    /// JWT の署名に使う秘密鍵
    pub jwt_secret: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host:       env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:       env::var("API_PORT")
                .expect("API_PORT が設定されていません（.env を確認してください）")
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET が設定されていません（.env を確認してください）"),
        })
    }
}
