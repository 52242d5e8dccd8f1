//! # JWT トークンサービス
//!
//! ユーザー識別情報を含む署名付きトークンの発行・検証・デコードを提供する。
//!
//! ## トークンのライフサイクル
//!
//! - 発行: ログイン成功時に [`TokenService::generate`] で 24 時間有効のトークンを作成
//! - 検証: 保護ルートへのリクエストごとに [`TokenService::verify`] で署名と有効期限を確認
//! - 失効: サーバー側の失効リストは持たない（有効期限のみで無効化される）

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm,
    DecodingKey,
    EncodingKey,
    Header,
    Validation,
    decode,
    encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// トークンの有効期間（時間）
pub const TOKEN_EXPIRY_HOURS: i64 = 24;

/// 認証済みユーザーの識別情報
///
/// ログイン時に作成され、トークンに埋め込まれる。発行後は不変であり、
/// 内容を変えるには新しいトークンの発行が必要。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id:    i64,
    pub email:      String,
    pub is_manager: bool,
}

/// JWT クレーム
///
/// ワイヤ形式はフラットな JSON
/// `{ "userId", "email", "isManager", "iat", "exp" }`（タイムスタンプは Unix 秒）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub user: AuthUser,
    /// 発行時刻（Unix 秒）
    pub iat:  i64,
    /// 有効期限（Unix 秒）
    pub exp:  i64,
}

/// JWT トークンサービス
///
/// HS256 でトークンを署名・検証する。署名シークレットはプロセス設定から
/// 構築時に明示的に渡す。
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
}

impl TokenService {
    /// 署名シークレットからサービスを構築する
    ///
    /// # Panics
    ///
    /// シークレットが空の場合。シークレット未設定は起動時の設定不備であり、
    /// リクエスト処理中に回復できるエラーではない。
    pub fn new(secret: &str) -> Self {
        assert!(!secret.is_empty(), "JWT_SECRET が設定されていません");

        let mut validation = Validation::new(Algorithm::HS256);
        // 有効期限は厳密に判定する（クロックスキュー猶予なし）
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// ユーザー識別情報から 24 時間有効のトークンを発行する
    pub fn generate(&self, user: &AuthUser) -> String {
        let now = Utc::now();
        let claims = Claims {
            user: user.clone(),
            iat:  now.timestamp(),
            exp:  (now + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
        };

        // HS256 は任意長の鍵を受け付け、Claims のシリアライズも失敗しないため、
        // ここでのエンコード失敗は起動時設定の不備と同類の到達不能ケース
        encode(&Header::default(), &claims, &self.encoding_key)
            .expect("JWT のエンコードに失敗しました")
    }

    /// トークンの署名と有効期限を検証し、クレームを返す
    ///
    /// # Errors
    ///
    /// - 有効期限切れの場合は `TOKEN_EXPIRED`
    /// - それ以外の検証失敗（署名不一致・構造不正）はすべて `INVALID_TOKEN`
    ///
    /// 認証エラー以外の失敗を返すことはない。
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::token_expired(),
                _ => AuthError::invalid_token(),
            })
    }

    /// 署名・有効期限を検証せずにクレームを取り出す
    ///
    /// 診断などの信頼境界の外側でのみ使うこと。信頼判断には [`TokenService::verify`]
    /// を使う。不正な入力では `None` を返し、決してパニックしない。
    pub fn decode_unverified(token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }
}
