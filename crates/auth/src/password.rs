//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。

use argon2::{
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// パスワード処理のエラー
#[derive(Debug, Error)]
pub enum PasswordError {
    /// ハッシュ化に失敗
    #[error("パスワードのハッシュ化に失敗しました: {0}")]
    Hash(argon2::password_hash::Error),
    /// 保存されているハッシュ文字列の形式が不正
    #[error("不正なハッシュ形式です: {0}")]
    InvalidHashFormat(argon2::password_hash::Error),
}

/// OWASP 推奨パラメータ（RFC 9106）の Argon2id インスタンスを作成する
///
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
fn argon2() -> Argon2<'static> {
    let params = Params::new(
        65536, // memory (KB) = 64 MB
        1,     // iterations
        1,     // parallelism
        None,  // output length (default: 32)
    )
    .expect("Argon2 パラメータが不正です");

    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// パスワードをハッシュ化する
///
/// ソルトは呼び出しごとにランダム生成されるため、同じ平文でも出力は
/// 毎回異なる。出力はソルトとパラメータを含む自己完結な PHC 文字列。
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// 平文とハッシュを照合する
///
/// 比較はハッシュ値の再計算によって行われ、タイミングリークに対して安全。
///
/// # Errors
///
/// ハッシュ文字列自体が PHC 形式として不正な場合のみ `Err` を返す。
/// 平文の不一致は `Ok(false)`。
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError::InvalidHashFormat)?;

    Ok(argon2().verify_password(plain.as_bytes(), &parsed).is_ok())
}
