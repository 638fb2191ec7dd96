//! OAuth2 令牌端点的请求与响应体
//!
//! 平台使用 client-credentials 的 JWT-bearer 变体：
//! 客户端用 client_secret 对断言做 HS256 签名，换取短期访问令牌

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// JWT-bearer 授权类型
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// 断言有效期（秒）
pub const ASSERTION_TTL_SECS: i64 = 600;

/// 令牌请求断言的声明
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// 客户端 Key
    pub iss: String,
    /// 令牌端点 URL
    pub aud: String,
    /// 签发时间（Unix 秒）
    pub iat: i64,
    /// 过期时间（Unix 秒）
    pub exp: i64,
}

impl AssertionClaims {
    /// 创建新的断言声明
    pub fn new(client_key: impl Into<String>, token_url: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            iss: client_key.into(),
            aud: token_url.into(),
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        }
    }

    /// 用 client_secret 签名，生成 JWT 断言
    pub fn sign(&self, client_secret: &str) -> anyhow::Result<String> {
        let jwt = encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(client_secret.as_bytes()),
        )?;
        Ok(jwt)
    }
}

/// 令牌端点响应体
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}
