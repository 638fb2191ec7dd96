//! 访问令牌管理器
//!
//! 缓存短期访问令牌，过期前自动重新获取。
//! 平台没有 refresh_token 流程，每次重新获取都走 JWT-bearer 断言

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;

use crate::iform::model::credentials::IformCredentials;
use crate::iform::model::token::{AssertionClaims, TokenResponse, JWT_BEARER_GRANT};
use crate::model::config::Config;

/// 过期前提前重新获取的安全余量（秒）
const REFRESH_SKEW_SECS: i64 = 60;

/// 服务端未返回 expires_in 时的缺省有效期（秒）
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// 访问令牌管理器
///
/// 持有配置与凭证，对外只暴露 `ensure_valid_token`
pub struct TokenManager {
    config: Config,
    credentials: IformCredentials,
    client: Client,
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl TokenManager {
    /// 创建新的令牌管理器
    pub fn new(config: Config, credentials: IformCredentials, client: Client) -> Self {
        Self {
            config,
            credentials,
            client,
            access_token: None,
            expires_at: None,
        }
    }

    /// 获取配置
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 获取凭证
    pub fn credentials(&self) -> &IformCredentials {
        &self.credentials
    }

    /// 确保持有有效令牌并返回
    ///
    /// 缓存命中直接返回；缺失或临近过期时重新获取
    pub async fn ensure_valid_token(&mut self) -> anyhow::Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }
        self.request_token().await
    }

    /// 作废缓存的令牌（下次调用重新获取）
    pub fn invalidate(&mut self) {
        self.access_token = None;
        self.expires_at = None;
    }

    /// 返回未临近过期的缓存令牌
    fn cached_token(&self) -> Option<String> {
        let token = self.access_token.as_ref()?;
        let expires_at = self.expires_at?;
        if Utc::now() + Duration::seconds(REFRESH_SKEW_SECS) < expires_at {
            Some(token.clone())
        } else {
            None
        }
    }

    /// 向令牌端点请求新令牌
    async fn request_token(&mut self) -> anyhow::Result<String> {
        let token_url = self.config.token_url();
        let assertion = AssertionClaims::new(
            self.credentials.client_key.clone(),
            token_url.clone(),
        )
        .sign(&self.credentials.client_secret)?;

        tracing::debug!("请求访问令牌: {}", token_url);

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("获取访问令牌失败: {} {}", status, body);
        }

        let token: TokenResponse = response.json().await?;
        let ttl = token.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        self.expires_at = Some(Utc::now() + Duration::seconds(ttl));
        self.access_token = Some(token.access_token.clone());

        tracing::info!("已获取访问令牌，有效期 {} 秒", ttl);
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_manager(base_url: &str) -> TokenManager {
        let mut config = Config::default();
        config.api_base_url = Some(base_url.to_string());
        config.profile_id = 1;
        let credentials = IformCredentials::new("key123", "s3cr3t");
        TokenManager::new(config, credentials, Client::new())
    }

    #[tokio::test]
    async fn test_fetches_token_with_assertion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type="))
            .and(body_string_contains("assertion="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok_1",
                "expires_in": 3600,
                "token_type": "bearer"
            })))
            .mount(&server)
            .await;

        let mut manager = test_manager(&server.uri());
        let token = manager.ensure_valid_token().await.unwrap();
        assert_eq!(token, "tok_1");
    }

    #[tokio::test]
    async fn test_unexpired_token_is_reused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok_1",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut manager = test_manager(&server.uri());
        assert_eq!(manager.ensure_valid_token().await.unwrap(), "tok_1");
        // 第二次调用命中缓存，不再请求令牌端点
        assert_eq!(manager.ensure_valid_token().await.unwrap(), "tok_1");
    }

    #[tokio::test]
    async fn test_expiring_token_is_reacquired() {
        let server = MockServer::start().await;
        // 第一次返回的令牌有效期短于安全余量，立即视为过期
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok_1",
                "expires_in": 30
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok_2",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let mut manager = test_manager(&server.uri());
        assert_eq!(manager.ensure_valid_token().await.unwrap(), "tok_1");
        assert_eq!(manager.ensure_valid_token().await.unwrap(), "tok_2");
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok_1",
                "expires_in": 3600
            })))
            .expect(2)
            .mount(&server)
            .await;

        let mut manager = test_manager(&server.uri());
        manager.ensure_valid_token().await.unwrap();
        manager.invalidate();
        manager.ensure_valid_token().await.unwrap();
    }

    #[tokio::test]
    async fn test_token_failure_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
            )
            .mount(&server)
            .await;

        let mut manager = test_manager(&server.uri());
        let err = manager.ensure_valid_token().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("invalid_client"));
    }
}
