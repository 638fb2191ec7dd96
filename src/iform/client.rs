//! iForm API 客户端
//!
//! 核心组件，负责与平台 REST API 通信：
//! 统一构建请求头、检查响应状态、聚合分页结果

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::http_client::build_client;
use crate::iform::client_id;
use crate::iform::model::credentials::IformCredentials;
use crate::iform::model::record::PAGE_LIMIT;
use crate::iform::token_manager::TokenManager;
use crate::model::config::Config;

/// iForm API 客户端
///
/// 内部使用 Arc<Mutex<_>> 管理 TokenManager 状态，支持线程安全的并发访问；
/// 请求本身按调用顺序串行发出
pub struct IformClient {
    token_manager: Arc<Mutex<TokenManager>>,
    client: Client,
    resource_root: String,
    profile_id: u64,
    client_instance_id: Option<String>,
}

impl IformClient {
    /// 创建新的客户端实例
    pub fn new(config: Config, credentials: IformCredentials) -> anyhow::Result<Self> {
        config.validate()?;
        credentials.validate()?;

        let client = build_client(
            config.proxy().as_ref(),
            config.timeout_secs,
            &config.user_agent(),
        )?;
        let client_instance_id = client_id::generate_from_credentials(&credentials, &config);
        let resource_root = config.resource_root();
        let profile_id = config.profile_id;
        let token_manager = TokenManager::new(config, credentials, client.clone());

        Ok(Self {
            token_manager: Arc::new(Mutex::new(token_manager)),
            client,
            resource_root,
            profile_id,
            client_instance_id,
        })
    }

    /// 当前 Profile ID
    pub fn profile_id(&self) -> u64 {
        self.profile_id
    }

    /// v60 资源根地址
    pub fn resource_root(&self) -> &str {
        &self.resource_root
    }

    /// 获取当前有效的访问令牌（调试用）
    pub async fn access_token(&self) -> anyhow::Result<String> {
        let mut tm = self.token_manager.lock().await;
        tm.ensure_valid_token().await
    }

    /// 当前 Profile 下的资源路径
    pub(crate) fn profile_path(&self, rest: &str) -> String {
        format!("profiles/{}/{}", self.profile_id, rest)
    }

    /// 构建携带令牌的请求头
    async fn bearer_headers(&self) -> anyhow::Result<HeaderMap> {
        let token = {
            let mut tm = self.token_manager.lock().await;
            tm.ensure_valid_token().await?
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        if let Some(ref instance_id) = self.client_instance_id {
            headers.insert("X-Client-Id", HeaderValue::from_str(instance_id)?);
        }
        headers.insert(
            "X-Request-Id",
            HeaderValue::from_str(&Uuid::new_v4().to_string())?,
        );
        Ok(headers)
    }

    /// 发送请求并检查响应状态
    ///
    /// 非 2xx 立即失败，错误中携带状态码与响应体
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> anyhow::Result<Response> {
        let url = format!("{}/{}", self.resource_root, path);
        let headers = self.bearer_headers().await?;

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("{} {} 请求失败: {} {}", method, url, status, text);
        }

        Ok(response)
    }

    /// GET 请求，返回原始 JSON
    pub(crate) async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> anyhow::Result<Value> {
        let response = self.send(Method::GET, path, query, None).await?;
        Ok(response.json().await?)
    }

    /// GET 请求，反序列化为目标类型
    pub(crate) async fn get_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> anyhow::Result<T> {
        let response = self.send(Method::GET, path, query, None).await?;
        Ok(response.json().await?)
    }

    /// POST 请求，反序列化为目标类型
    pub(crate) async fn post_typed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, &[], Some(&body)).await?;
        Ok(response.json().await?)
    }

    /// DELETE 请求，忽略响应体
    pub(crate) async fn delete(&self, path: &str) -> anyhow::Result<()> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// 携带请求体的 DELETE 请求（批量删除），反序列化为目标类型
    pub(crate) async fn delete_typed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::DELETE, path, &[], Some(&body)).await?;
        Ok(response.json().await?)
    }

    /// 分页拉取列表端点的全部条目
    ///
    /// 按 offset/limit 循环请求，短页（少于 limit 条）表示数据已取完
    pub(crate) async fn fetch_all_pages(
        &self,
        path: &str,
        base_query: &[(String, String)],
    ) -> anyhow::Result<Vec<Value>> {
        let mut all = Vec::new();
        let mut offset = 0usize;

        loop {
            let mut query = base_query.to_vec();
            query.push(("offset".to_string(), offset.to_string()));
            query.push(("limit".to_string(), PAGE_LIMIT.to_string()));

            let value = self.get_json(path, &query).await?;
            let batch = expect_array(value)?;
            let count = batch.len();
            all.extend(batch);

            if count < PAGE_LIMIT {
                break;
            }
            offset += count;
        }

        tracing::debug!("分页拉取 {}: 共 {} 条", path, all.len());
        Ok(all)
    }

    /// 分页拉取并反序列化为目标类型列表
    pub(crate) async fn fetch_all_typed<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> anyhow::Result<Vec<T>> {
        let values = self.fetch_all_pages(path, &[]).await?;
        Ok(serde_json::from_value(Value::Array(values))?)
    }
}

/// 要求响应为 JSON 数组
pub(crate) fn expect_array(value: Value) -> anyhow::Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => anyhow::bail!("响应不是 JSON 数组: {}", other),
    }
}
