//! iForm OAuth 客户端凭证数据模型
//!
//! 支持从平台管理页下载的凭证文件加载，使用 client-credentials (JWT-bearer) 认证方式

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// iForm OAuth 客户端凭证
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IformCredentials {
    /// 客户端 Key（断言中的 iss）
    pub client_key: String,

    /// 客户端 Secret（断言签名密钥）
    pub client_secret: String,
}

impl IformCredentials {
    /// 创建新凭证
    pub fn new(client_key: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_key: client_key.into(),
            client_secret: client_secret.into(),
        }
    }

    /// 获取默认凭证文件路径
    pub fn default_credentials_path() -> &'static str {
        "credentials.json"
    }

    /// 从环境变量加载凭证
    pub fn from_env() -> Option<Self> {
        let client_key = env::var("IFORM_CLIENT_KEY").ok()?;
        let client_secret = env::var("IFORM_CLIENT_SECRET").ok()?;

        Some(Self {
            client_key,
            client_secret,
        })
    }

    /// 从 JSON 字符串解析凭证
    pub fn from_json(json_string: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_string)
    }

    /// 从文件加载凭证
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        if content.is_empty() {
            anyhow::bail!("凭证文件为空: {:?}", path.as_ref());
        }
        let credentials = Self::from_json(&content)?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// 加载凭证：优先从环境变量，其次从文件
    pub fn load_with_env_fallback<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        // 优先尝试从环境变量加载
        if let Some(creds) = Self::from_env() {
            tracing::info!("从环境变量加载凭证");
            return Ok(creds);
        }

        // 回退到文件加载
        Self::load(path)
    }

    /// 校验凭证完整性
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.client_key.is_empty() {
            anyhow::bail!("凭证缺少 clientKey");
        }
        if self.client_secret.is_empty() {
            anyhow::bail!("凭证缺少 clientSecret");
        }
        Ok(())
    }

    /// 序列化为格式化的 JSON 字符串
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
