use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::http_client::ProxyConfig;

/// iForm 客户端应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// 平台服务器子域名（https://{server}.iformbuilder.com）
    #[serde(default = "default_server")]
    pub server: String,

    /// 默认 Profile ID（工作区）
    #[serde(default)]
    pub profile_id: u64,

    /// API 根地址覆盖（可选，用于测试环境或私有部署）
    /// 设置后忽略 server 字段
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 客户端实例 ID（可选，64 位十六进制）
    #[serde(default)]
    pub client_instance_id: Option<String>,

    /// User-Agent 平台标识
    #[serde(default = "default_ua_platform")]
    pub ua_platform: String,

    /// HTTP 代理地址（可选）
    /// 支持格式: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// 代理认证用户名（可选）
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// 代理认证密码（可选）
    #[serde(default)]
    pub proxy_password: Option<String>,
}

impl Config {
    /// 从环境变量覆盖配置
    pub fn override_from_env(&mut self) {
        if let Ok(server) = env::var("IFORM_SERVER") {
            self.server = server;
        }
        if let Ok(profile_id) = env::var("IFORM_PROFILE_ID") {
            if let Ok(id) = profile_id.parse() {
                self.profile_id = id;
            }
        }
        if let Ok(url) = env::var("IFORM_BASE_URL") {
            self.api_base_url = Some(url);
        }
        if let Ok(timeout) = env::var("IFORM_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.timeout_secs = secs;
            }
        }
        if let Ok(id) = env::var("CLIENT_INSTANCE_ID") {
            self.client_instance_id = Some(id);
        }
        if let Ok(proxy) = env::var("PROXY_URL") {
            self.proxy_url = Some(proxy);
        }
        if let Ok(username) = env::var("PROXY_USERNAME") {
            self.proxy_username = Some(username);
        }
        if let Ok(password) = env::var("PROXY_PASSWORD") {
            self.proxy_password = Some(password);
        }
    }

    /// 校验必填项
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_base_url.is_none() && self.server.is_empty() {
            anyhow::bail!("配置缺少 server（或 apiBaseUrl）");
        }
        if self.profile_id == 0 {
            anyhow::bail!("配置缺少 profileId");
        }
        Ok(())
    }

    /// API 根地址
    ///
    /// 优先使用 api_base_url 覆盖，否则根据 server 拼接平台地址
    pub fn api_root(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.iformbuilder.com/exzact/api", self.server),
        }
    }

    /// OAuth2 令牌端点
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.api_root())
    }

    /// v60 资源根地址
    pub fn resource_root(&self) -> String {
        format!("{}/v60", self.api_root())
    }

    /// 代理配置（从 proxy_url / proxy_username / proxy_password 组装）
    pub fn proxy(&self) -> Option<ProxyConfig> {
        let url = self.proxy_url.as_ref()?;
        let mut proxy = ProxyConfig::new(url.clone());
        if let (Some(username), Some(password)) = (&self.proxy_username, &self.proxy_password) {
            proxy = proxy.with_auth(username.clone(), password.clone());
        }
        Some(proxy)
    }

    /// User-Agent 请求头
    pub fn user_agent(&self) -> String {
        format!(
            "iform-rs/{} ({})",
            env!("CARGO_PKG_VERSION"),
            self.ua_platform
        )
    }
}

fn default_server() -> String {
    env::var("IFORM_SERVER").unwrap_or_else(|_| "app".to_string())
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ua_platform() -> String {
    const UA_PLATFORMS: &[&str] = &["darwin#24.6.0", "win32#10.0.26100", "linux#6.8.0"];
    UA_PLATFORMS[fastrand::usize(..UA_PLATFORMS.len())].to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            profile_id: 0,
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
            client_instance_id: None,
            ua_platform: default_ua_platform(),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
