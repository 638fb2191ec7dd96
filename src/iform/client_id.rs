//! 客户端实例指纹生成器
//!

use sha2::{Digest, Sha256};

use crate::iform::model::credentials::IformCredentials;
use crate::model::config::Config;

/// 根据配置与凭证生成稳定的客户端实例 ID
///
/// 优先使用自定义配置（64 位十六进制），否则由 client_key 派生固定指纹
pub fn generate_from_credentials(credentials: &IformCredentials, config: &Config) -> Option<String> {
    // 如果配置了自定义 clientInstanceId 且长度为 64，优先使用
    if let Some(ref instance_id) = config.client_instance_id {
        if instance_id.len() == 64 {
            return Some(instance_id.clone());
        }
    }

    // 由 client_key 派生
    if !credentials.client_key.is_empty() {
        return Some(sha256_hex(&format!("IformRs/{}", credentials.client_key)));
    }

    // 没有有效的凭证
    None
}

/// SHA256 哈希实现（返回十六进制字符串）
fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let result = sha256_hex("test");
        assert_eq!(result.len(), 64);
        assert_eq!(
            result,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_generate_with_custom_instance_id() {
        let credentials = IformCredentials::default();
        let mut config = Config::default();
        config.client_instance_id = Some("a".repeat(64));

        let result = generate_from_credentials(&credentials, &config);
        assert_eq!(result, Some("a".repeat(64)));
    }

    #[test]
    fn test_generate_ignores_short_instance_id() {
        let credentials = IformCredentials::new("key123", "secret");
        let mut config = Config::default();
        config.client_instance_id = Some("short".to_string());

        let result = generate_from_credentials(&credentials, &config);
        assert!(result.is_some());
        assert_ne!(result, Some("short".to_string()));
    }

    #[test]
    fn test_generate_from_client_key_is_stable() {
        let credentials = IformCredentials::new("key123", "secret");
        let config = Config::default();

        let first = generate_from_credentials(&credentials, &config);
        let second = generate_from_credentials(&credentials, &config);
        assert!(first.is_some());
        assert_eq!(first.as_ref().unwrap().len(), 64);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_without_credentials() {
        let credentials = IformCredentials::default();
        let config = Config::default();

        let result = generate_from_credentials(&credentials, &config);
        assert!(result.is_none());
    }
}
