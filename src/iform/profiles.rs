//! Profile 资源操作

use crate::iform::client::IformClient;
use crate::iform::model::profile::Profile;

impl IformClient {
    /// 列出可访问的全部 Profile（分页循环）
    pub async fn list_profiles(&self) -> anyhow::Result<Vec<Profile>> {
        self.fetch_all_typed("profiles").await
    }

    /// 获取单个 Profile
    pub async fn get_profile(&self, profile_id: u64) -> anyhow::Result<Profile> {
        self.get_typed(&format!("profiles/{}", profile_id), &[]).await
    }

    /// 获取当前配置的 Profile
    pub async fn current_profile(&self) -> anyhow::Result<Profile> {
        self.get_profile(self.profile_id()).await
    }
}
