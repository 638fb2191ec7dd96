//! 用户资源操作

use crate::iform::client::IformClient;
use crate::iform::model::record::CreatedId;
use crate::iform::model::user::User;

impl IformClient {
    /// 列出当前 Profile 下的全部用户（分页循环）
    pub async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.fetch_all_typed(&self.profile_path("users")).await
    }

    /// 获取单个用户
    pub async fn get_user(&self, user_id: u64) -> anyhow::Result<User> {
        self.get_typed(&self.profile_path(&format!("users/{}", user_id)), &[])
            .await
    }

    /// 批量创建用户，返回服务端分配的 ID 列表
    pub async fn create_users(&self, users: &[User]) -> anyhow::Result<Vec<u64>> {
        let created: Vec<CreatedId> = self
            .post_typed(&self.profile_path("users"), &users)
            .await?;
        Ok(created.into_iter().map(|entry| entry.id).collect())
    }
}
