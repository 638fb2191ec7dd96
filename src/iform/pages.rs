//! 表单页面与页面元素资源操作

use crate::iform::client::IformClient;
use crate::iform::model::page::{NewPage, Page, PageElement};
use crate::iform::model::record::CreatedId;

impl IformClient {
    /// 列出当前 Profile 下的全部页面（分页循环）
    pub async fn list_pages(&self) -> anyhow::Result<Vec<Page>> {
        self.fetch_all_typed(&self.profile_path("pages")).await
    }

    /// 获取单个页面
    pub async fn get_page(&self, page_id: u64) -> anyhow::Result<Page> {
        self.get_typed(&self.profile_path(&format!("pages/{}", page_id)), &[])
            .await
    }

    /// 按表名查找页面 ID
    ///
    /// 不存在时返回 None
    pub async fn find_page_id(&self, name: &str) -> anyhow::Result<Option<u64>> {
        let pages = self.list_pages().await?;
        Ok(pages.into_iter().find(|page| page.name == name).map(|page| page.id))
    }

    /// 创建页面，返回服务端创建的页面
    pub async fn create_page(&self, page: &NewPage) -> anyhow::Result<Page> {
        self.post_typed(&self.profile_path("pages"), page).await
    }

    /// 删除页面
    pub async fn delete_page(&self, page_id: u64) -> anyhow::Result<()> {
        self.delete(&self.profile_path(&format!("pages/{}", page_id)))
            .await
    }

    /// 列出页面的元素（字段）定义
    pub async fn list_page_elements(&self, page_id: u64) -> anyhow::Result<Vec<PageElement>> {
        self.fetch_all_typed(&self.profile_path(&format!("pages/{}/elements", page_id)))
            .await
    }

    /// 批量创建页面元素，返回服务端分配的 ID 列表
    pub async fn create_page_elements(
        &self,
        page_id: u64,
        elements: &[PageElement],
    ) -> anyhow::Result<Vec<u64>> {
        let created: Vec<CreatedId> = self
            .post_typed(
                &self.profile_path(&format!("pages/{}/elements", page_id)),
                &elements,
            )
            .await?;
        Ok(created.into_iter().map(|entry| entry.id).collect())
    }
}
