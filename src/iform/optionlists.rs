//! 选项列表与选项元素资源操作

use crate::iform::client::IformClient;
use crate::iform::model::optionlist::{NewOptionList, OptionElement, OptionList};
use crate::iform::model::record::{CreatedId, DeletedCount};

impl IformClient {
    /// 列出当前 Profile 下的全部选项列表（分页循环）
    pub async fn list_option_lists(&self) -> anyhow::Result<Vec<OptionList>> {
        self.fetch_all_typed(&self.profile_path("optionlists")).await
    }

    /// 获取单个选项列表
    pub async fn get_option_list(&self, list_id: u64) -> anyhow::Result<OptionList> {
        self.get_typed(&self.profile_path(&format!("optionlists/{}", list_id)), &[])
            .await
    }

    /// 按名称查找选项列表 ID
    ///
    /// 不存在时返回 None
    pub async fn find_option_list_id(&self, name: &str) -> anyhow::Result<Option<u64>> {
        let lists = self.list_option_lists().await?;
        Ok(lists.into_iter().find(|list| list.name == name).map(|list| list.id))
    }

    /// 创建选项列表，返回服务端创建的列表
    pub async fn create_option_list(&self, list: &NewOptionList) -> anyhow::Result<OptionList> {
        self.post_typed(&self.profile_path("optionlists"), list).await
    }

    /// 删除选项列表
    pub async fn delete_option_list(&self, list_id: u64) -> anyhow::Result<()> {
        self.delete(&self.profile_path(&format!("optionlists/{}", list_id)))
            .await
    }

    /// 列出选项列表中的全部选项（分页循环）
    pub async fn list_options(&self, list_id: u64) -> anyhow::Result<Vec<OptionElement>> {
        self.fetch_all_typed(&self.options_path(list_id)).await
    }

    /// 批量创建选项，返回服务端分配的 ID 列表
    pub async fn create_options(
        &self,
        list_id: u64,
        options: &[OptionElement],
    ) -> anyhow::Result<Vec<u64>> {
        let created: Vec<CreatedId> = self
            .post_typed(&self.options_path(list_id), &options)
            .await?;
        Ok(created.into_iter().map(|entry| entry.id).collect())
    }

    /// 批量删除选项，返回实际删除条数
    pub async fn delete_options(&self, list_id: u64, ids: &[u64]) -> anyhow::Result<u64> {
        let body = serde_json::json!({ "ids": ids });
        let result: DeletedCount = self.delete_typed(&self.options_path(list_id), &body).await?;
        Ok(result.deleted)
    }

    /// 选项端点路径
    fn options_path(&self, list_id: u64) -> String {
        self.profile_path(&format!("optionlists/{}/options", list_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iform::test_support::{client_for, mount_token};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_option_lists_and_find() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v60/profiles/42/optionlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 77, "name": "species_list"},
                {"id": 78, "name": "site_list"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let lists = client.list_option_lists().await.unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(
            client.find_option_list_id("site_list").await.unwrap(),
            Some(78)
        );
        assert_eq!(client.find_option_list_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_option_list() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/v60/profiles/42/optionlists"))
            .and(body_json(json!({"name": "gear_list"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 79, "name": "gear_list"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let list = client
            .create_option_list(&NewOptionList::new("gear_list"))
            .await
            .unwrap();
        assert_eq!(list.id, 79);
    }

    #[tokio::test]
    async fn test_list_and_create_options() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v60/profiles/42/optionlists/77/options"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "key_value": "chinook", "label": "Chinook Salmon", "sort_order": 1}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v60/profiles/42/optionlists/77/options"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let options = client.list_options(77).await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].key_value, "chinook");

        let new_options = vec![OptionElement::new("coho", "Coho Salmon").with_sort_order(2)];
        let ids = client.create_options(77, &new_options).await.unwrap();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_delete_options() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/v60/profiles/42/optionlists/77/options"))
            .and(body_json(json!({"ids": [1, 2]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 2})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let deleted = client.delete_options(77, &[1, 2]).await.unwrap();
        assert_eq!(deleted, 2);
    }
}
