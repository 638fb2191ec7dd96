//! 记录资源操作
//!
//! 包含单页查询、全量分页拉取和 since-id 增量同步

use serde_json::Value;

use crate::iform::client::{expect_array, IformClient};
use crate::iform::model::record::{max_record_id, CreatedId, DeletedCount, RecordQuery, PAGE_LIMIT};

impl IformClient {
    /// 查询一页记录（原始 JSON 行）
    pub async fn list_records(
        &self,
        page_id: u64,
        query: &RecordQuery,
    ) -> anyhow::Result<Vec<Value>> {
        let value = self
            .get_json(&self.records_path(page_id), &query.to_params())
            .await?;
        expect_array(value)
    }

    /// 获取单条记录
    pub async fn get_record(&self, page_id: u64, record_id: u64) -> anyhow::Result<Value> {
        self.get_json(
            &self.profile_path(&format!("pages/{}/records/{}", page_id, record_id)),
            &[],
        )
        .await
    }

    /// 拉取页面全部记录（分页循环，短页结束）
    pub async fn all_records(
        &self,
        page_id: u64,
        fields: Option<&str>,
    ) -> anyhow::Result<Vec<Value>> {
        let mut base_query = Vec::new();
        if let Some(fields) = fields {
            base_query.push(("fields".to_string(), fields.to_string()));
        }
        self.fetch_all_pages(&self.records_path(page_id), &base_query)
            .await
    }

    /// 增量拉取 ID 大于 since_id 的全部记录
    ///
    /// 每批把游标推进到本批最大 ID，短页结束；
    /// 字段选择会被强制包含 id，否则游标无法推进
    pub async fn records_since(
        &self,
        page_id: u64,
        since_id: u64,
        fields: Option<&str>,
    ) -> anyhow::Result<Vec<Value>> {
        let path = self.records_path(page_id);
        let fields = fields.map(ensure_id_field);

        let mut all = Vec::new();
        let mut cursor = since_id;

        loop {
            let mut query = RecordQuery::new().with_since_id(cursor);
            if let Some(ref fields) = fields {
                query = query.with_fields(fields.clone());
            }

            let value = self.get_json(&path, &query.to_params()).await?;
            let batch = expect_array(value)?;
            let count = batch.len();

            match max_record_id(&batch) {
                Some(max_id) => cursor = cursor.max(max_id),
                // 满页却取不到 id 时无法推进游标，只能失败
                None if count >= PAGE_LIMIT => {
                    anyhow::bail!("记录缺少 id 字段，无法推进增量游标")
                }
                None => {}
            }

            all.extend(batch);
            if count < PAGE_LIMIT {
                break;
            }
        }

        tracing::debug!(
            "增量同步 page {}: since {} 起共 {} 条",
            page_id,
            since_id,
            all.len()
        );
        Ok(all)
    }

    /// 批量创建记录（平面 JSON 行），返回服务端分配的 ID 列表
    pub async fn create_records(
        &self,
        page_id: u64,
        rows: &[Value],
    ) -> anyhow::Result<Vec<u64>> {
        let created: Vec<CreatedId> = self.post_typed(&self.records_path(page_id), &rows).await?;
        Ok(created.into_iter().map(|entry| entry.id).collect())
    }

    /// 删除单条记录
    pub async fn delete_record(&self, page_id: u64, record_id: u64) -> anyhow::Result<()> {
        self.delete(&self.profile_path(&format!("pages/{}/records/{}", page_id, record_id)))
            .await
    }

    /// 批量删除记录，返回实际删除条数
    pub async fn delete_records(&self, page_id: u64, ids: &[u64]) -> anyhow::Result<u64> {
        let body = serde_json::json!({ "ids": ids });
        let result: DeletedCount = self
            .delete_typed(&self.records_path(page_id), &body)
            .await?;
        Ok(result.deleted)
    }

    /// 页面记录端点路径
    fn records_path(&self, page_id: u64) -> String {
        self.profile_path(&format!("pages/{}/records", page_id))
    }
}

/// 字段选择强制包含 id
fn ensure_id_field(fields: &str) -> String {
    let has_id = fields
        .split(',')
        .any(|field| field.trim() == "id");
    if has_id {
        fields.to_string()
    } else {
        format!("id,{}", fields)
    }
}
