//! 记录查询参数与记录相关的响应体
//!
//! 记录本身是动态结构（列随表单元素变化），在 API 层以
//! `serde_json::Value` 传递，由 `table::DataTable` 负责表格化

use serde::Deserialize;
use serde_json::Value;

/// 单页条数上限（服务端硬限制）
pub const PAGE_LIMIT: usize = 100;

/// 记录查询参数
///
/// 组装 offset / limit / fields / where 查询串
#[derive(Debug, Clone)]
pub struct RecordQuery {
    /// 起始偏移
    pub offset: usize,
    /// 单页条数（最大 PAGE_LIMIT）
    pub limit: usize,
    /// 返回的字段列表（逗号分隔），缺省返回全部字段
    pub fields: Option<String>,
    /// 仅返回 ID 大于该值的记录
    pub since_id: Option<u64>,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: PAGE_LIMIT,
            fields: None,
            since_id: None,
        }
    }
}

impl RecordQuery {
    /// 创建默认查询参数
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置起始偏移
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// 设置单页条数（超过上限时截断为 PAGE_LIMIT）
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(PAGE_LIMIT);
        self
    }

    /// 设置返回字段列表
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// 设置增量同步起点
    pub fn with_since_id(mut self, since_id: u64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    /// 组装为查询参数键值对
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("offset".to_string(), self.offset.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(ref fields) = self.fields {
            params.push(("fields".to_string(), fields.clone()));
        }
        if let Some(since_id) = self.since_id {
            params.push(("where".to_string(), format!("id(>{})", since_id)));
        }
        params
    }
}

/// 创建类端点的响应条目
///
/// 批量创建（记录 / 元素 / 选项 / 用户）返回该结构的数组
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedId {
    /// 服务端分配的 ID
    pub id: u64,
}

/// 批量删除的响应体
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedCount {
    /// 实际删除的条数
    pub deleted: u64,
}

/// 提取记录数组中的最大 ID
///
/// 增量同步时用于推进 since_id 游标；缺少 id 字段的记录被忽略
pub fn max_record_id(records: &[Value]) -> Option<u64> {
    records
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_u64))
        .max()
}
