//! Profile（工作区）数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile 信息
///
/// 平台上的一个工作区，持有表单页面、选项列表和用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// 唯一标识
    pub id: u64,
    /// 名称
    pub name: String,
    /// 类型（"production" / "trial" 等）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 创建时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}
