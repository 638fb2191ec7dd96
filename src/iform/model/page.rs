//! 表单页面与页面元素数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 表单页面
///
/// 平台上的一个数据采集表单定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 唯一标识
    pub id: u64,
    /// 表名（机器名）
    pub name: String,
    /// 显示名
    #[serde(default)]
    pub label: String,
    /// 创建时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    /// 最后修改时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
}

/// 新建页面请求体
#[derive(Debug, Clone, Serialize)]
pub struct NewPage {
    /// 表名（机器名）
    pub name: String,
    /// 显示名
    pub label: String,
}

impl NewPage {
    /// 创建新页面请求
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// 页面元素（表单字段）
///
/// 创建时 id 缺省，由服务端分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageElement {
    /// 唯一标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// 字段名（机器名，即记录中的列名）
    pub name: String,
    /// 显示名
    #[serde(default)]
    pub label: String,
    /// 数据类型（"text" / "number" / "date" / "select" / "location" / "image"）
    pub data_type: String,
    /// 排序序号
    #[serde(default)]
    pub sort_order: i64,
    /// 关联的选项列表 ID（select 类型使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_list_id: Option<u64>,
}

impl PageElement {
    /// 创建新的页面元素
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            label: label.into(),
            data_type: data_type.into(),
            sort_order: 0,
            option_list_id: None,
        }
    }

    /// 设置排序序号
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// 关联选项列表
    pub fn with_option_list(mut self, option_list_id: u64) -> Self {
        self.option_list_id = Some(option_list_id);
        self
    }
}
