//! 选项列表与选项元素数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 选项列表
///
/// 一组可在表单字段中引用的命名选项集合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionList {
    /// 唯一标识
    pub id: u64,
    /// 名称
    pub name: String,
    /// 创建时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

/// 新建选项列表请求体
#[derive(Debug, Clone, Serialize)]
pub struct NewOptionList {
    /// 名称
    pub name: String,
}

impl NewOptionList {
    /// 创建新选项列表请求
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 选项元素
///
/// 创建时 id 缺省，由服务端分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionElement {
    /// 唯一标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// 存储值
    pub key_value: String,
    /// 显示文本
    pub label: String,
    /// 排序序号
    #[serde(default)]
    pub sort_order: i64,
    /// 条件表达式（可选，控制选项何时可见）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<String>,
}

impl OptionElement {
    /// 创建新的选项元素
    pub fn new(key_value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: None,
            key_value: key_value.into(),
            label: label.into(),
            sort_order: 0,
            condition_value: None,
        }
    }

    /// 设置排序序号
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// 设置条件表达式
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition_value = Some(condition.into());
        self
    }
}
