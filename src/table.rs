//! 表格化输出模块
//!
//! 把动态结构的记录 JSON 整形为带类型列的表格，替代直接返回原始 JSON。
//! 列类型由整列单元格推断合并得出，支持 CSV 导出

use chrono::DateTime;
use serde_json::Value;
use std::fmt;
use std::io::Write;

/// 列数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 整列为空
    Null,
    /// 布尔
    Boolean,
    /// 整数
    Integer,
    /// 浮点数
    Float,
    /// RFC3339 时间戳
    DateTime,
    /// 文本（含混合类型列）
    Text,
}

impl ColumnType {
    /// 合并两个列类型（用于整列推断）
    ///
    /// 整数与浮点合并为浮点，其余冲突退化为文本
    pub fn merge(self, other: ColumnType) -> ColumnType {
        if self == other {
            return self;
        }
        match (self, other) {
            (ColumnType::Null, t) | (t, ColumnType::Null) => t,
            (ColumnType::Integer, ColumnType::Float) | (ColumnType::Float, ColumnType::Integer) => {
                ColumnType::Float
            }
            _ => ColumnType::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Null => "null",
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
        }
    }
}

/// 单元格值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    DateTime(String),
    Text(String),
}

impl CellValue {
    /// 从 JSON 值转换
    ///
    /// RFC3339 格式的字符串识别为时间戳；嵌套结构保留为 JSON 文本
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else {
                    n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null)
                }
            }
            Value::String(s) => {
                if DateTime::parse_from_rfc3339(s).is_ok() {
                    CellValue::DateTime(s.clone())
                } else {
                    CellValue::Text(s.clone())
                }
            }
            other => CellValue::Text(other.to_string()),
        }
    }

    /// 单元格对应的列类型
    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Null => ColumnType::Null,
            CellValue::Boolean(_) => ColumnType::Boolean,
            CellValue::Integer(_) => ColumnType::Integer,
            CellValue::Float(_) => ColumnType::Float,
            CellValue::DateTime(_) => ColumnType::DateTime,
            CellValue::Text(_) => ColumnType::Text,
        }
    }

    /// 渲染为字符串（Null 渲染为空串）
    pub fn render(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::DateTime(s) | CellValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// 带类型列的表格
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<String>,
    column_types: Vec<ColumnType>,
    rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// 从记录 JSON 数组构建表格
    ///
    /// # Arguments
    /// * `records` - 平面 JSON 对象数组（记录端点的响应）
    /// * `preferred` - 列顺序（逗号分隔的 fields 选择）；缺省按首次出现顺序
    pub fn from_records(records: &[Value], preferred: Option<&str>) -> Self {
        let columns: Vec<String> = match preferred {
            Some(fields) => fields
                .split(',')
                .map(|field| field.trim().to_string())
                .filter(|field| !field.is_empty())
                .collect(),
            None => first_seen_columns(records),
        };

        let rows: Vec<Vec<CellValue>> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        record
                            .get(column)
                            .map(CellValue::from_json)
                            .unwrap_or(CellValue::Null)
                    })
                    .collect()
            })
            .collect();

        let column_types = (0..columns.len())
            .map(|index| {
                rows.iter()
                    .map(|row| row[index].column_type())
                    .fold(ColumnType::Null, ColumnType::merge)
            })
            .collect();

        Self {
            columns,
            column_types,
            rows,
        }
    }

    /// 列名
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 推断出的列类型
    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    /// 数据行
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 写出 CSV（首行为列名，Null 写为空）
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row.iter().map(|cell| cell.render()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 序列化为 CSV 字符串
    pub fn to_csv_string(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// 按首次出现顺序收集全部记录的列名
fn first_seen_columns(records: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_from_json() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(true)), CellValue::Boolean(true));
        assert_eq!(CellValue::from_json(&json!(3)), CellValue::Integer(3));
        assert_eq!(CellValue::from_json(&json!(2.5)), CellValue::Float(2.5));
        assert_eq!(
            CellValue::from_json(&json!("2026-05-01T08:30:00Z")),
            CellValue::DateTime("2026-05-01T08:30:00Z".to_string())
        );
        assert_eq!(
            CellValue::from_json(&json!("A-12")),
            CellValue::Text("A-12".to_string())
        );
        // 嵌套结构保留为 JSON 文本
        assert_eq!(
            CellValue::from_json(&json!({"lat": 1.0})),
            CellValue::Text(r#"{"lat":1.0}"#.to_string())
        );
    }

    #[test]
    fn test_column_type_merge() {
        assert_eq!(
            ColumnType::Integer.merge(ColumnType::Integer),
            ColumnType::Integer
        );
        assert_eq!(
            ColumnType::Integer.merge(ColumnType::Float),
            ColumnType::Float
        );
        assert_eq!(ColumnType::Null.merge(ColumnType::Boolean), ColumnType::Boolean);
        assert_eq!(ColumnType::Integer.merge(ColumnType::Text), ColumnType::Text);
    }

    #[test]
    fn test_from_records_with_preferred_order() {
        let records = vec![
            json!({"id": 1, "site": "A-12", "count": 3}),
            json!({"id": 2, "site": "B-03"}),
        ];
        let table = DataTable::from_records(&records, Some("id,site,count"));

        assert_eq!(table.columns(), &["id", "site", "count"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column_types(),
            &[ColumnType::Integer, ColumnType::Text, ColumnType::Integer]
        );
        // 缺失的字段补 Null
        assert_eq!(table.rows()[1][2], CellValue::Null);
    }

    #[test]
    fn test_from_records_infers_mixed_columns() {
        let records = vec![
            json!({"v": 1}),
            json!({"v": 2.5}),
        ];
        let table = DataTable::from_records(&records, Some("v"));
        assert_eq!(table.column_types(), &[ColumnType::Float]);

        let records = vec![
            json!({"v": 1}),
            json!({"v": "x"}),
        ];
        let table = DataTable::from_records(&records, Some("v"));
        assert_eq!(table.column_types(), &[ColumnType::Text]);
    }

    #[test]
    fn test_from_records_collects_columns() {
        let records = vec![
            json!({"id": 1, "site": "A"}),
            json!({"id": 2, "extra": true}),
        ];
        let table = DataTable::from_records(&records, None);
        assert_eq!(table.columns().len(), 3);
        assert!(table.columns().contains(&"extra".to_string()));
    }

    #[test]
    fn test_csv_output() {
        let records = vec![
            json!({"id": 1, "site": "A-12", "count": 3}),
            json!({"id": 2, "site": "B,03", "count": null}),
        ];
        let table = DataTable::from_records(&records, Some("id,site,count"));
        let csv = table.to_csv_string().unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,site,count"));
        assert_eq!(lines.next(), Some("1,A-12,3"));
        // 含逗号的值加引号，Null 写为空
        assert_eq!(lines.next(), Some(r#"2,"B,03","#));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_table() {
        let table = DataTable::from_records(&[], None);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
