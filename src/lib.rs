//! iform-rs
//!
//! 移动数据采集平台（iFormBuilder 风格 REST API）的便捷客户端：
//! 封装 OAuth2 令牌获取（JWT-bearer 断言）与表单页面、记录、
//! 选项列表、用户等资源的 CRUD 操作，返回表格化结果而非原始 JSON

pub mod http_client;
pub mod iform;
pub mod model;
pub mod table;

pub use iform::{IformClient, TokenManager};
pub use model::config::Config;
pub use table::DataTable;
