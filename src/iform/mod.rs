//! iForm 平台客户端模块
//!
//! 提供令牌管理、请求封装和各资源的操作：
//! - `token_manager`: 访问令牌缓存与重新获取
//! - `client`: 请求头构建、状态检查、分页聚合
//! - `model`: 平台数据类型定义
//! - 各资源操作按文件拆分（profiles / pages / records / optionlists / users）

pub mod client;
pub mod client_id;
pub mod model;
pub mod token_manager;

mod optionlists;
mod pages;
mod profiles;
mod records;
mod users;

pub use client::IformClient;
pub use token_manager::TokenManager;
