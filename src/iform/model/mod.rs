//! iForm 数据模型
//!
//! 包含平台 API 的所有数据类型定义：
//! - `credentials`: OAuth 客户端凭证
//! - `token`: 令牌端点请求/响应
//! - `profile`: Profile（工作区）
//! - `page`: 表单页面与页面元素
//! - `record`: 记录查询参数与响应
//! - `optionlist`: 选项列表与选项元素
//! - `user`: 用户

pub mod credentials;
pub mod optionlist;
pub mod page;
pub mod profile;
pub mod record;
pub mod token;
pub mod user;

pub use credentials::IformCredentials;
pub use optionlist::{NewOptionList, OptionElement, OptionList};
pub use page::{NewPage, Page, PageElement};
pub use profile::Profile;
pub use record::{max_record_id, CreatedId, DeletedCount, RecordQuery, PAGE_LIMIT};
pub use token::{AssertionClaims, TokenResponse, JWT_BEARER_GRANT};
pub use user::User;
