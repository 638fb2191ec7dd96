//! 应用层数据模型
//!
//! 包含命令行参数和应用配置

pub mod arg;
pub mod config;

pub use arg::{Args, Command};
pub use config::Config;
