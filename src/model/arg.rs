use clap::{Parser, Subcommand};

/// iFormBuilder REST API 命令行客户端
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 凭证文件路径
    #[arg(long)]
    pub credentials: Option<String>,

    /// 子命令
    #[command(subcommand)]
    pub command: Command,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub enum Command {
    /// 获取访问令牌并打印（调试用）
    Token,

    /// 列出可访问的 Profile
    Profiles,

    /// 列出当前 Profile 下的所有表单页面
    Pages,

    /// 列出页面的元素（字段）定义
    Elements {
        /// 页面 ID
        #[arg(long)]
        page_id: u64,
    },

    /// 查询页面记录
    Records {
        /// 页面 ID
        #[arg(long)]
        page_id: u64,

        /// 返回的字段列表（逗号分隔）
        #[arg(long)]
        fields: Option<String>,

        /// 仅返回 ID 大于该值的记录（增量同步）
        #[arg(long)]
        since: Option<u64>,

        /// 拉取全部记录（分页循环）
        #[arg(long)]
        all: bool,

        /// 起始偏移（单页模式）
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// 单页条数上限（单页模式，最大 100）
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },

    /// 导出页面全部记录为 CSV 文件
    Export {
        /// 页面 ID
        #[arg(long)]
        page_id: u64,

        /// 返回的字段列表（逗号分隔）
        #[arg(long)]
        fields: Option<String>,

        /// 输出文件路径
        #[arg(short, long)]
        output: String,
    },

    /// 列出当前 Profile 下的选项列表
    Optionlists,

    /// 列出选项列表中的选项
    Options {
        /// 选项列表 ID
        #[arg(long)]
        list_id: u64,
    },

    /// 列出当前 Profile 下的用户
    Users,
}
