//! 命令行入口
//!
//! 加载配置与凭证，构建客户端并分发子命令

use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use iform_rs::iform::model::{IformCredentials, RecordQuery};
use iform_rs::iform::IformClient;
use iform_rs::model::{Args, Command, Config};
use iform_rs::table::DataTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志（RUST_LOG 控制级别，默认 info）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = Config::load(&config_path)?;
    config.override_from_env();

    let credentials_path = args
        .credentials
        .clone()
        .unwrap_or_else(|| IformCredentials::default_credentials_path().to_string());
    let credentials = IformCredentials::load_with_env_fallback(&credentials_path)?;

    let client = IformClient::new(config, credentials)?;

    match args.command {
        Command::Token => {
            let token = client.access_token().await?;
            println!("{}", token);
        }
        Command::Profiles => {
            let profiles = client.list_profiles().await?;
            print_typed(&profiles, "id,name,kind,created_date")?;
        }
        Command::Pages => {
            let pages = client.list_pages().await?;
            print_typed(&pages, "id,name,label,created_date")?;
        }
        Command::Elements { page_id } => {
            let elements = client.list_page_elements(page_id).await?;
            print_typed(&elements, "id,name,label,data_type,sort_order,option_list_id")?;
        }
        Command::Records {
            page_id,
            fields,
            since,
            all,
            offset,
            limit,
        } => {
            let records = if let Some(since) = since {
                client.records_since(page_id, since, fields.as_deref()).await?
            } else if all {
                client.all_records(page_id, fields.as_deref()).await?
            } else {
                let mut query = RecordQuery::new().with_offset(offset).with_limit(limit);
                if let Some(ref fields) = fields {
                    query = query.with_fields(fields.clone());
                }
                client.list_records(page_id, &query).await?
            };

            let table = DataTable::from_records(&records, fields.as_deref());
            print_table(&table);
            println!("({} 条记录)", table.len());
        }
        Command::Export {
            page_id,
            fields,
            output,
        } => {
            let records = client.all_records(page_id, fields.as_deref()).await?;
            let table = DataTable::from_records(&records, fields.as_deref());
            let file = std::fs::File::create(&output)?;
            table.write_csv(file)?;
            println!("已导出 {} 条记录到 {}", table.len(), output);
        }
        Command::Optionlists => {
            let lists = client.list_option_lists().await?;
            print_typed(&lists, "id,name,created_date")?;
        }
        Command::Options { list_id } => {
            let options = client.list_options(list_id).await?;
            print_typed(&options, "id,key_value,label,sort_order,condition_value")?;
        }
        Command::Users => {
            let users = client.list_users().await?;
            print_typed(&users, "id,username,email,first_name,last_name,role")?;
        }
    }

    Ok(())
}

/// 把类型化列表整形为表格后打印
fn print_typed<T: Serialize>(items: &[T], columns: &str) -> anyhow::Result<()> {
    let values = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    let table = DataTable::from_records(&values, Some(columns));
    print_table(&table);
    Ok(())
}

/// 打印表格到终端
fn print_table(table: &DataTable) {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL);
    out.set_header(table.columns());
    for row in table.rows() {
        out.add_row(row.iter().map(|cell| cell.render()));
    }
    println!("{out}");
}
