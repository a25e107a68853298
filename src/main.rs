// ==========================================
// 餐厅菜单导入 - 命令行入口
// ==========================================
// 用法: menu-importer <file.json> [db_path]
// 输出: stdout 打印导入结果 JSON，日志写 stderr
// 退出码: 0 = Success, 2 = Partially successful, 1 = Failed / 致命错误
// ==========================================

use menu_importer::app::{get_default_db_path, AppState};
use menu_importer::{logging, ImportStatus};

fn exit_code(status: ImportStatus) -> i32 {
    match status {
        ImportStatus::Success => 0,
        ImportStatus::PartiallySuccessful => 2,
        ImportStatus::Failed => 1,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", menu_importer::APP_NAME, menu_importer::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let file_path = args.next().unwrap_or_default();
    let db_path = args.next().unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let app_state = AppState::new(db_path)?;

    match app_state.import_api.import_file(&file_path).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            std::process::exit(exit_code(response.status));
        }
        Err(e) => {
            tracing::error!(http_status = e.http_status(), "导入失败: {}", e);
            println!("{}", serde_json::to_string_pretty(&e.to_body())?);
            std::process::exit(1);
        }
    }
}
