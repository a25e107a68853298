// ==========================================
// 餐厅菜单导入 - 应用层
// ==========================================
// 职责: 组装共享状态，连接命令行入口与 API
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
