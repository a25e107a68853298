// ==========================================
// 餐厅菜单导入 - 导入运行记录
// ==========================================
// 用途: 记录每次导入的元信息，便于追溯
// 对齐: import_run 表
// ==========================================

use crate::domain::types::ImportStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRun {
    pub run_id: String,               // 运行 ID（UUID）
    pub file_name: Option<String>,    // 源文件名
    pub status: ImportStatus,         // 结果分级
    pub created_restaurants: usize,   // 创建的餐厅数
    pub created_menus: usize,         // 创建的菜单数
    pub created_items: usize,         // 创建的菜品数（含改名重复项）
    pub skipped_records: usize,       // 跳过的记录总数
    pub error_count: usize,           // 错误条数
    pub imported_at: DateTime<Utc>,   // 导入时间
    pub report_json: Option<String>,  // 完整报告 JSON
}
