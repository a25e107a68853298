// ==========================================
// 餐厅菜单导入 - 领域类型定义
// ==========================================
// 职责: 记录类别（计数维度）与导入结果分级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 记录类别 (Record Kind)
// ==========================================
// 用途: created_records / skipped_records 的计数键
// 序列化格式: snake_case（与响应 JSON 一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Restaurants,     // 餐厅
    Menus,           // 菜单
    Items,           // 菜品
    DuplicatedItems, // 重名后改名创建的菜品
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Restaurants => "restaurants",
            RecordKind::Menus => "menus",
            RecordKind::Items => "items",
            RecordKind::DuplicatedItems => "duplicated_items",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 导入结果分级 (Import Status)
// ==========================================
// 规则:
// - 没有创建任何餐厅 → Failed (400)
// - 至少一个餐厅 且 errors 非空 → PartiallySuccessful (207)
// - 至少一个餐厅 且 errors 为空 → Success (200)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStatus {
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "Partially successful")]
    PartiallySuccessful,
    #[serde(rename = "Failed")]
    Failed,
}

impl ImportStatus {
    /// 响应中的状态文本
    pub fn label(&self) -> &'static str {
        match self {
            ImportStatus::Success => "Success",
            ImportStatus::PartiallySuccessful => "Partially successful",
            ImportStatus::Failed => "Failed",
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            ImportStatus::Success => 200,
            ImportStatus::PartiallySuccessful => 207,
            ImportStatus::Failed => 400,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Success" => Some(ImportStatus::Success),
            "Partially successful" => Some(ImportStatus::PartiallySuccessful),
            "Failed" => Some(ImportStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
