// ==========================================
// 餐厅菜单导入 - 菜单领域模型
// ==========================================
// 职责: Menu 实体、MenuEntry 关联记录与菜单创建参数
// 约束:
// - 菜单名在同一餐厅内唯一（大小写不敏感）
// - 菜单与菜品为多对多，通过 menu_entry 关联
// - 删除菜单只删除关联，不删除菜品
// ==========================================

use crate::domain::restaurant::{is_blank, NAME_BLANK};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 同餐厅内菜单重名时的校验信息
pub const MENU_NAME_TAKEN: &str = "Name must be unique within the same restaurant";

/// 所属餐厅不存在时的校验信息
pub const RESTAURANT_MISSING: &str = "Restaurant must exist";

// ==========================================
// Menu - 菜单
// ==========================================
// 对齐: menu 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,          // 所属餐厅
    pub name: String,                // 名称（必填）
    pub description: Option<String>, // 描述（可选）
    pub created_at: DateTime<Utc>,
}

// ==========================================
// NewMenu - 菜单创建参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenu {
    pub restaurant_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NewMenu {
    pub fn new(restaurant_id: i64, name: Option<String>, description: Option<String>) -> Self {
        Self {
            restaurant_id,
            name,
            description,
        }
    }

    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(self.name.as_deref()) {
            errors.push(NAME_BLANK.to_string());
        }
        errors
    }
}

// ==========================================
// MenuEntry - 菜单与菜品的关联
// ==========================================
// 约束: (menu_id, menu_item_id) 唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: i64,
    pub menu_id: i64,
    pub menu_item_id: i64,
}
