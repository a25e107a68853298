// ==========================================
// 餐厅菜单导入 - 餐厅领域模型
// ==========================================
// 职责: Restaurant 实体与创建参数（含字段校验）
// 约束: 删除餐厅级联删除其菜单（由 schema 外键保证）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 名称为空时的校验信息（餐厅/菜单/菜品共用）
pub const NAME_BLANK: &str = "Name can't be blank";

// ==========================================
// Restaurant - 餐厅
// ==========================================
// 对齐: restaurant 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,                   // 自增主键
    pub name: String,              // 名称（必填）
    pub created_at: DateTime<Utc>, // 创建时间
}

// ==========================================
// NewRestaurant - 餐厅创建参数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRestaurant {
    pub name: Option<String>,
}

impl NewRestaurant {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    /// 字段级校验（不含唯一性，唯一性由仓储层查询）
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(self.name.as_deref()) {
            errors.push(NAME_BLANK.to_string());
        }
        errors
    }
}

/// 空值/纯空白视为缺失
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            NewRestaurant::new(Some("   ".to_string())).validation_errors(),
            vec![NAME_BLANK.to_string()]
        );
        assert_eq!(NewRestaurant::new(None).validation_errors().len(), 1);
    }

    #[test]
    fn test_valid_name_accepted() {
        assert!(NewRestaurant::new(Some("Sushi Town".to_string()))
            .validation_errors()
            .is_empty());
    }
}
