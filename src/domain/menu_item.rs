// ==========================================
// 餐厅菜单导入 - 菜品领域模型
// ==========================================
// 职责: MenuItem 实体与菜品创建参数（含价格解析与校验）
// 约束:
// - 菜品名全局唯一（大小写不敏感），不限于某个菜单
// - 价格必填，必须为数值且 >= 0
// - 菜品可暂时不属于任何菜单
// ==========================================

use crate::domain::restaurant::{is_blank, NAME_BLANK};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PRICE_BLANK: &str = "Price can't be blank";
pub const PRICE_NOT_A_NUMBER: &str = "Price is not a number";
pub const PRICE_NEGATIVE: &str = "Price must be greater than or equal to 0";
pub const ITEM_NAME_TAKEN: &str = "Name has already been taken";

// ==========================================
// MenuItem - 菜品
// ==========================================
// 对齐: menu_item 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// NewMenuItem - 菜品创建参数
// ==========================================
// price 保留原始 JSON 值，校验时再解析
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMenuItem {
    pub name: Option<String>,
    pub price: Option<Value>,
    pub description: Option<String>,
}

/// 价格解析结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceValue {
    Blank,
    NotANumber,
    Number(f64),
}

impl NewMenuItem {
    pub fn new(name: Option<String>, price: Option<Value>) -> Self {
        Self {
            name,
            price,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// 解析价格
    ///
    /// # 规则
    /// - 缺失 / null / 空白字符串 → Blank
    /// - JSON 数值 → Number
    /// - 可解析为有限数值的字符串 → Number
    /// - 其他 → NotANumber
    pub fn parsed_price(&self) -> PriceValue {
        match &self.price {
            None | Some(Value::Null) => PriceValue::Blank,
            Some(Value::Number(n)) => n.as_f64().map_or(PriceValue::NotANumber, PriceValue::Number),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return PriceValue::Blank;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => PriceValue::Number(v),
                    _ => PriceValue::NotANumber,
                }
            }
            Some(_) => PriceValue::NotANumber,
        }
    }

    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(self.name.as_deref()) {
            errors.push(NAME_BLANK.to_string());
        }
        match self.parsed_price() {
            PriceValue::Blank => {
                errors.push(PRICE_BLANK.to_string());
                errors.push(PRICE_NOT_A_NUMBER.to_string());
            }
            PriceValue::NotANumber => errors.push(PRICE_NOT_A_NUMBER.to_string()),
            PriceValue::Number(v) if v < 0.0 => errors.push(PRICE_NEGATIVE.to_string()),
            PriceValue::Number(_) => {}
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_parsing() {
        assert_eq!(
            NewMenuItem::new(None, Some(json!(12.5))).parsed_price(),
            PriceValue::Number(12.5)
        );
        assert_eq!(
            NewMenuItem::new(None, Some(json!(" 7 "))).parsed_price(),
            PriceValue::Number(7.0)
        );
        assert_eq!(
            NewMenuItem::new(None, Some(json!("cheap"))).parsed_price(),
            PriceValue::NotANumber
        );
        assert_eq!(
            NewMenuItem::new(None, Some(json!("NaN"))).parsed_price(),
            PriceValue::NotANumber
        );
        assert_eq!(NewMenuItem::new(None, None).parsed_price(), PriceValue::Blank);
    }

    #[test]
    fn test_negative_price_rejected() {
        let item = NewMenuItem::new(Some("Soup".to_string()), Some(json!(-1)));
        assert_eq!(item.validation_errors(), vec![PRICE_NEGATIVE.to_string()]);
    }

    #[test]
    fn test_missing_price_reports_blank_and_not_a_number() {
        let item = NewMenuItem::new(Some("Fries".to_string()), None);
        assert_eq!(
            item.validation_errors(),
            vec![PRICE_BLANK.to_string(), PRICE_NOT_A_NUMBER.to_string()]
        );
    }

    #[test]
    fn test_zero_price_accepted() {
        let item = NewMenuItem::new(Some("Water".to_string()), Some(json!(0)));
        assert!(item.validation_errors().is_empty());
    }
}
