// ==========================================
// 餐厅菜单导入 - 报告日志文案
// ==========================================
// 职责: 生成写入 RunReport 的日志/错误行（纯函数）
// 约定: 前缀标记 [✓ SUCCESS] / [⚠ WARNING] / [X ERROR]，
//       缩进层级: 餐厅 0 格，菜单 2 格，菜品 4 格
// ==========================================

use serde_json::Value;

// ===== 汇总标题 =====

pub fn summarize_warnings_title() -> String {
    "\n--- Import completed with warnings: ---".to_string()
}

pub fn unknown_keys_title() -> String {
    "\n--- ⚠ Unknown keys found (consider adding them to the allowed key lists):".to_string()
}

pub fn unknown_key_item(key: &str) -> String {
    format!("  - {}", key)
}

// ===== 结构 =====

pub fn missing_root_key_error<K: AsRef<str>>(expected: &[K], found: &[String]) -> String {
    format!(
        "[X ERROR] Missing required root key: expected one of [{}], found [{}]",
        join_keys(expected),
        found.join(", ")
    )
}

pub fn invalid_restaurant_list_error(root_key: &str) -> String {
    format!(
        "[X ERROR] Root key '{}' must contain a list of restaurants",
        root_key
    )
}

// ===== 餐厅 =====

pub fn restaurant_success(name: &str) -> String {
    format!("[✓ SUCCESS] Restaurant '{}' imported", name)
}

pub fn restaurant_failed(name: &str, messages: &[String]) -> String {
    format!(
        "[X ERROR] Failed to create restaurant '{}': {}",
        name,
        to_sentence(messages)
    )
}

pub fn restaurant_exception(name: &str, err: &dyn std::fmt::Display) -> String {
    format!(
        "[X ERROR] Unexpected error creating restaurant '{}': {}",
        name, err
    )
}

// ===== 菜单 =====

pub fn menu_success(name: &str, restaurant: &str) -> String {
    format!("  [✓ SUCCESS] Menu '{}' added to '{}'", name, restaurant)
}

pub fn menu_exists_warning(name: &str, restaurant: &str) -> String {
    format!(
        "[⚠ WARNING] Menu '{}' already exists for restaurant '{}', skipping...",
        name, restaurant
    )
}

pub fn menu_failed(name: &str, restaurant: &str, messages: &[String]) -> String {
    format!(
        "  [X ERROR] Failed to create menu '{}' for restaurant '{}': {}",
        name,
        restaurant,
        to_sentence(messages)
    )
}

pub fn menu_exception(name: &str, restaurant: &str, err: &dyn std::fmt::Display) -> String {
    format!(
        "  [X ERROR] Unexpected error creating menu '{}' for restaurant '{}': {}",
        name, restaurant, err
    )
}

pub fn missing_items_key_error(menu: &str, restaurant: &str, available: &[String]) -> String {
    format!(
        "  [X ERROR] No valid items key found in menu '{}' of restaurant '{}' (available keys: {})",
        menu,
        restaurant,
        available.join(", ")
    )
}

// ===== 菜品 =====

pub fn menu_item_success(name: &str) -> String {
    format!("    [✓ SUCCESS] MenuItem '{}' added", name)
}

pub fn duplicate_item_warning(name: &str, new_name: &str) -> String {
    format!(
        "    [⚠ WARNING] Duplicate item '{}' renamed to '{}'",
        name, new_name
    )
}

pub fn menu_item_failed(name: &str, price: &str, messages: &[String]) -> String {
    format!(
        "    [X ERROR] Failed to create MenuItem '{}' (price: {}): {}",
        name,
        price,
        to_sentence(messages)
    )
}

pub fn menu_item_exception(name: &str, err: &dyn std::fmt::Display) -> String {
    format!(
        "    [X ERROR] Unexpected error creating MenuItem '{}': {}",
        name, err
    )
}

pub fn orphan_menu_item(name: &str) -> String {
    format!(
        "    [X ERROR] MenuItem '{}' could not be created: owning menu was missing",
        name
    )
}

// ===== 辅助 =====

/// 拼接为自然语言句子: "a" / "a and b" / "a, b, and c"
pub fn to_sentence(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// 名称展示（缺失时为空串）
pub fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("")
}

/// 原始值展示: 字符串不带引号，缺失/null 为空串
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn join_keys<K: AsRef<str>>(keys: &[K]) -> String {
    keys.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
