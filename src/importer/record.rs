// ==========================================
// 餐厅菜单导入 - 记录字段提取
// ==========================================
// 职责: 把未定类型的 JSON 记录转成类型化的取值（或缺失）
// 约定: 非对象记录一律视为“没有任何字段”，由校验环节报错
// ==========================================

use serde_json::{Map, Value};
use std::sync::OnceLock;

/// 记录的字段表；非对象返回空表
pub fn fields(value: &Value) -> &Map<String, Value> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    value
        .as_object()
        .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
}

/// 记录中出现的全部键
pub fn keys(record: &Map<String, Value>) -> Vec<String> {
    record.keys().cloned().collect()
}

/// 原始字段值
pub fn raw_field<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    fields(value).get(key)
}

/// 文本字段
///
/// # 规则
/// - 字符串原样返回
/// - 数值/布尔转为文本
/// - null / 数组 / 对象 → None
pub fn string_field(value: &Value, key: &str) -> Option<String> {
    match raw_field(value, key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 非数组值包装为单元素列表
pub fn wrap_in_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// 与 wrap_in_list 相同，但 null 视为空列表
pub fn list_or_empty(value: &Value) -> Vec<&Value> {
    match value {
        Value::Null => Vec::new(),
        other => wrap_in_list(other),
    }
}
