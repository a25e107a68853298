// ==========================================
// 餐厅菜单导入 - 键发现（允许列表）
// ==========================================
// 职责: 在记录中按允许列表顺序查找第一个出现的键，
//       并累积本次运行中见到的未识别键
// 约束:
// - 允许列表的顺序即优先级（先匹配先得，不是字典序）
// - 不修改输入记录
// - 实例随一次导入运行创建，不做进程级共享
// ==========================================

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// 普通标量字段：不参与键发现，也不算作未知键
pub const PLAIN_FIELDS: &[&str] = &["name", "description", "price"];

#[derive(Debug, Clone, Default)]
pub struct KeyFinder {
    unknown_keys: BTreeSet<String>,
}

impl KeyFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查找第一个出现的允许键，并登记未知键
    ///
    /// # 参数
    /// - record: 待检查记录
    /// - allowed: 允许列表（按优先级排序）
    ///
    /// # 返回
    /// - Some(key): 允许列表中第一个在记录里出现的键
    /// - None: 记录中没有任何允许键
    ///
    /// # 副作用
    /// 记录中不在允许列表（也不是普通字段）的键计入 unknown_keys（去重）
    pub fn find<'k, K: AsRef<str>>(
        &mut self,
        record: &Map<String, Value>,
        allowed: &'k [K],
    ) -> Option<&'k str> {
        self.note_unknown(record, allowed);
        Self::locate(record, allowed)
    }

    /// 只查找，不登记未知键
    pub fn locate<'k, K: AsRef<str>>(
        record: &Map<String, Value>,
        allowed: &'k [K],
    ) -> Option<&'k str> {
        allowed
            .iter()
            .map(AsRef::as_ref)
            .find(|key| record.contains_key(*key))
    }

    /// 登记记录中未被识别的键（不在允许列表，也不是普通字段）
    pub fn note_unknown<K: AsRef<str>>(&mut self, record: &Map<String, Value>, allowed: &[K]) {
        let unknown = record
            .keys()
            .filter(|key| !allowed.iter().any(|a| a.as_ref() == key.as_str()))
            .filter(|key| !PLAIN_FIELDS.contains(&key.as_str()))
            .cloned();
        self.unknown_keys.extend(unknown);
    }

    /// 本次运行累积的未知键（字典序）
    pub fn unknown_keys(&self) -> &BTreeSet<String> {
        &self.unknown_keys
    }

    /// 运行结束时取出未知键
    pub fn into_unknown_keys(self) -> BTreeSet<String> {
        self.unknown_keys
    }
}
