// ==========================================
// 餐厅菜单导入 - 重名菜品后缀
// ==========================================
// 职责: 为重名菜品生成 "(duplicate xxxxxx)" 后缀
// 说明: 后缀来源可注入，测试中使用固定后缀保证可复现
// ==========================================

use std::sync::Arc;
use uuid::Uuid;

/// 后缀长度（十六进制字符）
pub const SUFFIX_LEN: usize = 6;

/// 重名后缀来源
pub trait SuffixSource: Send + Sync {
    fn next_suffix(&self) -> String;
}

/// 默认实现: UUID v4 的前 6 位十六进制
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSuffixSource;

impl SuffixSource for UuidSuffixSource {
    fn next_suffix(&self) -> String {
        let simple = Uuid::new_v4().simple().to_string();
        simple[..SUFFIX_LEN].to_string()
    }
}

/// 固定后缀（测试用）
#[derive(Debug, Clone)]
pub struct FixedSuffixSource(String);

impl FixedSuffixSource {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }
}

impl SuffixSource for FixedSuffixSource {
    fn next_suffix(&self) -> String {
        self.0.clone()
    }
}

impl<T: SuffixSource + ?Sized> SuffixSource for Arc<T> {
    fn next_suffix(&self) -> String {
        (**self).next_suffix()
    }
}

/// 重名菜品的新名称
pub fn duplicate_name(name: &str, suffix: &str) -> String {
    format!("{} (duplicate {})", name, suffix)
}
