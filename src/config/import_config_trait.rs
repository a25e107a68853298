// ==========================================
// 餐厅菜单导入 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含导入逻辑
// ==========================================

use crate::repository::error::RepositoryResult;
use serde::{Deserialize, Serialize};

// ===== 默认允许列表（顺序即优先级）=====

pub const DEFAULT_ROOT_KEYS: &[&str] = &["restaurants"];
pub const DEFAULT_MENU_KEYS: &[&str] = &["menus"];
pub const DEFAULT_ITEM_KEYS: &[&str] = &["menu_items", "items", "dishes", "pratos", "plats"];

// ==========================================
// ImportKeys - 三级允许列表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportKeys {
    pub root_keys: Vec<String>,
    pub menu_keys: Vec<String>,
    pub item_keys: Vec<String>,
}

impl Default for ImportKeys {
    fn default() -> Self {
        Self {
            root_keys: to_owned(DEFAULT_ROOT_KEYS),
            menu_keys: to_owned(DEFAULT_MENU_KEYS),
            item_keys: to_owned(DEFAULT_ITEM_KEYS),
        }
    }
}

pub(crate) fn to_owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ImportConfigReader: Send + Sync {
    /// 根键允许列表
    ///
    /// # 默认值
    /// - ["restaurants"]
    fn get_root_keys(&self) -> RepositoryResult<Vec<String>>;

    /// 餐厅下菜单列表键允许列表
    ///
    /// # 默认值
    /// - ["menus"]
    fn get_menu_keys(&self) -> RepositoryResult<Vec<String>>;

    /// 菜单下菜品列表键允许列表
    ///
    /// # 默认值
    /// - ["menu_items", "items", "dishes", "pratos", "plats"]
    fn get_item_keys(&self) -> RepositoryResult<Vec<String>>;

    /// 一次读取全部允许列表
    fn get_import_keys(&self) -> RepositoryResult<ImportKeys> {
        Ok(ImportKeys {
            root_keys: self.get_root_keys()?,
            menu_keys: self.get_menu_keys()?,
            item_keys: self.get_item_keys()?,
        })
    }
}
