// ==========================================
// 餐厅菜单导入 - 菜单数据 Store Trait
// ==========================================
// 职责: 定义导入管道依赖的持久化能力（不包含实现）
// 红线: Store 不含导入规则，只做创建 / 存在性 / 列表
// ==========================================
// 约定:
// - 必填/数值/唯一性校验在 create_* 内完成，
//   以 Validated::Rejected(可读信息列表) 返回，不是错误
// - 只有非预期故障（I/O、SQL、锁）才返回 Err
// ==========================================

use crate::domain::{Menu, MenuEntry, MenuItem, NewMenu, NewMenuItem, NewRestaurant, Restaurant};
use crate::repository::error::RepositoryResult;

// ==========================================
// Validated - 带校验反馈的创建结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    /// 创建成功，返回落库后的记录
    Created(T),
    /// 校验未通过，返回全部校验信息
    Rejected(Vec<String>),
}

impl<T> Validated<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Validated::Created(_))
    }

    pub fn created(self) -> Option<T> {
        match self {
            Validated::Created(record) => Some(record),
            Validated::Rejected(_) => None,
        }
    }
}

// ==========================================
// MenuStore Trait
// ==========================================
// 实现者: SqliteMenuStore（使用 rusqlite）
pub trait MenuStore: Send + Sync {
    // ===== 创建 =====

    /// 创建餐厅
    fn create_restaurant(&self, attrs: &NewRestaurant) -> RepositoryResult<Validated<Restaurant>>;

    /// 在餐厅下创建菜单
    ///
    /// # 校验
    /// - 名称非空
    /// - 同餐厅内名称唯一（大小写不敏感）
    /// - 所属餐厅存在
    fn create_menu(&self, attrs: &NewMenu) -> RepositoryResult<Validated<Menu>>;

    /// 创建菜品（不关联菜单）
    ///
    /// # 校验
    /// - 名称非空，且全局唯一（大小写不敏感）
    /// - 价格必填、为数值、>= 0
    fn create_menu_item(&self, attrs: &NewMenuItem) -> RepositoryResult<Validated<MenuItem>>;

    /// 建立菜单与菜品的关联（MenuEntry）
    fn attach_item(&self, menu_id: i64, menu_item_id: i64) -> RepositoryResult<MenuEntry>;

    // ===== 存在性 =====

    /// 餐厅下是否已有同名菜单（精确匹配，区分大小写）
    fn menu_exists(&self, restaurant_id: i64, name: &str) -> RepositoryResult<bool>;

    /// 是否已有同名菜品（全局，大小写不敏感）
    fn menu_item_exists(&self, name: &str) -> RepositoryResult<bool>;

    // ===== 查询 =====

    fn find_menu_item_by_name(&self, name: &str) -> RepositoryResult<Option<MenuItem>>;

    fn list_restaurants(&self) -> RepositoryResult<Vec<Restaurant>>;

    /// 列出餐厅下的菜单（按创建顺序）
    fn list_menus(&self, restaurant_id: i64) -> RepositoryResult<Vec<Menu>>;

    /// 列出菜单下的菜品（经 menu_entry 关联）
    fn list_menu_items(&self, menu_id: i64) -> RepositoryResult<Vec<MenuItem>>;
}
