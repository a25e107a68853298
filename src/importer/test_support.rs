// 测试替身: 指定操作返回非预期故障，其余委托给真实 Store

use crate::domain::{Menu, MenuEntry, MenuItem, NewMenu, NewMenuItem, NewRestaurant, Restaurant};
use crate::repository::{MenuStore, RepositoryError, RepositoryResult, SqliteMenuStore, Validated};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    CreateRestaurant,
    CreateMenu,
    CreateMenuItem,
    AttachItem,
}

pub struct FailingStore {
    inner: SqliteMenuStore,
    fail_on: FailOn,
}

impl FailingStore {
    pub fn new(inner: SqliteMenuStore, fail_on: FailOn) -> Self {
        Self { inner, fail_on }
    }

    fn check(&self, op: FailOn) -> RepositoryResult<()> {
        if self.fail_on == op {
            Err(RepositoryError::DatabaseQueryError("disk I/O error".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MenuStore for FailingStore {
    fn create_restaurant(&self, attrs: &NewRestaurant) -> RepositoryResult<Validated<Restaurant>> {
        self.check(FailOn::CreateRestaurant)?;
        self.inner.create_restaurant(attrs)
    }

    fn create_menu(&self, attrs: &NewMenu) -> RepositoryResult<Validated<Menu>> {
        self.check(FailOn::CreateMenu)?;
        self.inner.create_menu(attrs)
    }

    fn create_menu_item(&self, attrs: &NewMenuItem) -> RepositoryResult<Validated<MenuItem>> {
        self.check(FailOn::CreateMenuItem)?;
        self.inner.create_menu_item(attrs)
    }

    fn attach_item(&self, menu_id: i64, menu_item_id: i64) -> RepositoryResult<MenuEntry> {
        self.check(FailOn::AttachItem)?;
        self.inner.attach_item(menu_id, menu_item_id)
    }

    fn menu_exists(&self, restaurant_id: i64, name: &str) -> RepositoryResult<bool> {
        self.inner.menu_exists(restaurant_id, name)
    }

    fn menu_item_exists(&self, name: &str) -> RepositoryResult<bool> {
        self.inner.menu_item_exists(name)
    }

    fn find_menu_item_by_name(&self, name: &str) -> RepositoryResult<Option<MenuItem>> {
        self.inner.find_menu_item_by_name(name)
    }

    fn list_restaurants(&self) -> RepositoryResult<Vec<Restaurant>> {
        self.inner.list_restaurants()
    }

    fn list_menus(&self, restaurant_id: i64) -> RepositoryResult<Vec<Menu>> {
        self.inner.list_menus(restaurant_id)
    }

    fn list_menu_items(&self, menu_id: i64) -> RepositoryResult<Vec<MenuItem>> {
        self.inner.list_menu_items(menu_id)
    }
}
