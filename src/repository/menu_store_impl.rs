// ==========================================
// 餐厅菜单导入 - 菜单数据 Store 实现
// ==========================================
// 职责: 实现 MenuStore（使用 rusqlite）
// 红线: Store 不含导入规则，只做数据 CRUD + 字段校验反馈
// ==========================================

use crate::db::{ensure_schema, open_in_memory_connection, open_sqlite_connection};
use crate::domain::menu::{MENU_NAME_TAKEN, RESTAURANT_MISSING};
use crate::domain::menu_item::ITEM_NAME_TAKEN;
use crate::domain::{
    Menu, MenuEntry, MenuItem, NewMenu, NewMenuItem, NewRestaurant, PriceValue, Restaurant,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::menu_store::{MenuStore, Validated};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// 名称折叠键（唯一性比较用，Unicode 小写）
fn name_key(name: &str) -> String {
    name.to_lowercase()
}

// ==========================================
// SqliteMenuStore
// ==========================================
pub struct SqliteMenuStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMenuStore {
    /// 打开数据库文件并建表
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 内存数据库（测试用）
    pub fn open_in_memory() -> RepositoryResult<Self> {
        let conn = open_in_memory_connection()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（调用方负责 PRAGMA 与建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn restaurant_exists(conn: &Connection, restaurant_id: i64) -> RepositoryResult<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM restaurant WHERE id = ?1",
                params![restaurant_id],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn item_name_taken(conn: &Connection, name: &str) -> RepositoryResult<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM menu_item WHERE name_key = ?1 LIMIT 1",
                params![name_key(name)],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn map_restaurant(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
        Ok(Restaurant {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
        })
    }

    fn map_menu(row: &Row<'_>) -> rusqlite::Result<Menu> {
        Ok(Menu {
            id: row.get(0)?,
            restaurant_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn map_menu_item(row: &Row<'_>) -> rusqlite::Result<MenuItem> {
        Ok(MenuItem {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
            description: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl MenuStore for SqliteMenuStore {
    fn create_restaurant(&self, attrs: &NewRestaurant) -> RepositoryResult<Validated<Restaurant>> {
        let errors = attrs.validation_errors();
        let name = match attrs.name.as_deref() {
            Some(name) if errors.is_empty() => name,
            _ => return Ok(Validated::Rejected(errors)),
        };

        let conn = self.get_conn()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO restaurant (name, created_at) VALUES (?1, ?2)",
            params![name, created_at],
        )?;

        Ok(Validated::Created(Restaurant {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created_at,
        }))
    }

    fn create_menu(&self, attrs: &NewMenu) -> RepositoryResult<Validated<Menu>> {
        let conn = self.get_conn()?;

        let mut errors = attrs.validation_errors();
        if let Some(name) = attrs.name.as_deref().filter(|_| errors.is_empty()) {
            let taken = conn
                .query_row(
                    "SELECT 1 FROM menu WHERE restaurant_id = ?1 AND name_key = ?2 LIMIT 1",
                    params![attrs.restaurant_id, name_key(name)],
                    |_row| Ok(()),
                )
                .optional()?;
            if taken.is_some() {
                errors.push(MENU_NAME_TAKEN.to_string());
            }
        }
        if !Self::restaurant_exists(&conn, attrs.restaurant_id)? {
            errors.push(RESTAURANT_MISSING.to_string());
        }

        let name = match attrs.name.as_deref() {
            Some(name) if errors.is_empty() => name,
            _ => return Ok(Validated::Rejected(errors)),
        };

        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO menu (restaurant_id, name, name_key, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![attrs.restaurant_id, name, name_key(name), attrs.description, created_at],
        )?;

        Ok(Validated::Created(Menu {
            id: conn.last_insert_rowid(),
            restaurant_id: attrs.restaurant_id,
            name: name.to_string(),
            description: attrs.description.clone(),
            created_at,
        }))
    }

    fn create_menu_item(&self, attrs: &NewMenuItem) -> RepositoryResult<Validated<MenuItem>> {
        let conn = self.get_conn()?;

        let mut errors = attrs.validation_errors();
        if let Some(name) = attrs.name.as_deref().filter(|n| !n.trim().is_empty()) {
            if Self::item_name_taken(&conn, name)? {
                errors.push(ITEM_NAME_TAKEN.to_string());
            }
        }

        let (name, price) = match (attrs.name.as_deref(), attrs.parsed_price()) {
            (Some(name), PriceValue::Number(price)) if errors.is_empty() => (name, price),
            _ => return Ok(Validated::Rejected(errors)),
        };

        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO menu_item (name, name_key, price, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, name_key(name), price, attrs.description, created_at],
        )?;

        Ok(Validated::Created(MenuItem {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            price,
            description: attrs.description.clone(),
            created_at,
        }))
    }

    fn attach_item(&self, menu_id: i64, menu_item_id: i64) -> RepositoryResult<MenuEntry> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO menu_entry (menu_id, menu_item_id) VALUES (?1, ?2)",
            params![menu_id, menu_item_id],
        )?;

        Ok(MenuEntry {
            id: conn.last_insert_rowid(),
            menu_id,
            menu_item_id,
        })
    }

    fn menu_exists(&self, restaurant_id: i64, name: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        // 精确匹配 name，唯一性则按 name_key 比较
        let found = conn
            .query_row(
                "SELECT 1 FROM menu WHERE restaurant_id = ?1 AND name = ?2 LIMIT 1",
                params![restaurant_id, name],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn menu_item_exists(&self, name: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        Self::item_name_taken(&conn, name)
    }

    fn find_menu_item_by_name(&self, name: &str) -> RepositoryResult<Option<MenuItem>> {
        let conn = self.get_conn()?;
        let item = conn
            .query_row(
                "SELECT id, name, price, description, created_at FROM menu_item
                 WHERE name_key = ?1 LIMIT 1",
                params![name_key(name)],
                Self::map_menu_item,
            )
            .optional()?;
        Ok(item)
    }

    fn list_restaurants(&self) -> RepositoryResult<Vec<Restaurant>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM restaurant ORDER BY id")?;
        let rows = stmt
            .query_map([], Self::map_restaurant)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn list_menus(&self, restaurant_id: i64) -> RepositoryResult<Vec<Menu>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, restaurant_id, name, description, created_at FROM menu
             WHERE restaurant_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![restaurant_id], Self::map_menu)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn list_menu_items(&self, menu_id: i64) -> RepositoryResult<Vec<MenuItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT i.id, i.name, i.price, i.description, i.created_at
            FROM menu_item i
            JOIN menu_entry e ON e.menu_item_id = i.id
            WHERE e.menu_id = ?1
            ORDER BY e.id
            "#,
        )?;
        let rows = stmt
            .query_map(params![menu_id], Self::map_menu_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu_item::{PRICE_NEGATIVE, PRICE_NOT_A_NUMBER};
    use crate::domain::restaurant::NAME_BLANK;
    use serde_json::json;

    fn store_with_restaurant() -> (SqliteMenuStore, Restaurant) {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        let restaurant = store
            .create_restaurant(&NewRestaurant::new(Some("Burger Heaven".to_string())))
            .unwrap()
            .created()
            .unwrap();
        (store, restaurant)
    }

    #[test]
    fn test_create_restaurant_rejects_blank_name() {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        let result = store
            .create_restaurant(&NewRestaurant::new(Some(String::new())))
            .unwrap();
        assert_eq!(result, Validated::Rejected(vec![NAME_BLANK.to_string()]));
        assert!(store.list_restaurants().unwrap().is_empty());
    }

    #[test]
    fn test_menu_name_unique_case_insensitively_per_restaurant() {
        let (store, restaurant) = store_with_restaurant();
        let lunch = NewMenu::new(restaurant.id, Some("Lunch".to_string()), None);
        assert!(store.create_menu(&lunch).unwrap().is_created());

        let shouting = NewMenu::new(restaurant.id, Some("LUNCH".to_string()), None);
        assert_eq!(
            store.create_menu(&shouting).unwrap(),
            Validated::Rejected(vec![MENU_NAME_TAKEN.to_string()])
        );

        // 其他餐厅可以同名
        let other = store
            .create_restaurant(&NewRestaurant::new(Some("Other".to_string())))
            .unwrap()
            .created()
            .unwrap();
        let same_name = NewMenu::new(other.id, Some("Lunch".to_string()), None);
        assert!(store.create_menu(&same_name).unwrap().is_created());
    }

    #[test]
    fn test_menu_exists_is_case_sensitive() {
        let (store, restaurant) = store_with_restaurant();
        let lunch = NewMenu::new(restaurant.id, Some("Lunch".to_string()), None);
        store.create_menu(&lunch).unwrap();

        assert!(store.menu_exists(restaurant.id, "Lunch").unwrap());
        assert!(!store.menu_exists(restaurant.id, "lunch").unwrap());
    }

    #[test]
    fn test_create_menu_for_missing_restaurant_is_rejected() {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        let menu = NewMenu::new(42, Some("Ghost".to_string()), None);
        assert_eq!(
            store.create_menu(&menu).unwrap(),
            Validated::Rejected(vec![RESTAURANT_MISSING.to_string()])
        );
    }

    #[test]
    fn test_menu_item_name_unique_globally() {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        let soup = NewMenuItem::new(Some("Soup".to_string()), Some(json!(4.5)));
        assert!(store.create_menu_item(&soup).unwrap().is_created());

        assert!(store.menu_item_exists("SOUP").unwrap());
        let again = NewMenuItem::new(Some("soup".to_string()), Some(json!(5)));
        assert_eq!(
            store.create_menu_item(&again).unwrap(),
            Validated::Rejected(vec![ITEM_NAME_TAKEN.to_string()])
        );
    }

    #[test]
    fn test_accented_names_fold_case() {
        let (store, restaurant) = store_with_restaurant();
        let almoco = NewMenu::new(restaurant.id, Some("Almoço".to_string()), None);
        assert!(store.create_menu(&almoco).unwrap().is_created());
        let shouting = NewMenu::new(restaurant.id, Some("ALMOÇO".to_string()), None);
        assert_eq!(
            store.create_menu(&shouting).unwrap(),
            Validated::Rejected(vec![MENU_NAME_TAKEN.to_string()])
        );
        assert!(!store.menu_exists(restaurant.id, "ALMOÇO").unwrap());

        let creme = NewMenuItem::new(Some("Crème brûlée".to_string()), Some(json!(5)));
        let created = store.create_menu_item(&creme).unwrap().created().unwrap();
        assert!(store.menu_item_exists("CRÈME BRÛLÉE").unwrap());
        assert_eq!(
            store.find_menu_item_by_name("crème BRÛLÉE").unwrap(),
            Some(created)
        );
        let again = NewMenuItem::new(Some("CRÈME BRÛLÉE".to_string()), Some(json!(6)));
        assert_eq!(
            store.create_menu_item(&again).unwrap(),
            Validated::Rejected(vec![ITEM_NAME_TAKEN.to_string()])
        );
    }

    #[test]
    fn test_menu_item_price_validation() {
        let store = SqliteMenuStore::open_in_memory().unwrap();
        let negative = NewMenuItem::new(Some("Soup".to_string()), Some(json!(-1)));
        assert_eq!(
            store.create_menu_item(&negative).unwrap(),
            Validated::Rejected(vec![PRICE_NEGATIVE.to_string()])
        );

        let text = NewMenuItem::new(Some("Soup".to_string()), Some(json!("free")));
        assert_eq!(
            store.create_menu_item(&text).unwrap(),
            Validated::Rejected(vec![PRICE_NOT_A_NUMBER.to_string()])
        );
    }

    #[test]
    fn test_item_shared_between_menus() {
        let (store, restaurant) = store_with_restaurant();
        let lunch = store
            .create_menu(&NewMenu::new(restaurant.id, Some("Lunch".to_string()), None))
            .unwrap()
            .created()
            .unwrap();
        let dinner = store
            .create_menu(&NewMenu::new(restaurant.id, Some("Dinner".to_string()), None))
            .unwrap()
            .created()
            .unwrap();
        let fries = store
            .create_menu_item(&NewMenuItem::new(Some("Fries".to_string()), Some(json!(3))))
            .unwrap()
            .created()
            .unwrap();

        store.attach_item(lunch.id, fries.id).unwrap();
        store.attach_item(dinner.id, fries.id).unwrap();

        assert_eq!(store.list_menu_items(lunch.id).unwrap(), vec![fries.clone()]);
        assert_eq!(store.list_menu_items(dinner.id).unwrap(), vec![fries]);
    }

    #[test]
    fn test_attach_same_pair_twice_fails() {
        let (store, restaurant) = store_with_restaurant();
        let lunch = store
            .create_menu(&NewMenu::new(restaurant.id, Some("Lunch".to_string()), None))
            .unwrap()
            .created()
            .unwrap();
        let fries = store
            .create_menu_item(&NewMenuItem::new(Some("Fries".to_string()), Some(json!(3))))
            .unwrap()
            .created()
            .unwrap();

        store.attach_item(lunch.id, fries.id).unwrap();
        let err = store.attach_item(lunch.id, fries.id).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }
}
