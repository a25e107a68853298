// ==========================================
// 餐厅菜单导入 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::{
    to_owned, ImportConfigReader, DEFAULT_ITEM_KEYS, DEFAULT_MENU_KEYS, DEFAULT_ROOT_KEYS,
};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

/// 配置键
pub mod config_keys {
    pub const ROOT_KEYS: &str = "import/root_keys";
    pub const MENU_KEYS: &str = "import/menu_keys";
    pub const ITEM_KEYS: &str = "import/item_keys";
}

/// 当前只有全局作用域
pub const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
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

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 读取 JSON 数组形式的键列表，缺失或格式错误时回退默认值
    fn get_key_list(&self, key: &str, default: &[&str]) -> RepositoryResult<Vec<String>> {
        let Some(raw) = self.get_global_config_value(key)? else {
            return Ok(to_owned(default));
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keys) if !keys.is_empty() => Ok(keys),
            _ => {
                warn!(config_key = key, raw_value = %raw, "键列表配置格式错误，使用默认值");
                Ok(to_owned(default))
            }
        }
    }
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
impl ImportConfigReader for ConfigManager {
    fn get_root_keys(&self) -> RepositoryResult<Vec<String>> {
        self.get_key_list(config_keys::ROOT_KEYS, DEFAULT_ROOT_KEYS)
    }

    fn get_menu_keys(&self) -> RepositoryResult<Vec<String>> {
        self.get_key_list(config_keys::MENU_KEYS, DEFAULT_MENU_KEYS)
    }

    fn get_item_keys(&self) -> RepositoryResult<Vec<String>> {
        self.get_key_list(config_keys::ITEM_KEYS, DEFAULT_ITEM_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportKeys;
    use crate::db::open_in_memory_connection;

    fn manager() -> ConfigManager {
        let conn = open_in_memory_connection().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = manager();
        assert_eq!(config.get_import_keys().unwrap(), ImportKeys::default());
    }

    #[test]
    fn test_override_item_keys() {
        let config = manager();
        config
            .set_global_config_value(config_keys::ITEM_KEYS, r#"["courses", "items"]"#)
            .unwrap();

        assert_eq!(
            config.get_item_keys().unwrap(),
            vec!["courses".to_string(), "items".to_string()]
        );
        assert_eq!(config.get_root_keys().unwrap(), vec!["restaurants".to_string()]);
    }

    #[test]
    fn test_malformed_override_falls_back() {
        let config = manager();
        config
            .set_global_config_value(config_keys::MENU_KEYS, "menus,cartes")
            .unwrap();
        assert_eq!(config.get_menu_keys().unwrap(), vec!["menus".to_string()]);
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let config = manager();
        config.set_global_config_value("k", "1").unwrap();
        config.set_global_config_value("k", "2").unwrap();
        assert_eq!(
            config.get_global_config_value("k").unwrap(),
            Some("2".to_string())
        );
    }
}
