// ==========================================
// 餐厅菜单导入 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ImportApi};
use crate::config::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "MENU_IMPORTER_DB_PATH";

/// 应用状态
///
/// 包含API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 配置管理器（允许列表覆写）
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 启动时建表（幂等），之后各 API 按需打开自己的连接
    pub fn new(db_path: String) -> Result<Self, ApiError> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("无法打开数据库: {}", e)))?;
        ensure_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        match read_schema_version(&conn) {
            Ok(version) => tracing::debug!(?version, "数据库 schema 版本"),
            Err(e) => tracing::warn!("读取 schema 版本失败(将继续启动): {}", e),
        }

        let config_manager = Arc::new(ConfigManager::from_connection(Arc::new(Mutex::new(conn)))?);
        let import_api = Arc::new(ImportApi::new(db_path.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            import_api,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// 顺序: 环境变量 MENU_IMPORTER_DB_PATH → 用户数据目录 → ./menu_importer.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./menu_importer.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("menu-importer");

        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("menu_importer.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_creates_schema() {
        let file = NamedTempFile::new().unwrap();
        let db_path = file.path().to_str().unwrap().to_string();

        let state = AppState::new(db_path.clone()).unwrap();

        assert_eq!(state.db_path, db_path);
        assert!(state.import_api.recent_runs(5).unwrap().is_empty());
    }
}
