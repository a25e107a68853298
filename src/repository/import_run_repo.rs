// ==========================================
// 餐厅菜单导入 - 导入运行记录 Repository
// ==========================================
// 职责: import_run 表的写入与查询
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::{ImportRun, ImportStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ImportRunRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ImportRunRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入导入运行记录
    pub fn insert(&self, run: &ImportRun) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO import_run (
                run_id, file_name, status, created_restaurants, created_menus,
                created_items, skipped_records, error_count, imported_at, report_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                run.run_id,
                run.file_name,
                run.status.label(),
                run.created_restaurants as i64,
                run.created_menus as i64,
                run.created_items as i64,
                run.skipped_records as i64,
                run.error_count as i64,
                run.imported_at,
                run.report_json,
            ],
        )?;
        Ok(())
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, run_id: &str) -> RepositoryResult<Option<ImportRun>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                &format!("{} WHERE run_id = ?1", SELECT_RUN),
                params![run_id],
                map_raw_run,
            )
            .optional()?;
        row.map(RawImportRun::into_domain).transpose()
    }

    /// 查询最近的导入记录（按导入时间倒序）
    pub fn recent(&self, limit: usize) -> RepositoryResult<Vec<ImportRun>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY imported_at DESC, rowid DESC LIMIT ?1",
            SELECT_RUN
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_raw_run)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawImportRun::into_domain).collect()
    }
}

const SELECT_RUN: &str = r#"
    SELECT run_id, file_name, status, created_restaurants, created_menus,
           created_items, skipped_records, error_count, imported_at, report_json
    FROM import_run
"#;

// status 以文本落库，读回时再解析
struct RawImportRun {
    run: ImportRun,
    status: String,
}

impl RawImportRun {
    fn into_domain(self) -> RepositoryResult<ImportRun> {
        let status = ImportStatus::from_label(&self.status).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("未知的导入状态: {}", self.status),
            }
        })?;
        Ok(ImportRun { status, ..self.run })
    }
}

fn map_raw_run(row: &Row<'_>) -> rusqlite::Result<RawImportRun> {
    Ok(RawImportRun {
        status: row.get(2)?,
        run: ImportRun {
            run_id: row.get(0)?,
            file_name: row.get(1)?,
            status: ImportStatus::Failed,
            created_restaurants: row.get::<_, i64>(3)? as usize,
            created_menus: row.get::<_, i64>(4)? as usize,
            created_items: row.get::<_, i64>(5)? as usize,
            skipped_records: row.get::<_, i64>(6)? as usize,
            error_count: row.get::<_, i64>(7)? as usize,
            imported_at: row.get(8)?,
            report_json: row.get(9)?,
        },
    })
}
