// ==========================================
// 餐厅菜单导入 - 数据仓储层
// ==========================================
// 红线: Repository 不含导入规则
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod import_run_repo;
pub mod menu_store;
pub mod menu_store_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use import_run_repo::ImportRunRepository;
pub use menu_store::{MenuStore, Validated};
pub use menu_store_impl::SqliteMenuStore;
