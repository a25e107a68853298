// ==========================================
// 餐厅菜单导入 - 核心库
// ==========================================
// 输入: 层级 JSON（餐厅 → 菜单 → 菜品）
// 输出: 落库的 餐厅 / 菜单 / 菜品 + 导入运行报告
// 技术栈: Rust + SQLite
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - JSON 文档
pub mod importer;

// 配置层 - 允许列表覆写
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 导入接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ImportStatus, RecordKind};

// 领域实体
pub use domain::{ImportRun, Menu, MenuEntry, MenuItem, Restaurant};

// 导入器
pub use importer::{KeyFinder, RestaurantImporter, RunReport};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "餐厅菜单导入";
