// ==========================================
// 餐厅菜单导入 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod import_run;
pub mod menu;
pub mod menu_item;
pub mod restaurant;
pub mod types;

// 重导出核心类型
pub use import_run::ImportRun;
pub use menu::{Menu, MenuEntry, NewMenu};
pub use menu_item::{MenuItem, NewMenuItem, PriceValue};
pub use restaurant::{NewRestaurant, Restaurant};
pub use types::{ImportStatus, RecordKind};
