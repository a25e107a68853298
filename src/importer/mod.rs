// ==========================================
// 餐厅菜单导入 - 导入层
// ==========================================
// 职责: JSON 文档 → 餐厅 / 菜单 / 菜品 记录
// 层级: RestaurantImporter → MenuImporter → MenuItemImporter
// 输出: RunReport（日志、错误、未知键、计数）
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod key_finder;
pub mod logs;
pub mod menu_importer;
pub mod menu_item_importer;
pub mod record;
pub mod restaurant_importer;
pub mod run_report;
pub mod suffix;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::JsonFileParser;
pub use key_finder::KeyFinder;
pub use menu_importer::MenuImporter;
pub use menu_item_importer::MenuItemImporter;
pub use restaurant_importer::RestaurantImporter;
pub use run_report::{RecordCounters, RunReport};
pub use suffix::{FixedSuffixSource, SuffixSource, UuidSuffixSource};
