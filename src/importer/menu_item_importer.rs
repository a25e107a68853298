// ==========================================
// 餐厅菜单导入 - 菜品导入器
// ==========================================
// 职责: 导入单条菜品记录并关联到所属菜单
// 规则:
// - 所属菜单缺失 → 记错误，跳过
// - 菜品名已存在（大小写不敏感）→ 重命名为 "<name> (duplicate xxxxxx)" 后创建
// - 校验失败 / 非预期故障 → 记错误，跳过；不会中断整次导入
// ==========================================

use crate::domain::{Menu, MenuItem, NewMenuItem, RecordKind};
use crate::domain::restaurant::is_blank;
use crate::importer::logs;
use crate::importer::record;
use crate::importer::run_report::RunReport;
use crate::importer::suffix::{duplicate_name, SuffixSource};
use crate::repository::{MenuStore, Validated};
use serde_json::Value;
use tracing::{debug, error, warn};

pub struct MenuItemImporter<'a> {
    store: &'a dyn MenuStore,
    suffix_source: &'a dyn SuffixSource,
}

impl<'a> MenuItemImporter<'a> {
    pub fn new(store: &'a dyn MenuStore, suffix_source: &'a dyn SuffixSource) -> Self {
        Self {
            store,
            suffix_source,
        }
    }

    /// 导入一条菜品记录
    ///
    /// # 参数
    /// - menu: 所属菜单（菜单创建失败时为 None）
    /// - data: 菜品记录
    /// - report: 本次运行的报告
    pub fn import(&self, menu: Option<&Menu>, data: &Value, report: &mut RunReport) {
        let name = record::string_field(data, "name");
        let shown_name = logs::display_name(name.as_deref()).to_string();

        let Some(menu) = menu else {
            warn!(item = %shown_name, "所属菜单缺失，跳过菜品");
            report.error(logs::orphan_menu_item(&shown_name));
            report.record_skipped(RecordKind::Items);
            return;
        };

        let attrs = NewMenuItem::new(name.clone(), record::raw_field(data, "price").cloned())
            .with_description(record::string_field(data, "description"));

        let exists = match name.as_deref() {
            Some(n) if !is_blank(Some(n)) => match self.store.menu_item_exists(n) {
                Ok(exists) => exists,
                Err(e) => {
                    error!(item = %shown_name, error = %e, "菜品查重失败");
                    report.error(logs::menu_item_exception(&shown_name, &e));
                    report.record_skipped(RecordKind::Items);
                    return;
                }
            },
            _ => false,
        };

        if exists {
            let new_name = duplicate_name(&shown_name, &self.suffix_source.next_suffix());
            let renamed = NewMenuItem {
                name: Some(new_name.clone()),
                ..attrs
            };
            if self.create_item(menu, &renamed, report).is_some() {
                report.record_created(RecordKind::DuplicatedItems);
                report.log(logs::duplicate_item_warning(&shown_name, &new_name));
            }
        } else if self.create_item(menu, &attrs, report).is_some() {
            report.record_created(RecordKind::Items);
            report.log(logs::menu_item_success(&shown_name));
        }
    }

    // 创建菜品并关联菜单；失败时已写入错误和跳过计数
    fn create_item(
        &self,
        menu: &Menu,
        attrs: &NewMenuItem,
        report: &mut RunReport,
    ) -> Option<MenuItem> {
        let shown_name = logs::display_name(attrs.name.as_deref()).to_string();

        match self.store.create_menu_item(attrs) {
            Ok(Validated::Created(item)) => match self.store.attach_item(menu.id, item.id) {
                Ok(_) => {
                    debug!(item = %item.name, menu_id = menu.id, "菜品已关联菜单");
                    Some(item)
                }
                Err(e) => {
                    error!(item = %item.name, menu_id = menu.id, error = %e, "菜品关联菜单失败");
                    report.error(logs::menu_item_exception(&shown_name, &e));
                    report.record_skipped(RecordKind::Items);
                    None
                }
            },
            Ok(Validated::Rejected(messages)) => {
                warn!(item = %shown_name, ?messages, "菜品校验失败");
                let price = logs::display_value(attrs.price.as_ref());
                report.error(logs::menu_item_failed(&shown_name, &price, &messages));
                report.record_skipped(RecordKind::Items);
                None
            }
            Err(e) => {
                error!(item = %shown_name, error = %e, "菜品创建异常");
                report.error(logs::menu_item_exception(&shown_name, &e));
                report.record_skipped(RecordKind::Items);
                None
            }
        }
    }
}
