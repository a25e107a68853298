// ==========================================
// 餐厅菜单导入 - 菜单导入器
// ==========================================
// 职责: 在已创建的餐厅下导入一条菜单记录，再逐条导入其菜品
// 规则:
// - 同餐厅已有同名菜单 → 记错误并跳过（含其菜品）
// - 菜单校验失败 → 记错误，菜品仍逐条处理（会因菜单缺失被跳过）
// - 菜单创建非预期故障 → 记错误，不处理菜品
// - 菜品列表键由允许列表决定（items / dishes / pratos ...）
// ==========================================

use crate::domain::{Menu, NewMenu, RecordKind, Restaurant};
use crate::importer::key_finder::KeyFinder;
use crate::importer::logs;
use crate::importer::menu_item_importer::MenuItemImporter;
use crate::importer::record;
use crate::importer::run_report::RunReport;
use crate::importer::suffix::SuffixSource;
use crate::repository::{MenuStore, Validated};
use serde_json::Value;
use tracing::{debug, error, warn};

pub struct MenuImporter<'a> {
    store: &'a dyn MenuStore,
    item_importer: MenuItemImporter<'a>,
    item_keys: &'a [String],
}

impl<'a> MenuImporter<'a> {
    /// # 参数
    /// - store: 持久化
    /// - suffix_source: 重名菜品后缀来源
    /// - item_keys: 菜品列表键允许列表（按优先级）
    pub fn new(
        store: &'a dyn MenuStore,
        suffix_source: &'a dyn SuffixSource,
        item_keys: &'a [String],
    ) -> Self {
        Self {
            store,
            item_importer: MenuItemImporter::new(store, suffix_source),
            item_keys,
        }
    }

    /// 导入一条菜单记录
    pub fn import(
        &self,
        restaurant: &Restaurant,
        data: &Value,
        key_finder: &mut KeyFinder,
        report: &mut RunReport,
    ) {
        let name = record::string_field(data, "name");
        let shown_name = logs::display_name(name.as_deref()).to_string();

        if let Some(n) = name.as_deref() {
            match self.store.menu_exists(restaurant.id, n) {
                Ok(true) => {
                    warn!(menu = %n, restaurant = %restaurant.name, "菜单已存在，跳过");
                    report.error(logs::menu_exists_warning(n, &restaurant.name));
                    return;
                }
                Ok(false) => {}
                Err(e) => {
                    error!(menu = %n, error = %e, "菜单查重失败");
                    report.error(logs::menu_exception(n, &restaurant.name, &e));
                    return;
                }
            }
        }

        let attrs = NewMenu::new(
            restaurant.id,
            name.clone(),
            record::string_field(data, "description"),
        );

        let menu: Option<Menu> = match self.store.create_menu(&attrs) {
            Ok(Validated::Created(menu)) => {
                debug!(menu_id = menu.id, menu = %menu.name, "菜单已创建");
                report.record_created(RecordKind::Menus);
                report.log(logs::menu_success(&menu.name, &restaurant.name));
                Some(menu)
            }
            Ok(Validated::Rejected(messages)) => {
                warn!(menu = %shown_name, ?messages, "菜单校验失败");
                report.error(logs::menu_failed(&shown_name, &restaurant.name, &messages));
                report.record_skipped(RecordKind::Menus);
                None
            }
            Err(e) => {
                error!(menu = %shown_name, error = %e, "菜单创建异常");
                report.error(logs::menu_exception(&shown_name, &restaurant.name, &e));
                return;
            }
        };

        for item in self.extract_items(restaurant, &shown_name, data, key_finder, report) {
            self.item_importer.import(menu.as_ref(), item, report);
        }
    }

    // 按允许列表取菜品列表；找不到时记错误并登记未知键
    fn extract_items<'v>(
        &self,
        restaurant: &Restaurant,
        menu_name: &str,
        data: &'v Value,
        key_finder: &mut KeyFinder,
        report: &mut RunReport,
    ) -> Vec<&'v Value> {
        let fields = record::fields(data);

        // 只有找不到菜品键时，菜单上的其他键才算未知键
        match KeyFinder::locate(fields, self.item_keys) {
            Some(key) => fields.get(key).map(record::list_or_empty).unwrap_or_default(),
            None => {
                warn!(menu = %menu_name, restaurant = %restaurant.name, "未找到菜品列表键");
                report.error(logs::missing_items_key_error(
                    menu_name,
                    &restaurant.name,
                    &record::keys(fields),
                ));
                key_finder.note_unknown(fields, self.item_keys);
                Vec::new()
            }
        }
    }
}
