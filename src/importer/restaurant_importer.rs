// ==========================================
// 餐厅菜单导入 - 餐厅导入器（顶层入口）
// ==========================================
// 职责: 编排一次完整导入运行
// 流程: 根键发现 → 逐条餐厅 → 菜单 → 菜品 → 汇总日志
// 约束:
// - 一次运行一个 RunReport / 一个 KeyFinder，显式向下传递
// - 除根键缺失外，任何单条记录的失败都不会中断整次运行
// - 每条记录的写入相互独立，不包裹整体事务
// ==========================================

use crate::config::ImportKeys;
use crate::domain::{NewRestaurant, RecordKind, Restaurant};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::JsonFileParser;
use crate::importer::key_finder::KeyFinder;
use crate::importer::logs;
use crate::importer::menu_importer::MenuImporter;
use crate::importer::record;
use crate::importer::run_report::RunReport;
use crate::importer::suffix::{SuffixSource, UuidSuffixSource};
use crate::repository::{MenuStore, Validated};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// RestaurantImporter - 顶层导入器
// ==========================================
pub struct RestaurantImporter<S>
where
    S: MenuStore,
{
    // 数据访问层
    store: S,

    // 重名后缀来源
    suffix_source: Box<dyn SuffixSource>,

    // 允许列表
    keys: ImportKeys,
}

impl<S> RestaurantImporter<S>
where
    S: MenuStore,
{
    /// 创建新的 RestaurantImporter 实例
    ///
    /// # 参数
    /// - store: 持久化
    /// - suffix_source: 重名菜品后缀来源
    /// - keys: 根/菜单/菜品三级允许列表
    pub fn new(store: S, suffix_source: Box<dyn SuffixSource>, keys: ImportKeys) -> Self {
        Self {
            store,
            suffix_source,
            keys,
        }
    }

    /// 默认允许列表 + UUID 后缀
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, Box::new(UuidSuffixSource), ImportKeys::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 从文件导入
    ///
    /// # 返回
    /// - Ok(RunReport): 导入完成（可能部分失败）
    /// - Err: 文件不存在 / 无法读取 / 非法 JSON
    pub fn import_from_file(&self, file_path: &Path) -> ImportResult<RunReport> {
        let document = JsonFileParser.parse_file(file_path)?;
        Ok(self.import(&document))
    }

    /// 导入已解析的 JSON 文档
    ///
    /// 任何输入都会返回 RunReport，不会返回错误
    #[instrument(skip_all)]
    pub fn import(&self, document: &Value) -> RunReport {
        let mut report = RunReport::new();
        let mut key_finder = KeyFinder::new();

        let completed = self.import_document(document, &mut key_finder, &mut report);
        report.skip_keys(key_finder.into_unknown_keys());

        // 结构错误（根键缺失/非列表）直接返回，不做汇总
        if !completed {
            return report;
        }

        report.summarize_logs();

        info!(
            status = %report.status(),
            restaurants = report.created(RecordKind::Restaurants),
            menus = report.created(RecordKind::Menus),
            items = report.created(RecordKind::Items),
            duplicated_items = report.created(RecordKind::DuplicatedItems),
            errors = report.errors().len(),
            "导入完成"
        );

        report
    }

    // 返回 false 表示文档结构错误，未处理任何餐厅
    fn import_document(
        &self,
        document: &Value,
        key_finder: &mut KeyFinder,
        report: &mut RunReport,
    ) -> bool {
        let root = record::fields(document);
        info!(root_keys = ?record::keys(root), "开始导入餐厅数据");

        let Some(root_key) = key_finder.find(root, &self.keys.root_keys) else {
            warn!("缺少根键，终止导入");
            report.error(logs::missing_root_key_error(
                &self.keys.root_keys,
                &record::keys(root),
            ));
            return false;
        };

        let restaurants = match root.get(root_key) {
            Some(Value::Array(entries)) => entries,
            _ => {
                warn!(root_key = %root_key, "根键下不是餐厅列表，终止导入");
                report.error(logs::invalid_restaurant_list_error(root_key));
                return false;
            }
        };

        let menu_importer = MenuImporter::new(
            &self.store,
            self.suffix_source.as_ref(),
            &self.keys.item_keys,
        );

        for data in restaurants {
            self.import_restaurant(data, &menu_importer, key_finder, report);
        }
        true
    }

    fn import_restaurant(
        &self,
        data: &Value,
        menu_importer: &MenuImporter<'_>,
        key_finder: &mut KeyFinder,
        report: &mut RunReport,
    ) {
        let fields = record::fields(data);
        let menus_key = key_finder.find(fields, &self.keys.menu_keys);

        let Some(restaurant) = self.create_restaurant(data, report) else {
            return;
        };

        let menus = menus_key
            .and_then(|key| fields.get(key))
            .map(record::list_or_empty)
            .unwrap_or_default();

        debug!(restaurant = %restaurant.name, menus = menus.len(), "处理菜单");
        for menu_data in menus {
            menu_importer.import(&restaurant, menu_data, key_finder, report);
        }
    }

    fn create_restaurant(&self, data: &Value, report: &mut RunReport) -> Option<Restaurant> {
        let name = record::string_field(data, "name");
        let shown_name = logs::display_name(name.as_deref()).to_string();

        match self.store.create_restaurant(&NewRestaurant::new(name)) {
            Ok(Validated::Created(restaurant)) => {
                debug!(restaurant_id = restaurant.id, restaurant = %restaurant.name, "餐厅已创建");
                report.record_created(RecordKind::Restaurants);
                report.log(logs::restaurant_success(&restaurant.name));
                Some(restaurant)
            }
            Ok(Validated::Rejected(messages)) => {
                warn!(restaurant = %shown_name, ?messages, "餐厅校验失败");
                report.error(logs::restaurant_failed(&shown_name, &messages));
                report.record_skipped(RecordKind::Restaurants);
                None
            }
            Err(e) => {
                error!(restaurant = %shown_name, error = %e, "餐厅创建异常");
                report.error(logs::restaurant_exception(&shown_name, &e));
                None
            }
        }
    }
}
