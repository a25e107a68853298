// ==========================================
// 餐厅菜单导入 - 导入运行报告
// ==========================================
// 职责: 一次导入运行的累积结果（日志/错误/未知键/计数）
// 约束:
// - 每次导入只有一个 RunReport，由顶层导入器持有，
//   以 &mut 显式传入下级导入器（不做事后合并）
// - logs / errors 只追加，计数只增不减
// - summarize_logs 只在顶层导入结束时执行一次
// ==========================================

use crate::domain::import_run::ImportRun;
use crate::domain::types::{ImportStatus, RecordKind};
use crate::importer::logs;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 按记录类别计数
pub type RecordCounters = BTreeMap<RecordKind, usize>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    logs: Vec<String>,
    errors: Vec<String>,
    skipped_keys: BTreeSet<String>,
    created_records: RecordCounters,
    skipped_records: RecordCounters,
    #[serde(skip)]
    summarized: bool,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== 追加 =====

    pub fn log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }

    pub fn error(&mut self, line: impl Into<String>) {
        self.errors.push(line.into());
    }

    /// 记录未识别的键（自动去重）
    pub fn skip_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skipped_keys.extend(keys.into_iter().map(Into::into));
    }

    pub fn record_created(&mut self, kind: RecordKind) {
        *self.created_records.entry(kind).or_insert(0) += 1;
    }

    pub fn record_skipped(&mut self, kind: RecordKind) {
        *self.skipped_records.entry(kind).or_insert(0) += 1;
    }

    // ===== 查询 =====

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn skipped_keys(&self) -> &BTreeSet<String> {
        &self.skipped_keys
    }

    pub fn created_records(&self) -> &RecordCounters {
        &self.created_records
    }

    pub fn skipped_records(&self) -> &RecordCounters {
        &self.skipped_records
    }

    pub fn created(&self, kind: RecordKind) -> usize {
        self.created_records.get(&kind).copied().unwrap_or(0)
    }

    pub fn skipped(&self, kind: RecordKind) -> usize {
        self.skipped_records.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_summarized(&self) -> bool {
        self.summarized
    }

    /// 根据报告内容判定导入分级
    pub fn status(&self) -> ImportStatus {
        if self.created(RecordKind::Restaurants) == 0 {
            ImportStatus::Failed
        } else if !self.errors.is_empty() {
            ImportStatus::PartiallySuccessful
        } else {
            ImportStatus::Success
        }
    }

    /// 生成导入运行记录（供 import_run 表落库）
    pub fn to_import_run(&self, run_id: String, file_name: Option<String>) -> ImportRun {
        ImportRun {
            run_id,
            file_name,
            status: self.status(),
            created_restaurants: self.created(RecordKind::Restaurants),
            created_menus: self.created(RecordKind::Menus),
            created_items: self.created(RecordKind::Items)
                + self.created(RecordKind::DuplicatedItems),
            skipped_records: self.skipped_records.values().sum(),
            error_count: self.errors.len(),
            imported_at: Utc::now(),
            report_json: serde_json::to_string(self).ok(),
        }
    }

    /// 汇总日志
    ///
    /// # 规则
    /// 1. errors 非空 → 追加警告标题，再按原顺序追加全部错误
    /// 2. skipped_keys 非空 → 追加未知键标题，再按字典序追加 "  - <key>"
    ///
    /// # 说明
    /// 只允许生效一次，重复调用直接返回，不会重复追加标题
    pub fn summarize_logs(&mut self) {
        if self.summarized {
            return;
        }
        self.summarized = true;

        if !self.errors.is_empty() {
            self.logs.push(logs::summarize_warnings_title());
            self.logs.extend(self.errors.iter().cloned());
        }

        if !self.skipped_keys.is_empty() {
            self.logs.push(logs::unknown_keys_title());
            // BTreeSet 迭代即字典序
            self.logs
                .extend(self.skipped_keys.iter().map(|k| logs::unknown_key_item(k)));
        }
    }
}
