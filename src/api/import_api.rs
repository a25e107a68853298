// ==========================================
// 餐厅菜单导入 - 导入API
// ==========================================
// 职责: 封装一次导入请求: 读取文件 → 解析 → 导入 → 记录运行 → 分级响应
// 分级: Success 200 / Partially successful 207 / Failed 400
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::domain::{ImportRun, ImportStatus};
use crate::importer::{JsonFileParser, RestaurantImporter, RunReport, SuffixSource, UuidSuffixSource};
use crate::repository::{ImportRunRepository, SqliteMenuStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 运行ID（import_run 主键）
    pub run_id: String,
    /// 分级: "Success" / "Partially successful" / "Failed"
    pub status: ImportStatus,
    /// 对应 HTTP 状态码
    pub http_status: u16,
    /// logs / errors / skipped_keys / created_records / skipped_records
    #[serde(flatten)]
    pub report: RunReport,
}

impl ImportApiResponse {
    fn from_report(run_id: String, report: RunReport) -> Self {
        let status = report.status();
        Self {
            run_id,
            status,
            http_status: status.http_status(),
            report,
        }
    }
}

/// 导入API
pub struct ImportApi {
    db_path: String,
    suffix_source: Arc<dyn SuffixSource>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(db_path: String) -> Self {
        Self::with_suffix_source(db_path, Arc::new(UuidSuffixSource))
    }

    /// 指定重名后缀来源（测试中用于固定输出）
    pub fn with_suffix_source(db_path: String, suffix_source: Arc<dyn SuffixSource>) -> Self {
        Self {
            db_path,
            suffix_source,
        }
    }

    /// 从文件导入
    ///
    /// # 参数
    /// - file_path: JSON 文件路径
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入完成（含部分成功/失败分级）
    /// - Err(ApiError): 缺少文件(400) / 无法读取或非法 JSON(422) / 数据库故障(500)
    #[instrument(skip(self))]
    pub async fn import_file(&self, file_path: &str) -> ApiResult<ImportApiResponse> {
        if file_path.trim().is_empty() {
            return Err(ApiError::MissingParameter("file".to_string()));
        }

        let path = Path::new(file_path);
        let content = tokio::fs::read(path).await.map_err(|e| {
            warn!(file_path = %file_path, error = %e, "读取导入文件失败");
            ApiError::from(crate::importer::ImportError::from(e))
        })?;
        let document = JsonFileParser.parse_reader(content.as_slice())?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        self.import_json(document, file_name).await
    }

    /// 导入已解析的 JSON 文档
    pub async fn import_json(
        &self,
        document: Value,
        file_name: Option<String>,
    ) -> ApiResult<ImportApiResponse> {
        let db_path = self.db_path.clone();
        let suffix_source = Arc::clone(&self.suffix_source);

        tokio::task::spawn_blocking(move || {
            run_import(&db_path, suffix_source, &document, file_name)
        })
        .await
        .map_err(|e| ApiError::InternalError(format!("导入任务异常终止: {}", e)))?
    }

    /// 最近的导入运行记录
    pub fn recent_runs(&self, limit: usize) -> ApiResult<Vec<ImportRun>> {
        let repo = ImportRunRepository::new(&self.db_path)?;
        Ok(repo.recent(limit)?)
    }

    /// 按运行ID查询
    pub fn get_run(&self, run_id: &str) -> ApiResult<ImportRun> {
        let repo = ImportRunRepository::new(&self.db_path)?;
        repo.find_by_id(run_id)?
            .ok_or_else(|| ApiError::NotFound(format!("ImportRun(id={})不存在", run_id)))
    }
}

fn run_import(
    db_path: &str,
    suffix_source: Arc<dyn SuffixSource>,
    document: &Value,
    file_name: Option<String>,
) -> ApiResult<ImportApiResponse> {
    let keys = ConfigManager::new(db_path)?.get_import_keys()?;
    let store = SqliteMenuStore::new(db_path)?;
    let importer = RestaurantImporter::new(store, Box::new(suffix_source), keys);

    let run_id = Uuid::new_v4().to_string();
    let report = importer.import(document);

    // 运行记录写入失败不影响已完成的导入结果
    let run = report.to_import_run(run_id.clone(), file_name);
    if let Err(e) = ImportRunRepository::new(db_path).and_then(|repo| repo.insert(&run)) {
        warn!(run_id = %run_id, error = %e, "导入运行记录写入失败");
    }

    info!(run_id = %run_id, status = %run.status, "导入请求完成");
    Ok(ImportApiResponse::from_report(run_id, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_flattens_report_fields() {
        let mut report = RunReport::new();
        report.record_created(crate::domain::RecordKind::Restaurants);
        report.log("line");
        let response = ImportApiResponse::from_report("run-1".to_string(), report);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "Success");
        assert_eq!(value["http_status"], 200);
        assert_eq!(value["logs"], json!(["line"]));
        assert_eq!(value["created_records"]["restaurants"], 1);
    }
}
