// ==========================================
// 导入 API 端到端测试
// ==========================================
// 模拟命令行调用后端的完整流程: 文件 → 响应分级 → 运行记录

use menu_importer::api::{ApiError, ImportApi};
use menu_importer::importer::FixedSuffixSource;
use menu_importer::logging;
use menu_importer::ImportStatus;
use std::sync::Arc;

use test_helpers::{create_test_db, fixture_path, write_temp_json};

fn path_str(name: &str) -> String {
    fixture_path(name).to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_perfect_data_returns_200() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let response = import_api
        .import_file(&path_str("perfect_data.json"))
        .await
        .unwrap();

    assert_eq!(response.status, ImportStatus::Success);
    assert_eq!(response.http_status, 200);

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["status"], "Success");
    assert_eq!(body["created_records"]["restaurants"], 2);
    assert!(body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_partially_good_returns_207() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let response = import_api
        .import_file(&path_str("partially_good.json"))
        .await
        .unwrap();

    assert_eq!(response.http_status, 207);
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["status"], "Partially successful");
    assert_eq!(body["skipped_records"]["items"], 1);
    assert_eq!(body["skipped_keys"], serde_json::json!(["beverages"]));
}

#[tokio::test]
async fn test_missing_root_key_returns_400() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let response = import_api
        .import_file(&path_str("missing_root_key.json"))
        .await
        .unwrap();

    assert_eq!(response.status, ImportStatus::Failed);
    assert_eq!(response.http_status, 400);
}

#[tokio::test]
async fn test_missing_file_parameter() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let err = import_api.import_file("").await.unwrap_err();

    assert!(matches!(err, ApiError::MissingParameter(_)));
    assert_eq!(err.http_status(), 400);
    assert!(err.to_body()["error"]
        .as_str()
        .unwrap()
        .contains("Missing required parameter"));
}

#[tokio::test]
async fn test_invalid_json_returns_422() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let err = import_api
        .import_file(&path_str("invalid.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidJson(_)));
    assert_eq!(err.http_status(), 422);
    assert!(err.to_string().starts_with("Invalid JSON file"));
}

#[tokio::test]
async fn test_nonexistent_file_returns_422() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let err = import_api
        .import_file("/nonexistent/menus.json")
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 422);
}

#[tokio::test]
async fn test_run_is_recorded() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api = ImportApi::new(db_path);

    let response = import_api
        .import_file(&path_str("partially_good.json"))
        .await
        .unwrap();

    let run = import_api.get_run(&response.run_id).unwrap();
    assert_eq!(run.status, ImportStatus::PartiallySuccessful);
    assert_eq!(run.file_name.as_deref(), Some("partially_good.json"));
    assert_eq!(run.created_restaurants, 1);
    assert_eq!(run.error_count, 3);

    let runs = import_api.recent_runs(10).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, response.run_id);
}

#[tokio::test]
async fn test_second_import_renames_duplicates() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let import_api =
        ImportApi::with_suffix_source(db_path, Arc::new(FixedSuffixSource::new("0a1b2c")));

    let file = write_temp_json(
        r#"{"restaurants": [{"name": "Diner", "menus": [{"name": "lunch", "items": [{"name": "Fries", "price": 3}]}]}]}"#,
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let first = import_api.import_file(&path).await.unwrap();
    assert_eq!(first.status, ImportStatus::Success);

    // 餐厅名不唯一，会新建一家；菜单属于新餐厅；菜品名全局重复 → 改名
    let second = import_api.import_file(&path).await.unwrap();
    assert_eq!(second.status, ImportStatus::Success);
    let body = serde_json::to_value(&second).unwrap();
    assert_eq!(body["created_records"]["duplicated_items"], 1);
    assert!(second
        .report
        .logs()
        .iter()
        .any(|l| l.contains("renamed to 'Fries (duplicate 0a1b2c)'")));
}
