// ==========================================
// 餐厅菜单导入 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把导入/仓储错误转换为带 HTTP 状态码的错误
// 说明: 单条记录的失败不走这里，它们在 RunReport 中以 207/400 分级体现
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use serde_json::json;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("{0}")]
    InvalidJson(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 对应的 HTTP 状态码
    ///
    /// - 400: 缺少上传文件
    /// - 404: 资源未找到
    /// - 422: 文件无法读取 / 非法 JSON
    /// - 500: 数据库或内部故障
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::MissingParameter(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InvalidJson(_) | ApiError::ImportError(_) => 422,
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::InternalError(_) => 500,
        }
    }

    /// 错误响应体 {"error": "..."}
    pub fn to_body(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidJson(_) => ApiError::InvalidJson(err.to_string()),
            ImportError::FileNotFound(_) | ImportError::FileReadError(_) => {
                ApiError::ImportError(err.to_string())
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("字段{}错误: {}", field, message))
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
