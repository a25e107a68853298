// ==========================================
// 餐厅菜单导入 - 文件解析器
// ==========================================
// 支持: JSON 文档（文件路径 / 文本 / 字节流）
// 说明: 解析失败是整次导入的致命错误，不产生 RunReport
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, error};

pub struct JsonFileParser;

impl JsonFileParser {
    /// 从文件路径解析
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<Value> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        debug!(file_path = %file_path.display(), "读取 JSON 文件");
        self.parse_reader(BufReader::new(file))
    }

    /// 从字节流解析
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Value> {
        serde_json::from_reader(reader).map_err(log_parse_failure)
    }

    /// 从文本解析
    pub fn parse_str(&self, content: &str) -> ImportResult<Value> {
        serde_json::from_str(content).map_err(log_parse_failure)
    }
}

fn log_parse_failure(err: serde_json::Error) -> ImportError {
    error!(error = %err, "JSON parsing failed");
    ImportError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"restaurants": []}}"#).unwrap();

        let value = JsonFileParser.parse_file(file.path()).unwrap();
        assert!(value["restaurants"].is_array());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = JsonFileParser.parse_str("{ not json");
        assert!(matches!(result, Err(ImportError::InvalidJson(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = JsonFileParser.parse_file(Path::new("/nonexistent/menus.json"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_parse_reader() {
        let bytes = br#"{"restaurants": [{"name": "A"}]}"#;
        let value = JsonFileParser.parse_reader(&bytes[..]).unwrap();
        assert_eq!(value["restaurants"][0]["name"], "A");
    }
}
