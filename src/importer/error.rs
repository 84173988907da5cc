// ==========================================
// 采样排班看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 载荷解析错误 =====
    #[error("JSON 解析失败 ({source_name}): {message}")]
    InvalidJson { source_name: String, message: String },

    #[error("客户名单格式错误: {0}")]
    InvalidRoster(String),

    #[error("拖拽载荷格式错误: {0}")]
    InvalidDragPayload(String),
}

impl ImportError {
    pub fn invalid_json(source_name: &str, err: &serde_json::Error) -> Self {
        ImportError::InvalidJson {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
