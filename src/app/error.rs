// ==========================================
// 采样排班看板 - 交互层错误类型
// ==========================================
// 职责: 汇总引擎/解析/网关错误,外加交互层自身的失败
// ==========================================

use crate::api::error::GatewayError;
use crate::domain::types::ClientId;
use crate::engine::error::BoardError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// 交互层错误类型
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// 已有保存请求在进行中 (保存按钮处于禁用状态)
    #[error("已有保存请求在进行中")]
    SaveInFlight,

    /// 当前没有进行中的拖拽
    #[error("没有进行中的拖拽")]
    NoActiveDrag,

    /// 客户不在目录中
    #[error("客户不存在: id={0}")]
    UnknownClient(ClientId),
}

impl AdapterError {
    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AdapterError::Board(e) => e.code(),
            AdapterError::Import(_) => "IMPORT_ERROR",
            AdapterError::Gateway(e) => e.code(),
            AdapterError::SaveInFlight => "SAVE_IN_FLIGHT",
            AdapterError::NoActiveDrag => "NO_ACTIVE_DRAG",
            AdapterError::UnknownClient(_) => "UNKNOWN_CLIENT",
        }
    }
}

/// Result 类型别名
pub type AdapterResult<T> = Result<T, AdapterError>;
