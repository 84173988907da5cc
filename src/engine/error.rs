// ==========================================
// 采样排班看板 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 引擎错误一律为同步、可恢复的类型化失败
//       返回错误时看板状态保持不变
// ==========================================

use crate::domain::types::{ClientId, SlotKey};
use thiserror::Error;

/// 看板操作错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 目标槽位不在日历/班组名单中
    #[error("未知槽位: dia={day}, equipe={team}")]
    UnknownSlot { day: u32, team: String },

    /// 客户不在指定槽位
    #[error("分配不存在: id_cliente={client_id}, dia={day}, equipe={team}")]
    NotFound {
        client_id: ClientId,
        day: u32,
        team: String,
    },

    /// 客户已排在其他槽位 (需先 move 或 remove)
    #[error("客户已排在其他槽位: id_cliente={client_id}, dia={day}, equipe={team}")]
    AlreadyPlaced {
        client_id: ClientId,
        day: u32,
        team: String,
    },
}

impl BoardError {
    pub fn unknown_slot(slot: &SlotKey) -> Self {
        BoardError::UnknownSlot {
            day: slot.day,
            team: slot.team.clone(),
        }
    }

    pub fn not_found(client_id: ClientId, slot: &SlotKey) -> Self {
        BoardError::NotFound {
            client_id,
            day: slot.day,
            team: slot.team.clone(),
        }
    }

    pub fn already_placed(client_id: ClientId, current: &SlotKey) -> Self {
        BoardError::AlreadyPlaced {
            client_id,
            day: current.day,
            team: current.team.clone(),
        }
    }

    /// 错误代码 (供前端/日志使用)
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::UnknownSlot { .. } => "UNKNOWN_SLOT",
            BoardError::NotFound { .. } => "NOT_FOUND",
            BoardError::AlreadyPlaced { .. } => "ALREADY_PLACED",
        }
    }
}

/// Result 类型别名
pub type BoardResult<T> = Result<T, BoardError>;
