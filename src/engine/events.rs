// ==========================================
// 采样排班看板 - 引擎层事件发布
// ==========================================
// 职责: 定义看板变更事件与发布 trait
// 说明: 引擎只发布事件,不触碰展示层状态
//       界面层订阅事件后只重绘受影响的状态图标与计数器
// ==========================================

use crate::domain::types::{ClientId, ClientStatus, SlotKey};
use serde::{Deserialize, Serialize};
use std::error::Error;

// ==========================================
// 看板事件类型
// ==========================================

/// 看板事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEventKind {
    /// 新增分配
    Allocated,
    /// 槽位间移动
    Moved,
    /// 移除分配
    Removed,
    /// 外部实验室标志变更
    ExternalLabChanged,
    /// 清空看板
    Cleared,
}

impl BoardEventKind {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            BoardEventKind::Allocated => "Allocated",
            BoardEventKind::Moved => "Moved",
            BoardEventKind::Removed => "Removed",
            BoardEventKind::ExternalLabChanged => "ExternalLabChanged",
            BoardEventKind::Cleared => "Cleared",
        }
    }
}

/// 槽位计数 (事件发出时刻的派生值)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCount {
    pub slot: SlotKey,
    pub count: usize,
}

/// 客户状态变化 (事件发出时刻的派生值)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub client_id: ClientId,
    pub status: ClientStatus,
}

/// 看板变更事件
///
/// 计数与状态均在变更完成后由看板状态即时计算,
/// 订阅方直接使用即可,无需自行累加
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEvent {
    /// 事件类型
    pub kind: BoardEventKind,
    /// 涉及的客户 (Cleared 为 None)
    pub client_id: Option<ClientId>,
    /// 受影响槽位及其最新计数
    pub slots: Vec<SlotCount>,
    /// 受影响客户及其最新状态
    pub statuses: Vec<StatusChange>,
}

impl BoardEvent {
    /// 受影响的槽位
    pub fn affected_slots(&self) -> impl Iterator<Item = &SlotKey> {
        self.slots.iter().map(|s| &s.slot)
    }

    /// 某槽位在事件中的计数
    pub fn count_for(&self, slot: &SlotKey) -> Option<usize> {
        self.slots.iter().find(|s| &s.slot == slot).map(|s| s.count)
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 看板事件发布者 Trait
///
/// 由界面层实现 (如 `BoardView`),通过 `AllocationBoard::subscribe` 注册
///
/// # 实现说明
/// - 发布失败只记录日志,不回滚看板变更
pub trait BoardEventPublisher: Send + Sync {
    /// 发布看板事件
    fn publish(&self, event: &BoardEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}
