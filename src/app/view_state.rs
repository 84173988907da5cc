// ==========================================
// 采样排班看板 - 界面派生状态
// ==========================================
// 职责: 维护客户状态图标与槽位计数器
// 说明: 仅由看板事件驱动,事件中已携带最新计数与状态
//       不读取任何展示层状态
// ==========================================

use crate::domain::types::{ClientId, ClientStatus, SlotKey};
use crate::engine::board::AllocationBoard;
use crate::engine::directory::ClientDirectory;
use crate::engine::events::{BoardEvent, BoardEventPublisher};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct ViewState {
    statuses: HashMap<ClientId, ClientStatus>,
    counters: HashMap<SlotKey, usize>,
    revision: u64,
}

/// 看板视图 (事件订阅者)
#[derive(Debug, Default)]
pub struct BoardView {
    state: Mutex<ViewState>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以看板当前状态重建视图 (会话开始时调用一次)
    pub fn sync_from(&self, board: &AllocationBoard, directory: &ClientDirectory) {
        let mut state = self.lock();
        state.statuses.clear();
        state.counters.clear();

        for record in directory.roster_sorted() {
            state
                .statuses
                .insert(record.id, board.client_status(record.id));
        }
        for entry in board.snapshot() {
            state
                .statuses
                .insert(entry.client_id, ClientStatus::Scheduled);
        }
        for count in board.slot_counts() {
            state.counters.insert(count.slot, count.count);
        }
        state.revision += 1;
    }

    /// 客户状态图标 (未知客户视为未排班)
    pub fn status(&self, client_id: ClientId) -> ClientStatus {
        self.lock()
            .statuses
            .get(&client_id)
            .copied()
            .unwrap_or(ClientStatus::Unscheduled)
    }

    /// 槽位计数器
    pub fn counter(&self, slot: &SlotKey) -> usize {
        self.lock().counters.get(slot).copied().unwrap_or(0)
    }

    /// 已排班客户数
    pub fn scheduled_clients(&self) -> usize {
        self.lock()
            .statuses
            .values()
            .filter(|s| s.is_scheduled())
            .count()
    }

    /// 视图版本号 (每次重绘递增)
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BoardEventPublisher for BoardView {
    fn publish(&self, event: &BoardEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut state = self.state.lock().map_err(|e| e.to_string())?;

        for slot in &event.slots {
            state.counters.insert(slot.slot.clone(), slot.count);
        }
        for change in &event.statuses {
            state.statuses.insert(change.client_id, change.status);
        }
        state.revision += 1;

        tracing::debug!(
            "视图重绘: kind={}, slots={}, statuses={}",
            event.kind.as_str(),
            event.slots.len(),
            event.statuses.len()
        );
        Ok(())
    }
}
