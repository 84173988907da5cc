// ==========================================
// 采样排班看板 - 分配看板 (核心状态)
// ==========================================
// 职责: 维护 (日, 班组) → 分配列表 的映射,提供
//       allocate / move / remove / 标志切换 / 快照 / 清空
// 红线:
// 1. 唯一性: 任意时刻一个客户最多出现在一个槽位
// 2. 槽位存在性: 不在目录中的槽位一律拒绝,绝不隐式创建
// 3. 派生视图 (状态/计数) 每次从映射即时计算,不单独维护
// 4. 先校验后变更: 返回错误时看板保持原样
// ==========================================

use crate::domain::allocation::{Allocation, SnapshotEntry};
use crate::domain::types::{ClientId, ClientStatus, Outcome, SlotKey};
use crate::engine::calendar::SlotCatalog;
use crate::engine::error::{BoardError, BoardResult};
use crate::engine::events::{BoardEvent, BoardEventKind, BoardEventPublisher, SlotCount, StatusChange};
use std::collections::HashMap;
use std::sync::Arc;

/// 分配看板
///
/// 每个编辑会话 (月视图) 构建一次; 槽位内顺序即插入顺序 (显示顺序)
pub struct AllocationBoard {
    catalog: SlotCatalog,
    slots: HashMap<SlotKey, Vec<Allocation>>,
    publishers: Vec<Arc<dyn BoardEventPublisher>>,
}

impl AllocationBoard {
    /// 在给定槽位目录上创建空看板
    pub fn new(catalog: SlotCatalog) -> Self {
        Self {
            catalog,
            slots: HashMap::new(),
            publishers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// 注册事件订阅者
    pub fn subscribe(&mut self, publisher: Arc<dyn BoardEventPublisher>) {
        self.publishers.push(publisher);
    }

    // ==========================================
    // 变更操作
    // ==========================================

    /// 将客户分配到槽位
    ///
    /// # 返回
    /// - Ok(Applied): 新增分配
    /// - Ok(Unchanged): 客户已在该槽位 (重复拖放,幂等)
    /// - Err(UnknownSlot): 槽位不在目录中
    /// - Err(AlreadyPlaced): 客户已在其他槽位,需调用 `move_client`
    pub fn allocate(
        &mut self,
        slot: &SlotKey,
        client_id: ClientId,
        external_lab: bool,
    ) -> BoardResult<Outcome> {
        self.ensure_slot(slot)?;

        if let Some(current) = self.locate(client_id) {
            if &current == slot {
                tracing::debug!("重复分配忽略: client_id={}, {}", client_id, slot);
                return Ok(Outcome::Unchanged);
            }
            return Err(BoardError::already_placed(client_id, &current));
        }

        self.slots
            .entry(slot.clone())
            .or_default()
            .push(Allocation::new(client_id, external_lab));

        self.emit(BoardEvent {
            kind: BoardEventKind::Allocated,
            client_id: Some(client_id),
            slots: vec![self.slot_count_of(slot)],
            statuses: vec![self.status_change_of(client_id)],
        });
        Ok(Outcome::Applied)
    }

    /// 将客户从 `from` 移动到 `to`
    ///
    /// 原子性: 要么客户落在 `to` 且保留原外部实验室标志,
    /// 要么看板完全不变
    pub fn move_client(
        &mut self,
        client_id: ClientId,
        from: &SlotKey,
        to: &SlotKey,
    ) -> BoardResult<Outcome> {
        let position = self
            .position_in(from, client_id)
            .ok_or_else(|| BoardError::not_found(client_id, from))?;

        if from == to {
            return Ok(Outcome::Unchanged);
        }
        self.ensure_slot(to)?;

        // 校验全部通过后再变更
        let allocation = match self.slots.get_mut(from) {
            Some(list) => list.remove(position),
            None => return Err(BoardError::not_found(client_id, from)),
        };
        self.slots.entry(to.clone()).or_default().push(allocation);

        self.emit(BoardEvent {
            kind: BoardEventKind::Moved,
            client_id: Some(client_id),
            slots: vec![self.slot_count_of(from), self.slot_count_of(to)],
            statuses: vec![self.status_change_of(client_id)],
        });
        Ok(Outcome::Applied)
    }

    /// 从槽位移除客户 (客户状态变为待排班)
    ///
    /// 先校验槽位是否在目录中: 目录外的键返回 `UnknownSlot`,
    /// 槽位合法但客户不在其中返回 `NotFound`
    pub fn remove(&mut self, slot: &SlotKey, client_id: ClientId) -> BoardResult<Outcome> {
        self.ensure_slot(slot)?;
        let position = self
            .position_in(slot, client_id)
            .ok_or_else(|| BoardError::not_found(client_id, slot))?;

        if let Some(list) = self.slots.get_mut(slot) {
            list.remove(position);
        }

        self.emit(BoardEvent {
            kind: BoardEventKind::Removed,
            client_id: Some(client_id),
            slots: vec![self.slot_count_of(slot)],
            statuses: vec![self.status_change_of(client_id)],
        });
        Ok(Outcome::Applied)
    }

    /// 设置外部实验室标志
    ///
    /// 与 `remove` 相同: 目录外的槽位键返回 `UnknownSlot`,
    /// 槽位合法但客户不在其中返回 `NotFound`
    pub fn set_external_lab(
        &mut self,
        slot: &SlotKey,
        client_id: ClientId,
        value: bool,
    ) -> BoardResult<Outcome> {
        self.ensure_slot(slot)?;
        let allocation = self
            .slots
            .get_mut(slot)
            .and_then(|list| list.iter_mut().find(|a| a.client_id == client_id))
            .ok_or_else(|| BoardError::not_found(client_id, slot))?;

        if allocation.external_lab == value {
            return Ok(Outcome::Unchanged);
        }
        allocation.external_lab = value;

        self.emit(BoardEvent {
            kind: BoardEventKind::ExternalLabChanged,
            client_id: Some(client_id),
            slots: vec![self.slot_count_of(slot)],
            statuses: Vec::new(),
        });
        Ok(Outcome::Applied)
    }

    /// 清空全部槽位 (批量替换前使用)
    pub fn clear(&mut self) -> Outcome {
        let occupied: Vec<SlotKey> = self
            .catalog
            .keys()
            .filter(|k| self.slot_count(k) > 0)
            .collect();
        if occupied.is_empty() {
            return Outcome::Unchanged;
        }

        let released: Vec<ClientId> = self
            .snapshot()
            .into_iter()
            .map(|entry| entry.client_id)
            .collect();
        self.slots.clear();

        tracing::debug!(
            "看板已清空: 槽位数={}, 客户数={}",
            occupied.len(),
            released.len()
        );

        self.emit(BoardEvent {
            kind: BoardEventKind::Cleared,
            client_id: None,
            slots: occupied
                .into_iter()
                .map(|slot| SlotCount { slot, count: 0 })
                .collect(),
            statuses: released
                .into_iter()
                .map(|client_id| StatusChange {
                    client_id,
                    status: ClientStatus::Unscheduled,
                })
                .collect(),
        });
        Outcome::Applied
    }

    // ==========================================
    // 查询 (派生视图)
    // ==========================================

    /// 客户是否已排班
    pub fn is_scheduled(&self, client_id: ClientId) -> bool {
        self.locate(client_id).is_some()
    }

    pub fn client_status(&self, client_id: ClientId) -> ClientStatus {
        ClientStatus::from_scheduled(self.is_scheduled(client_id))
    }

    /// 客户当前所在槽位
    pub fn locate(&self, client_id: ClientId) -> Option<SlotKey> {
        self.slots.iter().find_map(|(slot, list)| {
            list.iter()
                .any(|a| a.client_id == client_id)
                .then(|| slot.clone())
        })
    }

    /// 槽位分配数 (未知槽位为 0)
    pub fn slot_count(&self, slot: &SlotKey) -> usize {
        self.slots.get(slot).map(Vec::len).unwrap_or(0)
    }

    /// 槽位内的分配 (显示顺序)
    pub fn allocations(&self, slot: &SlotKey) -> &[Allocation] {
        self.slots.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 全部槽位计数 (目录顺序)
    pub fn slot_counts(&self) -> Vec<SlotCount> {
        self.catalog
            .keys()
            .map(|slot| {
                let count = self.slot_count(&slot);
                SlotCount { slot, count }
            })
            .collect()
    }

    /// 看板快照: 按 (日, 班组名单顺序, 插入顺序) 排列
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        let mut entries = Vec::with_capacity(self.len());
        for slot in self.catalog.keys() {
            for allocation in self.allocations(&slot) {
                entries.push(SnapshotEntry {
                    day: slot.day,
                    client_id: allocation.client_id,
                    team: slot.team.clone(),
                    external_lab: allocation.external_lab,
                });
            }
        }
        entries
    }

    /// 分配总数
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn ensure_slot(&self, slot: &SlotKey) -> BoardResult<()> {
        if self.catalog.contains(slot) {
            Ok(())
        } else {
            Err(BoardError::unknown_slot(slot))
        }
    }

    fn position_in(&self, slot: &SlotKey, client_id: ClientId) -> Option<usize> {
        self.slots
            .get(slot)?
            .iter()
            .position(|a| a.client_id == client_id)
    }

    fn slot_count_of(&self, slot: &SlotKey) -> SlotCount {
        SlotCount {
            slot: slot.clone(),
            count: self.slot_count(slot),
        }
    }

    fn status_change_of(&self, client_id: ClientId) -> StatusChange {
        StatusChange {
            client_id,
            status: self.client_status(client_id),
        }
    }

    fn emit(&self, event: BoardEvent) {
        for publisher in &self.publishers {
            if let Err(e) = publisher.publish(&event) {
                tracing::warn!(
                    "发布看板事件失败: kind={}, client_id={:?}, error={}",
                    event.kind.as_str(),
                    event.client_id,
                    e
                );
            }
        }
    }
}

impl std::fmt::Debug for AllocationBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationBoard")
            .field("catalog", &self.catalog)
            .field("allocations", &self.len())
            .field("publishers", &self.publishers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ==========================================
    // 测试辅助
    // ==========================================

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<BoardEvent>>,
    }

    impl BoardEventPublisher for Recorder {
        fn publish(&self, event: &BoardEvent) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct FailingPublisher;

    impl BoardEventPublisher for FailingPublisher {
        fn publish(&self, _event: &BoardEvent) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("订阅方不可用".into())
        }
    }

    fn slot(day: u32, team: &str) -> SlotKey {
        SlotKey::new(day, team)
    }

    fn test_board() -> AllocationBoard {
        AllocationBoard::new(SlotCatalog::new(1..=10, ["A", "B"]))
    }

    // ==========================================
    // allocate
    // ==========================================

    #[test]
    fn test_allocate_and_query() {
        let mut board = test_board();
        assert_eq!(board.allocate(&slot(5, "A"), 1, true), Ok(Outcome::Applied));

        assert!(board.is_scheduled(1));
        assert_eq!(board.slot_count(&slot(5, "A")), 1);
        assert_eq!(board.locate(1), Some(slot(5, "A")));
        assert_eq!(board.allocations(&slot(5, "A")), &[Allocation::new(1, true)]);
    }

    #[test]
    fn test_allocate_unknown_slot() {
        let mut board = test_board();
        let result = board.allocate(&slot(11, "A"), 1, false);
        assert_eq!(result, Err(BoardError::unknown_slot(&slot(11, "A"))));
        assert!(board.is_empty());
        assert_eq!(board.slot_count(&slot(11, "A")), 0);
    }

    #[test]
    fn test_allocate_same_slot_is_idempotent() {
        let mut board = test_board();
        board.allocate(&slot(5, "A"), 1, true).unwrap();
        let before = board.snapshot();

        // 重复拖放,即使标志不同也不改变状态
        assert_eq!(board.allocate(&slot(5, "A"), 1, false), Ok(Outcome::Unchanged));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_allocate_placed_elsewhere_rejected() {
        let mut board = test_board();
        board.allocate(&slot(5, "A"), 1, false).unwrap();
        let before = board.snapshot();

        let result = board.allocate(&slot(6, "B"), 1, false);
        assert_eq!(result, Err(BoardError::already_placed(1, &slot(5, "A"))));
        assert_eq!(board.snapshot(), before);
    }

    // ==========================================
    // move
    // ==========================================

    #[test]
    fn test_move_preserves_flag() {
        let mut board = test_board();
        board.allocate(&slot(5, "A"), 1, true).unwrap();

        assert_eq!(board.move_client(1, &slot(5, "A"), &slot(6, "B")), Ok(Outcome::Applied));
        assert_eq!(board.slot_count(&slot(5, "A")), 0);
        assert_eq!(board.slot_count(&slot(6, "B")), 1);
        assert_eq!(board.allocations(&slot(6, "B")), &[Allocation::new(1, true)]);
    }

    #[test]
    fn test_move_failures_leave_board_untouched() {
        let mut board = test_board();
        board.allocate(&slot(5, "A"), 1, false).unwrap();
        let before = board.snapshot();

        assert_eq!(
            board.move_client(1, &slot(6, "A"), &slot(7, "A")),
            Err(BoardError::not_found(1, &slot(6, "A")))
        );
        assert_eq!(
            board.move_client(1, &slot(5, "A"), &slot(5, "Z")),
            Err(BoardError::unknown_slot(&slot(5, "Z")))
        );
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_move_to_same_slot_is_noop() {
        let mut board = test_board();
        board.allocate(&slot(5, "A"), 1, false).unwrap();
        board.allocate(&slot(5, "A"), 2, false).unwrap();
        let before = board.snapshot();

        assert_eq!(board.move_client(1, &slot(5, "A"), &slot(5, "A")), Ok(Outcome::Unchanged));
        assert_eq!(board.snapshot(), before);
    }

    // ==========================================
    // remove / set_external_lab / clear
    // ==========================================

    #[test]
    fn test_remove() {
        let mut board = test_board();
        board.allocate(&slot(5, "A"), 1, false).unwrap();

        assert_eq!(board.remove(&slot(5, "A"), 1), Ok(Outcome::Applied));
        assert!(!board.is_scheduled(1));
        assert_eq!(board.client_status(1), ClientStatus::Unscheduled);

        assert_eq!(board.remove(&slot(5, "A"), 1), Err(BoardError::not_found(1, &slot(5, "A"))));
        assert_eq!(board.remove(&slot(40, "A"), 1), Err(BoardError::unknown_slot(&slot(40, "A"))));
    }

    #[test]
    fn test_set_external_lab() {
        let mut board = test_board();
        board.allocate(&slot(2, "B"), 3, false).unwrap();

        assert_eq!(board.set_external_lab(&slot(2, "B"), 3, true), Ok(Outcome::Applied));
        assert_eq!(board.set_external_lab(&slot(2, "B"), 3, true), Ok(Outcome::Unchanged));
        assert!(board.allocations(&slot(2, "B"))[0].external_lab);

        assert_eq!(
            board.set_external_lab(&slot(2, "A"), 3, true),
            Err(BoardError::not_found(3, &slot(2, "A")))
        );
        // 目录外的键先于客户查找报错
        assert_eq!(
            board.set_external_lab(&slot(2, "Z"), 3, true),
            Err(BoardError::unknown_slot(&slot(2, "Z")))
        );
    }

    #[test]
    fn test_clear() {
        let mut board = test_board();
        assert_eq!(board.clear(), Outcome::Unchanged);

        board.allocate(&slot(1, "A"), 1, false).unwrap();
        board.allocate(&slot(2, "B"), 2, true).unwrap();
        assert_eq!(board.clear(), Outcome::Applied);
        assert!(board.snapshot().is_empty());
        assert!(!board.is_scheduled(1));
        assert!(!board.is_scheduled(2));
    }

    #[test]
    fn test_snapshot_order_follows_catalog() {
        let mut board = AllocationBoard::new(SlotCatalog::new(1..=3, ["R2", "R1"]));
        board.allocate(&slot(2, "R1"), 10, false).unwrap();
        board.allocate(&slot(1, "R1"), 11, false).unwrap();
        board.allocate(&slot(2, "R2"), 12, true).unwrap();
        board.allocate(&slot(2, "R1"), 13, false).unwrap();

        let order: Vec<ClientId> = board.snapshot().iter().map(|e| e.client_id).collect();
        assert_eq!(order, vec![11, 12, 10, 13]);
    }

    // ==========================================
    // 事件
    // ==========================================

    #[test]
    fn test_events_carry_derived_values() {
        let recorder = Arc::new(Recorder::default());
        let mut board = test_board();
        board.subscribe(recorder.clone());

        board.allocate(&slot(5, "A"), 1, false).unwrap();
        board.allocate(&slot(5, "A"), 1, false).unwrap(); // 幂等,不发布
        board.move_client(1, &slot(5, "A"), &slot(6, "B")).unwrap();
        board.remove(&slot(6, "B"), 1).unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].kind, BoardEventKind::Allocated);
        assert_eq!(events[0].count_for(&slot(5, "A")), Some(1));
        assert_eq!(events[0].statuses[0].status, ClientStatus::Scheduled);

        assert_eq!(events[1].kind, BoardEventKind::Moved);
        assert_eq!(events[1].count_for(&slot(5, "A")), Some(0));
        assert_eq!(events[1].count_for(&slot(6, "B")), Some(1));

        assert_eq!(events[2].kind, BoardEventKind::Removed);
        assert_eq!(events[2].statuses[0].status, ClientStatus::Unscheduled);
    }

    #[test]
    fn test_external_lab_event() {
        let recorder = Arc::new(Recorder::default());
        let mut board = test_board();
        board.allocate(&slot(3, "A"), 1, false).unwrap();
        board.subscribe(recorder.clone());

        board.set_external_lab(&slot(3, "A"), 1, true).unwrap();
        board.set_external_lab(&slot(3, "A"), 1, true).unwrap(); // 无变化,不发布

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, BoardEventKind::ExternalLabChanged);
        assert_eq!(events[0].client_id, Some(1));
        assert_eq!(events[0].count_for(&slot(3, "A")), Some(1));
        assert!(events[0].statuses.is_empty());
    }

    #[test]
    fn test_clear_event_releases_all_clients() {
        let recorder = Arc::new(Recorder::default());
        let mut board = test_board();
        board.allocate(&slot(1, "A"), 1, false).unwrap();
        board.allocate(&slot(1, "A"), 2, true).unwrap();
        board.allocate(&slot(4, "B"), 3, false).unwrap();
        board.subscribe(recorder.clone());

        board.clear();
        board.clear(); // 已为空,不发布

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind, BoardEventKind::Cleared);
        assert_eq!(event.client_id, None);

        let mut slots: Vec<SlotKey> = event.affected_slots().cloned().collect();
        slots.sort();
        assert_eq!(slots, vec![slot(1, "A"), slot(4, "B")]);
        assert!(event.slots.iter().all(|s| s.count == 0));

        let mut released: Vec<ClientId> = event.statuses.iter().map(|s| s.client_id).collect();
        released.sort();
        assert_eq!(released, vec![1, 2, 3]);
        assert!(event
            .statuses
            .iter()
            .all(|s| s.status == ClientStatus::Unscheduled));
    }

    #[test]
    fn test_failing_publisher_does_not_rollback() {
        let mut board = test_board();
        board.subscribe(Arc::new(FailingPublisher));

        assert_eq!(board.allocate(&slot(1, "A"), 1, false), Ok(Outcome::Applied));
        assert!(board.is_scheduled(1));
    }

    #[test]
    fn test_error_emits_no_event() {
        let recorder = Arc::new(Recorder::default());
        let mut board = test_board();
        board.subscribe(recorder.clone());

        let _ = board.allocate(&slot(99, "A"), 1, false);
        let _ = board.remove(&slot(1, "A"), 1);
        assert!(recorder.events.lock().unwrap().is_empty());
    }
}
