// ==========================================
// 采样排班看板 - 编辑会话 (交互适配层)
// ==========================================
// 职责: 将拖拽/点击手势翻译为看板操作,并把结果反馈给操作员
// 红线:
// 1. 拖拽来源显式记录 (名单 or 槽位),不从展示状态推断
// 2. 保存单飞: 同一会话同时只允许一个保存请求
// 3. 复制上月失败时看板保持原样
// ==========================================

use crate::api::gateway::PersistenceGateway;
use crate::app::error::{AdapterError, AdapterResult};
use crate::app::prompt::{ConfirmPrompt, Notification, OperatorPrompt};
use crate::app::view_state::BoardView;
use crate::domain::drag::DragPayload;
use crate::domain::period::Period;
use crate::domain::types::{ClientId, Outcome, SlotKey};
use crate::engine::board::AllocationBoard;
use crate::engine::calendar::SlotCatalog;
use crate::engine::directory::ClientDirectory;
use crate::engine::error::BoardError;
use crate::engine::loader::{BoardLoader, LoadReport};
use crate::i18n::{t, t_with_args};
use crate::importer::payload::{parse_drag_payload, parse_initial_plan, parse_roster};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// 进行中的拖拽
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub payload: DragPayload,
    /// 来源槽位 (从名单拖出时为 None)
    pub origin: Option<SlotKey>,
}

/// 保存守卫: 析构时释放单飞标志 (成功与失败路径均释放)
struct SaveGuard<'a>(&'a AtomicBool);

impl<'a> SaveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SaveGuard(flag))
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 月度编辑会话
pub struct PlannerSession {
    session_id: Uuid,
    period: Period,
    directory: ClientDirectory,
    board: AllocationBoard,
    view: Arc<BoardView>,
    drag: Option<DragState>,
    saving: AtomicBool,
}

impl PlannerSession {
    /// 由已加载的看板创建会话
    pub fn new(period: Period, directory: ClientDirectory, mut board: AllocationBoard) -> Self {
        let view = Arc::new(BoardView::new());
        view.sync_from(&board, &directory);
        board.subscribe(view.clone());

        let session_id = Uuid::new_v4();
        tracing::info!(
            session_id = %session_id,
            "编辑会话开始: period={}, clients={}, allocations={}",
            period,
            directory.len(),
            board.len()
        );

        Self {
            session_id,
            period,
            directory,
            board,
            view,
            drag: None,
            saving: AtomicBool::new(false),
        }
    }

    /// 由原始输入 (客户名单 JSON + 已保存计划 JSON) 创建会话
    ///
    /// 名单无法解析视为错误; 计划无法解析时以空看板开始
    pub fn from_inputs<T, S>(
        period: Period,
        teams: T,
        roster_json: &str,
        plan_json: &str,
    ) -> AdapterResult<(Self, LoadReport)>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let directory = ClientDirectory::from_records(parse_roster(roster_json)?);
        let plan = parse_initial_plan(plan_json);

        let mut board = AllocationBoard::new(SlotCatalog::for_period(period, teams));
        let report = BoardLoader::load_initial(&mut board, &plan, &directory);

        Ok((Self::new(period, directory, board), report))
    }

    // ==========================================
    // 访问器
    // ==========================================

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn directory(&self) -> &ClientDirectory {
        &self.directory
    }

    pub fn board(&self) -> &AllocationBoard {
        &self.board
    }

    pub fn view(&self) -> Arc<BoardView> {
        self.view.clone()
    }

    pub fn active_drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// 保存是否进行中 (保存按钮禁用)
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    // ==========================================
    // 拖拽协议
    // ==========================================

    /// 从客户名单开始拖拽 (新建分配)
    pub fn start_drag_from_roster(&mut self, client_id: ClientId) -> AdapterResult<DragPayload> {
        let record = self
            .directory
            .lookup(client_id)
            .ok_or(AdapterError::UnknownClient(client_id))?;

        let payload = DragPayload::new(record.id, record.name.clone(), false);
        self.begin_drag(payload.clone(), None);
        Ok(payload)
    }

    /// 从槽位开始拖拽 (移动已有分配)
    pub fn start_drag_from_slot(
        &mut self,
        slot: &SlotKey,
        client_id: ClientId,
    ) -> AdapterResult<DragPayload> {
        if !self.board.catalog().contains(slot) {
            return Err(BoardError::unknown_slot(slot).into());
        }
        let allocation = self
            .board
            .allocations(slot)
            .iter()
            .find(|a| a.client_id == client_id)
            .copied()
            .ok_or_else(|| BoardError::not_found(client_id, slot))?;

        let name = self.display_name(client_id);
        let payload = DragPayload::new(client_id, name, allocation.external_lab);
        self.begin_drag(payload.clone(), Some(slot.clone()));
        Ok(payload)
    }

    /// 放置到槽位
    ///
    /// 拖拽来自槽位且为同一客户 → move; 否则 → allocate (labExterno 缺省为 false)
    pub fn drop_on(&mut self, slot: &SlotKey, payload_json: &str) -> AdapterResult<Outcome> {
        let payload = parse_drag_payload(payload_json)?;
        let drag = self.drag.take();

        if !self.directory.contains(payload.id) {
            return Err(AdapterError::UnknownClient(payload.id));
        }

        let outcome = match drag {
            Some(DragState {
                payload: ref dragged,
                origin: Some(ref from),
            }) if dragged.id == payload.id => self.board.move_client(payload.id, from, slot)?,
            _ => self.board.allocate(slot, payload.id, payload.external_lab)?,
        };

        tracing::debug!(
            session_id = %self.session_id,
            "放置完成: client_id={}, {}, applied={}",
            payload.id,
            slot,
            outcome.is_applied()
        );
        Ok(outcome)
    }

    /// 取消拖拽 (放置在无效区域或按下 Esc)
    pub fn cancel_drag(&mut self) -> AdapterResult<DragPayload> {
        let drag = self.drag.take().ok_or(AdapterError::NoActiveDrag)?;
        tracing::debug!(session_id = %self.session_id, "拖拽取消: client_id={}", drag.payload.id);
        Ok(drag.payload)
    }

    // ==========================================
    // 槽位内操作
    // ==========================================

    /// 切换外部实验室标志,返回新值
    pub fn toggle_external_lab(&mut self, slot: &SlotKey, client_id: ClientId) -> AdapterResult<bool> {
        let current = self
            .board
            .allocations(slot)
            .iter()
            .find(|a| a.client_id == client_id)
            .map(|a| a.external_lab)
            .unwrap_or(false);

        self.board.set_external_lab(slot, client_id, !current)?;
        Ok(!current)
    }

    /// 经确认后移除分配
    ///
    /// 操作员取消时返回 Unchanged
    pub fn remove_with_confirmation(
        &mut self,
        slot: &SlotKey,
        client_id: ClientId,
        prompt: &dyn OperatorPrompt,
    ) -> AdapterResult<Outcome> {
        if !self.board.catalog().contains(slot) {
            return Err(BoardError::unknown_slot(slot).into());
        }
        if !self.board.allocations(slot).iter().any(|a| a.client_id == client_id) {
            return Err(BoardError::not_found(client_id, slot).into());
        }

        let name = self.display_name(client_id);
        if !prompt.confirm(&ConfirmPrompt::remove_client(&name)) {
            tracing::debug!(session_id = %self.session_id, "移除已取消: client_id={}", client_id);
            return Ok(Outcome::Unchanged);
        }

        Ok(self.board.remove(slot, client_id)?)
    }

    // ==========================================
    // 远端操作
    // ==========================================

    /// 复制上月计划
    ///
    /// # 返回
    /// - Ok(Some(n)): 已替换看板,落位 n 条
    /// - Ok(None): 操作员取消
    /// - Err: 拉取失败,看板未修改
    pub async fn copy_previous(
        &mut self,
        gateway: &PersistenceGateway,
        prompt: &dyn OperatorPrompt,
    ) -> AdapterResult<Option<usize>> {
        if !prompt.confirm(&ConfirmPrompt::copy_previous()) {
            return Ok(None);
        }

        let items = match gateway.fetch_previous(self.period).await {
            Ok(items) => items,
            Err(e) => {
                prompt.notify(Notification::error(t("notify.copy_error_title"), Some(e.message())));
                return Err(e.into());
            }
        };

        self.drag = None;
        let placed = BoardLoader::replace_from_previous(&mut self.board, &items, &self.directory);
        tracing::info!(
            session_id = %self.session_id,
            "复制上月完成: period={}, received={}, placed={}",
            self.period,
            items.len(),
            placed
        );

        prompt.notify(Notification::success(
            t("notify.copy_success_title"),
            Some(t_with_args(
                "notify.copy_success_text",
                &[("count", &placed.to_string())],
            )),
        ));
        Ok(Some(placed))
    }

    /// 保存看板 (单飞)
    ///
    /// 保存进行中再次调用立即返回 `SaveInFlight`,不发出请求
    pub async fn save(
        &self,
        gateway: &PersistenceGateway,
        prompt: &dyn OperatorPrompt,
    ) -> AdapterResult<String> {
        let _guard = SaveGuard::acquire(&self.saving).ok_or_else(|| {
            tracing::warn!(session_id = %self.session_id, "保存进行中,忽略重复请求");
            prompt.notify(Notification::error(
                t("notify.save_error_title"),
                Some(t("notify.save_in_flight")),
            ));
            AdapterError::SaveInFlight
        })?;

        match gateway.save(self.period, &self.board).await {
            Ok(message) => {
                prompt.notify(Notification::success(
                    t("notify.save_success_title"),
                    Some(message.clone()),
                ));
                Ok(message)
            }
            Err(e) => {
                let title = if e.is_transport() {
                    t("notify.connection_error_title")
                } else {
                    t("notify.save_error_title")
                };
                prompt.notify(Notification::error(title, Some(e.message())));
                Err(e.into())
            }
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn begin_drag(&mut self, payload: DragPayload, origin: Option<SlotKey>) {
        if let Some(previous) = self.drag.take() {
            tracing::debug!("覆盖未结束的拖拽: client_id={}", previous.payload.id);
        }
        self.drag = Some(DragState { payload, origin });
    }

    fn display_name(&self, client_id: ClientId) -> String {
        self.directory
            .name(client_id)
            .map(str::to_string)
            .unwrap_or_else(|| t("export.client_not_found"))
    }
}

impl std::fmt::Debug for PlannerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerSession")
            .field("session_id", &self.session_id)
            .field("period", &self.period)
            .field("board", &self.board)
            .field("drag", &self.drag)
            .field("saving", &self.is_saving())
            .finish()
    }
}
