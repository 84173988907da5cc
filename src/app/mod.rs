// ==========================================
// 采样排班看板 - 交互适配层
// ==========================================
// 职责: 手势 → 看板操作, 看板事件 → 界面派生状态
// ==========================================

pub mod error;
pub mod prompt;
pub mod session;
pub mod view_state;

// 重导出
pub use error::{AdapterError, AdapterResult};
pub use prompt::{
    ConfirmPrompt, ConsolePrompt, Notification, NotificationLevel, OperatorPrompt,
    ERROR_TIMER_MS, SUCCESS_TIMER_MS,
};
pub use session::{DragState, PlannerSession};
pub use view_state::BoardView;
