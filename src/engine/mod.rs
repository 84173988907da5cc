// ==========================================
// 采样排班看板 - 引擎层
// ==========================================
// 职责: 分配看板状态机、客户目录、槽位目录、加载器
// 红线: 引擎不访问网络,不触碰展示层状态
// ==========================================

pub mod board;
pub mod calendar;
pub mod directory;
pub mod error;
pub mod events;
pub mod loader;

// 重导出核心引擎
pub use board::AllocationBoard;
pub use calendar::SlotCatalog;
pub use directory::ClientDirectory;
pub use error::{BoardError, BoardResult};
pub use events::{BoardEvent, BoardEventKind, BoardEventPublisher, SlotCount, StatusChange};
pub use loader::{BoardLoader, LoadReport};
