// ==========================================
// 采样排班看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、线上数据格式
// 红线: 不含状态变更逻辑,不含网络访问
// ==========================================

pub mod allocation;
pub mod client;
pub mod drag;
pub mod period;
pub mod serde_utils;
pub mod types;

// 重导出核心类型
pub use allocation::{Allocation, InitialPlan, PlanRecord, PreviousAllocation, SnapshotEntry};
pub use client::ClientRecord;
pub use drag::DragPayload;
pub use period::Period;
pub use types::{ClientId, ClientStatus, Outcome, SlotKey};
