// ==========================================
// 采样排班看板 - 接口层
// ==========================================
// 职责: 看板状态与远端保存/复制接口之间的适配
// ==========================================

pub mod dto;
pub mod error;
pub mod gateway;
pub mod planning_api;

// 重导出核心类型
pub use dto::{SavePlanRequest, ServerMessage};
pub use error::{GatewayError, GatewayResult};
pub use gateway::PersistenceGateway;
pub use planning_api::{HttpPlanningApi, PlanningApi, COPY_PREVIOUS_PATH, SAVE_PATH};
