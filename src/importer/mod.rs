// ==========================================
// 采样排班看板 - 导入层
// ==========================================
// 职责: 外部载荷 (JSON) → 领域类型
// ==========================================

pub mod error;
pub mod payload;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use payload::{
    parse_drag_payload, parse_initial_plan, parse_previous_items, parse_roster, read_file,
    try_parse_initial_plan,
};
