// ==========================================
// 采样排班看板 - 导出层
// ==========================================

pub mod error;
pub mod month_grid;

// 重导出
pub use error::{ExportError, ExportResult};
pub use month_grid::{MonthGridExporter, EXTERNAL_LAB_MARK};
