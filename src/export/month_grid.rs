// ==========================================
// 采样排班看板 - 月度网格导出
// ==========================================
// 职责: 将看板导出为 CSV (每个有效 (日, 班组) 一行)
// 格式:
//   标题行 | 表头 | 数据行 ... | 图例行 (存在外部实验室分配时)
//   数据列: 日, 星期, 班组, 数量, 客户名 (以 "; " 连接)
// ==========================================

use crate::domain::period::Period;
use crate::engine::board::AllocationBoard;
use crate::engine::directory::ClientDirectory;
use crate::export::error::ExportResult;
use crate::i18n::{month_name, t, t_with_args, weekday_name};
use chrono::Datelike;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 外部实验室标记
pub const EXTERNAL_LAB_MARK: &str = "★";

/// 客户名分隔符
const NAME_SEPARATOR: &str = "; ";

/// 月度网格导出器
pub struct MonthGridExporter;

impl MonthGridExporter {
    /// 写出 CSV
    ///
    /// # 返回
    /// 数据行数 (不含标题/表头/图例)
    pub fn write_csv<W: Write>(
        board: &AllocationBoard,
        directory: &ClientDirectory,
        period: Period,
        writer: W,
    ) -> ExportResult<usize> {
        let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);

        csv.write_record([t_with_args(
            "export.title",
            &[
                ("month", &month_name(period.month)),
                ("year", &period.year.to_string()),
            ],
        )])?;
        csv.write_record([
            t("export.header_day"),
            t("export.header_weekday"),
            t("export.header_team"),
            t("export.header_count"),
            t("export.header_clients"),
        ])?;

        let not_found = t("export.client_not_found");
        let mut rows = 0;
        let mut has_external_lab = false;

        for slot in board.catalog().keys() {
            let weekday = period
                .date(slot.day)
                .map(|d| weekday_name(d.weekday()))
                .unwrap_or_default();

            let allocations = board.allocations(&slot);
            let names: Vec<String> = allocations
                .iter()
                .map(|a| {
                    let name = directory.name(a.client_id).unwrap_or(not_found.as_str());
                    if a.external_lab {
                        has_external_lab = true;
                        format!("{} {}", EXTERNAL_LAB_MARK, name)
                    } else {
                        name.to_string()
                    }
                })
                .collect();

            csv.write_record([
                slot.day.to_string(),
                weekday,
                slot.team.clone(),
                allocations.len().to_string(),
                names.join(NAME_SEPARATOR),
            ])?;
            rows += 1;
        }

        if has_external_lab {
            csv.write_record([t("export.legend")])?;
        }

        csv.flush()?;
        tracing::info!("月度网格导出完成: period={}, rows={}", period, rows);
        Ok(rows)
    }

    /// 写出到文件
    pub fn write_file(
        board: &AllocationBoard,
        directory: &ClientDirectory,
        period: Period,
        path: &Path,
    ) -> ExportResult<usize> {
        let file = File::create(path)?;
        Self::write_csv(board, directory, period, file)
    }
}
