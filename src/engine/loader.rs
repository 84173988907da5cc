// ==========================================
// 采样排班看板 - 看板加载器
// ==========================================
// 职责:
// 1. 会话开始时由已保存计划填充看板 (load_initial)
// 2. "复制上月" 时清空看板并批量替换 (replace_from_previous)
// 红线: 与交互操作使用相同的校验与幂等规则 (均经由 board.allocate)
// 容错: 目录中不存在的客户、缺少班组的记录静默跳过
// ==========================================

use crate::domain::allocation::{InitialPlan, PreviousAllocation};
use crate::domain::types::{ClientId, Outcome, SlotKey};
use crate::engine::board::AllocationBoard;
use crate::engine::directory::ClientDirectory;
use serde::{Deserialize, Serialize};

/// 加载结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// 实际落位的记录数
    pub placed: usize,
    /// 跳过的记录数 (未知客户/缺班组/被看板拒绝/重复)
    pub skipped: usize,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.placed + self.skipped
    }
}

/// 看板加载器
///
/// 不持有看板,每次调用通过引用借用
pub struct BoardLoader;

impl BoardLoader {
    /// 由已保存计划 (日 → 记录列表) 填充看板
    ///
    /// 处理顺序: 日升序,日内按列表顺序 (确定性,便于测试复现)
    pub fn load_initial(
        board: &mut AllocationBoard,
        plan: &InitialPlan,
        directory: &ClientDirectory,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for (day, records) in plan {
            for record in records {
                Self::place(
                    board,
                    directory,
                    *day,
                    record.client_id,
                    record.team.as_deref(),
                    record.external_lab,
                    &mut report,
                );
            }
        }

        tracing::info!(
            "初始计划加载完成: placed={}, skipped={}",
            report.placed,
            report.skipped
        );
        report
    }

    /// 清空看板后用上月计划替换
    ///
    /// # 返回
    /// 实际落位的记录数 (用于操作员反馈)
    ///
    /// # 说明
    /// 破坏性操作,需由界面层先取得操作员确认
    pub fn replace_from_previous(
        board: &mut AllocationBoard,
        items: &[PreviousAllocation],
        directory: &ClientDirectory,
    ) -> usize {
        board.clear();

        let mut report = LoadReport::default();
        for item in items {
            Self::place(
                board,
                directory,
                item.day,
                item.client_id,
                item.team.as_deref(),
                item.external_lab,
                &mut report,
            );
        }

        tracing::info!(
            "上月计划替换完成: received={}, placed={}, skipped={}",
            items.len(),
            report.placed,
            report.skipped
        );
        report.placed
    }

    /// 单条记录落位 (与交互操作相同的校验)
    fn place(
        board: &mut AllocationBoard,
        directory: &ClientDirectory,
        day: u32,
        client_id: ClientId,
        team: Option<&str>,
        external_lab: bool,
        report: &mut LoadReport,
    ) {
        if directory.lookup(client_id).is_none() {
            tracing::debug!("跳过未知客户: client_id={}, dia={}", client_id, day);
            report.skipped += 1;
            return;
        }

        let team = match team {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                tracing::debug!("跳过缺少班组的记录: client_id={}, dia={}", client_id, day);
                report.skipped += 1;
                return;
            }
        };

        let slot = SlotKey::new(day, team);
        match board.allocate(&slot, client_id, external_lab) {
            Ok(Outcome::Applied) => report.placed += 1,
            Ok(Outcome::Unchanged) => {
                tracing::debug!("跳过重复记录: client_id={}, {}", client_id, slot);
                report.skipped += 1;
            }
            Err(e) => {
                tracing::warn!("记录被看板拒绝, 已跳过: {}", e);
                report.skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::PlanRecord;
    use crate::engine::calendar::SlotCatalog;

    fn record(client_id: ClientId, team: Option<&str>, external_lab: bool) -> PlanRecord {
        PlanRecord {
            client_id,
            team: team.map(str::to_string),
            external_lab,
        }
    }

    fn setup() -> (AllocationBoard, ClientDirectory) {
        (
            AllocationBoard::new(SlotCatalog::new(1..=31, ["A", "B"])),
            ClientDirectory::from_pairs([(1, "Acme"), (2, "Beta"), (3, "Gama")]),
        )
    }

    #[test]
    fn test_load_initial_skips_invalid_records() {
        let (mut board, directory) = setup();
        let mut plan = InitialPlan::new();
        plan.insert(
            5,
            vec![
                record(1, Some("A"), true),
                record(99, Some("A"), false), // 未知客户
                record(2, None, false),       // 缺班组
                record(3, Some(""), false),   // 空班组
            ],
        );
        plan.insert(40, vec![record(3, Some("A"), false)]); // 未知槽位

        let report = BoardLoader::load_initial(&mut board, &plan, &directory);

        assert_eq!(report, LoadReport { placed: 1, skipped: 4 });
        assert!(board.is_scheduled(1));
        assert!(!board.is_scheduled(2));
        assert!(!board.is_scheduled(3));
    }

    #[test]
    fn test_load_initial_keeps_first_placement_of_duplicates() {
        let (mut board, directory) = setup();
        let mut plan = InitialPlan::new();
        plan.insert(3, vec![record(1, Some("A"), false)]);
        plan.insert(4, vec![record(1, Some("B"), false), record(1, Some("B"), false)]);

        let report = BoardLoader::load_initial(&mut board, &plan, &directory);

        assert_eq!(report.placed, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(board.locate(1), Some(SlotKey::new(3, "A")));
    }

    #[test]
    fn test_replace_from_previous_clears_first() {
        let (mut board, directory) = setup();
        board.allocate(&SlotKey::new(1, "A"), 1, false).unwrap();

        let items = vec![
            PreviousAllocation::new(2, 2, "B", true),
            PreviousAllocation::new(3, 9, "B", false),
        ];
        let placed = BoardLoader::replace_from_previous(&mut board, &items, &directory);

        assert_eq!(placed, 1);
        assert!(!board.is_scheduled(1));
        assert_eq!(board.slot_count(&SlotKey::new(2, "B")), 1);
        assert_eq!(board.len(), 1);
    }
}
