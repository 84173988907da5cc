// ==========================================
// 采样排班看板 - 槽位目录 (日历 × 班组)
// ==========================================
// 职责: 给出当前会话的合法槽位集合及其显示顺序
// 说明: 合法日/班组由外部提供,引擎只做成员判断
// ==========================================

use crate::domain::period::Period;
use crate::domain::types::SlotKey;

/// 合法槽位目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    days: Vec<u32>,     // 升序去重
    teams: Vec<String>, // 保持名单顺序,去重
}

impl SlotCatalog {
    /// 由显式的日列表与班组名单构建
    pub fn new<D, T, S>(days: D, teams: T) -> Self
    where
        D: IntoIterator<Item = u32>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut days: Vec<u32> = days.into_iter().collect();
        days.sort_unstable();
        days.dedup();

        let mut unique_teams: Vec<String> = Vec::new();
        for team in teams {
            let team = team.into();
            if team.trim().is_empty() || unique_teams.contains(&team) {
                continue;
            }
            unique_teams.push(team);
        }

        Self {
            days,
            teams: unique_teams,
        }
    }

    /// 当月每一天 × 每个班组
    pub fn for_period<T, S>(period: Period, teams: T) -> Self
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(1..=period.days_in_month(), teams)
    }

    pub fn contains(&self, slot: &SlotKey) -> bool {
        self.days.binary_search(&slot.day).is_ok() && self.teams.iter().any(|t| t == &slot.team)
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// 全部槽位,按 (日, 班组名单顺序) 排列
    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.days
            .iter()
            .flat_map(move |day| self.teams.iter().map(move |team| SlotKey::new(*day, team.clone())))
    }

    pub fn len(&self) -> usize {
        self.days.len() * self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_period_covers_month() {
        let period = Period::new(2025, 2).unwrap();
        let catalog = SlotCatalog::for_period(period, ["R1", "R2"]);

        assert_eq!(catalog.days().len(), 28);
        assert_eq!(catalog.len(), 56);
        assert!(catalog.contains(&SlotKey::new(28, "R2")));
        assert!(!catalog.contains(&SlotKey::new(29, "R1")));
        assert!(!catalog.contains(&SlotKey::new(1, "R3")));
    }

    #[test]
    fn test_keys_follow_roster_order() {
        let catalog = SlotCatalog::new([2, 1, 2], ["R2", "R1", "R2", ""]);
        let keys: Vec<SlotKey> = catalog.keys().collect();
        assert_eq!(
            keys,
            vec![
                SlotKey::new(1, "R2"),
                SlotKey::new(1, "R1"),
                SlotKey::new(2, "R2"),
                SlotKey::new(2, "R1"),
            ]
        );
    }
}
