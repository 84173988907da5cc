// ==========================================
// 采样排班看板 - 排班分配领域模型
// ==========================================
// 红线: 一个客户在整个看板上最多占用一个槽位
// 线上字段名沿用远端接口 (dia/id_cliente/equipe/lab_externo)
// ==========================================

use crate::domain::serde_utils::{de_flag, de_lenient_day, de_lenient_i64};
use crate::domain::types::{ClientId, SlotKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Allocation - 槽位中的一次分配
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub client_id: ClientId, // 客户ID
    pub external_lab: bool,  // 外部实验室跟踪
}

impl Allocation {
    pub fn new(client_id: ClientId, external_lab: bool) -> Self {
        Self {
            client_id,
            external_lab,
        }
    }
}

// ==========================================
// SnapshotEntry - 看板快照条目
// ==========================================
// 用途: 保存请求中的 planejamento 数组元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(rename = "dia")]
    pub day: u32,
    #[serde(rename = "id_cliente")]
    pub client_id: ClientId,
    #[serde(rename = "equipe")]
    pub team: String,
    #[serde(rename = "lab_externo")]
    pub external_lab: bool,
}

impl SnapshotEntry {
    pub fn slot(&self) -> SlotKey {
        SlotKey::new(self.day, self.team.clone())
    }
}

// ==========================================
// PlanRecord - 初始计划中的单条记录
// ==========================================
// 历史数据可能缺少 equipe,加载时跳过
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    #[serde(rename = "id_cliente", deserialize_with = "de_lenient_i64")]
    pub client_id: ClientId,
    #[serde(rename = "equipe", default)]
    pub team: Option<String>,
    #[serde(rename = "lab_externo", default, deserialize_with = "de_flag")]
    pub external_lab: bool,
}

/// 初始计划: 日 → 记录列表 (按日升序遍历)
pub type InitialPlan = BTreeMap<u32, Vec<PlanRecord>>;

// ==========================================
// PreviousAllocation - 上月复制接口返回条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousAllocation {
    #[serde(rename = "dia", deserialize_with = "de_lenient_day")]
    pub day: u32,
    #[serde(rename = "id_cliente", deserialize_with = "de_lenient_i64")]
    pub client_id: ClientId,
    #[serde(rename = "equipe", default)]
    pub team: Option<String>,
    #[serde(rename = "lab_externo", default, deserialize_with = "de_flag")]
    pub external_lab: bool,
}

impl PreviousAllocation {
    pub fn new(day: u32, client_id: ClientId, team: impl Into<String>, external_lab: bool) -> Self {
        Self {
            day,
            client_id,
            team: Some(team.into()),
            external_lab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_entry_wire_format() {
        let entry = SnapshotEntry {
            day: 5,
            client_id: 1,
            team: "R1".to_string(),
            external_lab: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dia": 5, "id_cliente": 1, "equipe": "R1", "lab_externo": true})
        );
        assert_eq!(entry.slot(), SlotKey::new(5, "R1"));
    }

    #[test]
    fn test_previous_allocation_without_lab_flag() {
        // 上月接口只返回 dia/id_cliente/equipe
        let item: PreviousAllocation =
            serde_json::from_str(r#"{"dia": 3, "id_cliente": 9, "equipe": "R2"}"#).unwrap();
        assert_eq!(item.day, 3);
        assert_eq!(item.team.as_deref(), Some("R2"));
        assert!(!item.external_lab);
    }

    #[test]
    fn test_plan_record_with_null_team() {
        let record: PlanRecord =
            serde_json::from_str(r#"{"id_cliente": 4, "equipe": null, "lab_externo": 1}"#).unwrap();
        assert_eq!(record.client_id, 4);
        assert!(record.team.is_none());
        assert!(record.external_lab);
    }
}
