// ==========================================
// 采样排班看板 - 领域类型定义
// ==========================================
// 职责: 槽位键、客户状态、操作结果等基础类型
// 红线: 槽位合法性由外部日历/班组名单决定,本模块不做校验
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 客户ID (与远端接口 id_cliente 一致)
pub type ClientId = i64;

// ==========================================
// 槽位键 (Slot Key)
// ==========================================
// (日, 班组) 唯一标识一个排班位置
// 排序: 先按日,再按班组代码
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: u32,     // 月内日期 (1..=31)
    pub team: String, // 班组代码 (如 R1/R2)
}

impl SlotKey {
    pub fn new(day: u32, team: impl Into<String>) -> Self {
        Self {
            day,
            team: team.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dia={} equipe={}", self.day, self.team)
    }
}

// ==========================================
// 客户排班状态 (Client Status)
// ==========================================
// 派生视图: 客户出现在任一槽位 <=> Scheduled
// 序列化格式: 与前端状态图标 class 一致 (agendado/pendente)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    #[serde(rename = "agendado")]
    Scheduled, // 已排班
    #[serde(rename = "pendente")]
    Unscheduled, // 待排班
}

impl ClientStatus {
    pub fn from_scheduled(scheduled: bool) -> Self {
        if scheduled {
            ClientStatus::Scheduled
        } else {
            ClientStatus::Unscheduled
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, ClientStatus::Scheduled)
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientStatus::Scheduled => write!(f, "agendado"),
            ClientStatus::Unscheduled => write!(f, "pendente"),
        }
    }
}

// ==========================================
// 操作结果 (Outcome)
// ==========================================
// 成功的变更操作分两种: 实际生效 / 幂等无变化
// 只有 Applied 会发布看板事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Applied,   // 状态已变更
    Unchanged, // 幂等操作,状态未变
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => write!(f, "APPLIED"),
            Outcome::Unchanged => write!(f, "UNCHANGED"),
        }
    }
}
