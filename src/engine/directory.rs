// ==========================================
// 采样排班看板 - 客户目录
// ==========================================
// 职责: 客户ID → 显示名称 的只读查询
// 红线: 构建后不可变; 查不到的ID由调用方决定如何处理
// ==========================================

use crate::domain::client::ClientRecord;
use crate::domain::types::ClientId;
use std::collections::HashMap;

/// 客户目录 (会话开始时构建一次)
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    clients: HashMap<ClientId, ClientRecord>,
}

impl ClientDirectory {
    /// 由客户档案列表构建
    ///
    /// 重复ID以最后一条为准
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ClientRecord>,
    {
        let mut clients = HashMap::new();
        for record in records {
            if let Some(previous) = clients.insert(record.id, record) {
                tracing::warn!(
                    "客户目录存在重复ID, 以后出现的记录为准: id={}, 旧名称={}",
                    previous.id,
                    previous.name
                );
            }
        }
        Self { clients }
    }

    /// 由 (id, 名称) 对构建
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ClientId, S)>,
        S: Into<String>,
    {
        Self::from_records(
            pairs
                .into_iter()
                .map(|(id, name)| ClientRecord::new(id, name)),
        )
    }

    pub fn lookup(&self, id: ClientId) -> Option<&ClientRecord> {
        self.clients.get(&id)
    }

    pub fn name(&self, id: ClientId) -> Option<&str> {
        self.clients.get(&id).map(|c| c.name.as_str())
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// 名单面板顺序: 按名称 (忽略大小写) 排序, 同名按ID
    pub fn roster_sorted(&self) -> Vec<&ClientRecord> {
        let mut roster: Vec<&ClientRecord> = self.clients.values().collect();
        roster.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        roster
    }
}
